//! API route inventory
//!
//! Walks the source dir for App Router handlers (`route.ts` / `route.js` under
//! an `api/` segment) and writes `api-routes.md`, sorted by route path.

use ignore::WalkBuilder;
use regex::Regex;
use std::fmt::Write;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use tracing::{debug, info};

use crate::config::Config;
use crate::types::{GuardError, Result};

const ROUTE_FILES: &[&str] = &["route.ts", "route.js"];

const SKIP_DIRS: &[&str] = &["node_modules", ".next", ".git", "dist", "build"];

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

static EXPORTED_HANDLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"export\s+(?:async\s+)?(?:function\s+|(?:const|let)\s+)(GET|POST|PUT|PATCH|DELETE|HEAD|OPTIONS)\b",
    )
    .expect("valid regex")
});

static EXPORT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s*\{([^}]*)\}").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoute {
    /// URL path, e.g. `/api/users/:id`
    pub path: String,
    /// Handler file relative to the project root
    pub file: String,
    /// Exported HTTP methods in canonical order
    pub methods: Vec<String>,
}

/// URL path for a route handler, or `None` if it is not under an `api/` segment
pub fn route_path(relative: &Path) -> Option<String> {
    let segments: Vec<&str> = relative
        .parent()?
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();

    let api_index = segments.iter().position(|s| *s == "api")?;

    let mut path = String::new();
    for segment in &segments[api_index..] {
        if segment.starts_with('(') && segment.ends_with(')') {
            continue;
        }
        path.push('/');
        path.push_str(&url_segment(segment));
    }
    Some(path)
}

fn url_segment(segment: &str) -> String {
    if let Some(inner) = segment.strip_prefix("[[...").and_then(|s| s.strip_suffix("]]")) {
        return format!("*{}?", inner);
    }
    if let Some(inner) = segment.strip_prefix("[...").and_then(|s| s.strip_suffix(']')) {
        return format!("*{}", inner);
    }
    if let Some(inner) = segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return format!(":{}", inner);
    }
    segment.to_string()
}

/// HTTP methods exported by a handler module
pub fn detect_methods(source: &str) -> Vec<String> {
    let mut found: Vec<&str> = EXPORTED_HANDLER
        .captures_iter(source)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    for list in EXPORT_LIST.captures_iter(source) {
        let Some(names) = list.get(1) else { continue };
        for name in names.as_str().split(',') {
            // `export { handler as GET }` exports the alias
            let exported = name.split_whitespace().last().unwrap_or("");
            if HTTP_METHODS.contains(&exported) {
                found.push(exported);
            }
        }
    }

    HTTP_METHODS
        .iter()
        .filter(|m| found.contains(m))
        .map(|m| m.to_string())
        .collect()
}

/// Find every route handler below `source_dir`
pub fn scan_routes(root: &Path, source_dir: &Path) -> Vec<ApiRoute> {
    let walker = WalkBuilder::new(source_dir)
        .hidden(false)
        .git_ignore(true)
        .git_exclude(true)
        .follow_links(false)
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !SKIP_DIRS.contains(&name))
        })
        .build();

    let mut routes = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        let is_route_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| ROUTE_FILES.contains(&n));
        if !is_route_file || !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let Some(url) = route_path(relative) else {
            continue;
        };

        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                debug!("Skipping unreadable route {}: {}", path.display(), e);
                continue;
            }
        };

        routes.push(ApiRoute {
            path: url,
            file: relative.to_string_lossy().replace('\\', "/"),
            methods: detect_methods(&source),
        });
    }

    routes.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.file.cmp(&b.file)));
    routes
}

pub fn render(routes: &[ApiRoute]) -> String {
    let mut out = String::new();
    out.push_str("# API Routes\n\n");
    out.push_str("Generated by `agent-guard generate api-routes`. Do not edit by hand.\n\n");
    let _ = writeln!(out, "Total: {} route(s)\n", routes.len());

    if routes.is_empty() {
        out.push_str("No API routes found.\n");
        return out;
    }

    out.push_str("| Route | Methods | File |\n");
    out.push_str("|-------|---------|------|\n");
    for route in routes {
        let methods = if route.methods.is_empty() {
            "-".to_string()
        } else {
            route.methods.join(", ")
        };
        let _ = writeln!(out, "| `{}` | {} | `{}` |", route.path, methods, route.file);
    }
    out
}

/// Regenerate `<generatedDir>/api-routes.md`
pub fn generate(config: &Config) -> Result<PathBuf> {
    let source_dir = config
        .resolve_path(Some(&config.scan_paths.source_dir))
        .ok_or_else(|| GuardError::Config("scanPaths.sourceDir is empty".to_string()))?;
    if !source_dir.is_dir() {
        return Err(GuardError::Generator {
            command: "generate api-routes".to_string(),
            message: format!("source directory {} does not exist", source_dir.display()),
        });
    }

    let routes = scan_routes(config.root(), &source_dir);

    let out_dir = config.root().join(&config.generated_dir);
    fs::create_dir_all(&out_dir)?;
    let out_path = out_dir.join("api-routes.md");
    fs::write(&out_path, render(&routes))?;

    info!("Wrote {} API routes to {}", routes.len(), out_path.display());
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use tempfile::TempDir;

    #[test]
    fn test_route_path() {
        assert_eq!(
            route_path(Path::new("src/app/api/users/route.ts")).as_deref(),
            Some("/api/users")
        );
        assert_eq!(
            route_path(Path::new("src/app/(admin)/api/users/[id]/route.ts")).as_deref(),
            Some("/api/users/:id")
        );
        assert_eq!(
            route_path(Path::new("src/app/api/(v1)/files/[...slug]/route.js")).as_deref(),
            Some("/api/files/*slug")
        );
        assert_eq!(route_path(Path::new("src/app/users/route.ts")), None);
    }

    #[test]
    fn test_detect_methods() {
        let source = r#"
            export async function POST(req: Request) {}
            export function GET() {}
            export const DELETE = handler;
            function PUT() {}
            export { other as PATCH };
        "#;
        assert_eq!(detect_methods(source), vec!["GET", "POST", "PATCH", "DELETE"]);
        assert!(detect_methods("export default function handler() {}").is_empty());
    }

    #[test]
    fn test_generate_writes_sorted_inventory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let write = |rel: &str, body: &str| {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        };
        write("src/app/api/users/[id]/route.ts", "export async function GET() {}\n");
        write("src/app/api/auth/route.ts", "export async function POST() {}\n");
        write("src/app/page.tsx", "export default function Page() {}\n");
        write(
            "src/node_modules/pkg/app/api/x/route.js",
            "export function GET() {}\n",
        );

        let config = ConfigLoader::from_json(root, "{}").unwrap();
        let path = generate(&config).unwrap();
        let md = fs::read_to_string(path).unwrap();

        assert!(md.contains("Total: 2 route(s)"));
        let auth = md.find("`/api/auth`").unwrap();
        let users = md.find("`/api/users/:id`").unwrap();
        assert!(auth < users);
        assert!(md.contains("| `/api/auth` | POST | `src/app/api/auth/route.ts` |"));
        assert!(!md.contains("/api/x"));
    }

    #[test]
    fn test_generate_missing_source_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::from_json(temp_dir.path(), "{}").unwrap();
        assert!(matches!(
            generate(&config),
            Err(GuardError::Generator { .. })
        ));
    }
}
