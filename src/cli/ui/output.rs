use console::style;

/// Styled messages for the commands a person runs by hand.
///
/// `--quiet` drops informational lines; warnings, errors and results stay.
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Indented line under the previous message
    pub fn detail(&self, message: &str) {
        println!("    {}", style(message).dim());
    }

    pub fn header(&self, message: &str) {
        if !self.quiet {
            println!("\n{}", style(message).bold().underlined());
        }
    }

    /// A file and the problems found in it
    pub fn finding(&self, file: &str, issues: &[String]) {
        println!("\n  {}", style(file).bold());
        for issue in issues {
            println!("    {} {}", style("•").red(), issue);
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false)
    }
}
