pub mod commands;
pub mod reporter;
pub mod ui;

pub use reporter::Reporter;
pub use ui::Output;
