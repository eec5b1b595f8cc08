pub mod model;
pub mod report;

// Re-export commonly used helpers for the CLIs
pub use model::{load_program, write_program, Program};
pub use report::{render_listing, render_summary, summarize, OutputFormat, Summary};
