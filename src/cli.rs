//! CLI domain: parse, route, output, and presentation only.
//! The route table builds a project snapshot and hands it to the engine.

mod output;
mod parse;
mod presentation;
mod route;
mod watch;

pub use output::{map_error, CommandOutput};
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_check_text, format_classification_json, format_classification_text,
    format_status_json, format_status_text,
};
pub use route::RunContext;
