//! Command-line front end: read a backend payload from disk, run one search
//! session over it, and print the resulting overview.

pub mod args;
pub mod report;

pub use args::Args;
pub use report::{BlockReport, Report};
