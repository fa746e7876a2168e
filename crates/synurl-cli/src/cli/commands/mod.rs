//! CLI command handlers, one file per command.

mod cluster;
mod input;
mod reduce;
mod segment;
mod trie;
mod validate;

pub use cluster::run_cluster;
pub use input::ReportPaths;
pub use reduce::{run_reduce, ReduceArgs};
pub use segment::run_segment;
pub use trie::run_trie;
pub use validate::{run_validate, ValidateArgs};
