//! Shared utility functions.
//!
//! - Log tail truncation
//! - Borrowed tail slices of captured output

mod file_ops;
mod string;

pub use file_ops::{TruncateStats, tail_start, truncate_to_last_lines};
pub use string::tail_lines;
