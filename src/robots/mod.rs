//! Robots.txt snapshot handling
//!
//! This module decides whether a fetched snapshot is a real robots.txt file
//! and pulls out the lines that should be emitted from it.

mod classifier;
mod parser;

pub use classifier::is_invalid_response;
pub use parser::extract_candidates;
