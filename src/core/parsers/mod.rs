//! Message file parsers.
//!
//! - `json`: JSON message documents (single-file and split-by-namespace layouts)

pub mod json;
