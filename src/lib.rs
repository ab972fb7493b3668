//! intlkeys - type-safe translation keys for next-intl message catalogs
//!
//! intlkeys derives a key schema from a canonical locale's message files,
//! checks every other locale against it, generates key declaration files
//! and resolves keys at runtime with placeholder interpolation.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, report, exit status)
//! - `config`: Configuration file loading and parsing
//! - `core`: Message trees, schema derivation, catalog, codegen
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Checks run against the loaded locales
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
