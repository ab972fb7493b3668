//! Core data types shared by the parser, the schema deriver and the rules.
//!
//! ## Module Structure
//!
//! - `key_path`: KeyPath and KeySet
//! - `message`: Locations, contexts and value types used in diagnostics
//! - `tree`: The per-locale message tree (LocaleBundle, Namespace, MessageNode)

pub mod key_path;
pub mod message;
pub mod tree;

pub use key_path::{KEY_DELIMITER, KeyPath, KeySet};
pub use message::{LocaleTypeMismatch, MessageContext, MessageLocation, ValueType};
pub use tree::{AllLocaleMessages, InvalidValue, Leaf, LocaleBundle, MessageNode, Namespace};
