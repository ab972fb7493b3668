//! Translation key engine.
//!
//! Loads message documents, derives the key schema from the canonical
//! locale, and answers lookups against it.
//!
//! ## Module Structure
//!
//! - `data`: Message trees, key paths and locations
//! - `parsers`: JSON message document loading
//! - `schema`: Schema derivation and key enumeration
//! - `shape`: Shape comparison between locales
//! - `namespace`: Namespace extraction
//! - `interpolate`: Placeholder parsing and substitution
//! - `resolve`: Key validation and lookup
//! - `catalog`: Runtime catalog with locale negotiation and fallback
//! - `codegen`: Generated key declarations
//! - `context`: Project configuration and loaded messages for the CLI

pub mod catalog;
pub mod codegen;
pub mod context;
pub mod data;
pub mod interpolate;
pub mod namespace;
pub mod parsers;
pub mod resolve;
pub mod schema;
pub mod shape;

pub use catalog::{Catalog, CatalogOptions, Translator};
pub use codegen::{GenerateOptions, Target, generate};
pub use data::{
    AllLocaleMessages, InvalidValue, KEY_DELIMITER, KeyPath, KeySet, Leaf, LocaleBundle,
    LocaleTypeMismatch, MessageContext, MessageLocation, MessageNode, Namespace, ValueType,
};
pub use interpolate::{SubstitutionPolicy, SubstitutionValue, Substitutions};
pub use namespace::{NamespaceError, NamespaceSchema, extract_namespace};
pub use resolve::{ResolveError, resolve};
pub use schema::{MessageSchema, SchemaError, SchemaViolation};
pub use shape::ShapeMismatch;
