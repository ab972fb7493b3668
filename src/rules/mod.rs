//! Rule implementations for intlkeys.
//!
//! Each rule is a pure function over the loaded bundles that returns the
//! issues it finds, sorted. A thin `check_*_issues` wrapper pulls its inputs
//! from the project context.
//!
//! ## Module Structure
//!
//! - `structure`: Empty namespaces, non-string values and malformed keys in the canonical locale
//! - `shape`: Missing keys, extra keys and type mismatches in other locales
//! - `placeholder`: Placeholders that differ from the canonical string
//! - `untranslated`: Values identical to the canonical locale

pub mod placeholder;
pub mod shape;
pub mod structure;
pub mod untranslated;

pub use placeholder::check_placeholder_issues;
pub use shape::check_shape_issues;
pub use structure::check_structure_issues;
pub use untranslated::check_untranslated_issues;
