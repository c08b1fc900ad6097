//! # Masala Parser
//!
//! Document model, normalization and semantic validation for the Masala
//! domain-model language. The concrete-syntax parser lives in the language
//! service; this crate starts from the serialized AST it produces.
//!
//! ## Usage
//!
//! ```
//! # use masala_parser::{normalize, validate, Document, DocumentError};
//!
//! fn main() -> Result<(), DocumentError> {
//!     let content = r#"{
//!         "$type": "Domainmodel",
//!         "elements": [
//!             { "$type": "Entity", "name": "User" },
//!             { "$type": "Entity", "name": "User" }
//!         ]
//!     }"#;
//!
//!     let document = Document::from_json(content)?;
//!     let model = normalize(&document);
//!     let diagnostics = validate(&model);
//!
//!     assert_eq!(diagnostics.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod error;
pub mod normalize;
pub mod notification;
pub mod reference;
pub mod validate;

pub use ast::{Document, TypeRef};
pub use error::{Diagnostic, DocumentError, Severity};
pub use normalize::{Located, NormalizedModel, normalize};
pub use notification::DocumentChange;
pub use reference::{CrossRef, NodePath, Resolution};
pub use validate::{ValidateConfig, validate, validate_with};
