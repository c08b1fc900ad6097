//! Error and diagnostic system for the Masala semantic processor.
//!
//! - Error codes for documentation and searchability
//! - Severity levels
//! - Diagnostics attached to AST nodes or source ranges
//! - A collector for accumulating every violation in a snapshot
//! - [`DocumentError`] for documents that must be rejected outright
//!
//! # Example
//!
//! ```
//! # use masala_parser::error::{Diagnostic, ErrorCode};
//! # use masala_parser::reference::NodePath;
//! let diag = Diagnostic::error("You can greet each person only once. This is the 2nd greeting to 'Alice'.")
//!     .with_code(ErrorCode::E201)
//!     .with_node("/elements@3".parse::<NodePath>().unwrap());
//!
//! assert!(diag.severity().is_error());
//! ```

mod collector;
mod diagnostic;
mod document_error;
mod error_code;
mod severity;
mod target;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Diagnostic, DiagnosticCode};
pub use document_error::{DocumentError, Result};
pub use error_code::ErrorCode;
pub use severity::Severity;
pub use target::DiagnosticTarget;
