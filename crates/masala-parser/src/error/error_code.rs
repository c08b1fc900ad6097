//! Error codes for the Masala diagnostic system.
//!
//! Codes are organized by phase:
//! - `E1xx` - Document errors (malformed serialized AST)
//! - `E2xx` - Validation errors
//! - `W2xx` - Validation warnings

use std::fmt;

/// Error codes for categorizing diagnostics produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Malformed document.
    ///
    /// The serialized AST is not valid JSON, a required field is missing,
    /// a name is empty, or an element carries an unknown `$type`.
    E100,

    /// Unexpected root node.
    ///
    /// The root of the serialized AST is not a `Domainmodel`.
    E101,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Non-unique entity name.
    ///
    /// An entity with this name was already declared in the same scope.
    E200,

    /// Repeated greeting.
    ///
    /// A person was greeted more than once in the same scope.
    E201,

    // =========================================================================
    // Validation Warnings (W2xx)
    // =========================================================================
    /// Person name is not capitalized.
    W200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E200").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::W200 => "W200",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed document",
            ErrorCode::E101 => "unexpected root node",
            ErrorCode::E200 => "non-unique entity name",
            ErrorCode::E201 => "repeated greeting",
            ErrorCode::W200 => "person name not capitalized",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
        assert_eq!(ErrorCode::W200.to_string(), "W200");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E101.description(), "unexpected root node");
        assert_eq!(ErrorCode::E201.description(), "repeated greeting");
    }
}
