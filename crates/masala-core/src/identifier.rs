//! Element names backed by a string interner.
//!
//! Every declaration in a Masala document (entity, datatype, package, person)
//! carries a name. Names are compared constantly: the validator counts them,
//! the tree builder looks supertypes up by them and the graph projector keys
//! its position cache on them. [`Id`] interns each distinct name once so these
//! comparisons are integer comparisons.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use string_interner::{DefaultStringInterner, DefaultSymbol};
use thiserror::Error;

/// Global string interner for element names.
///
/// The interner is append-only; it never forgets a name, so an [`Id`] stays
/// valid for the lifetime of the process.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Errors raised when constructing an [`Id`] from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("element name must not be empty")]
    Empty,
}

/// An interned element name.
///
/// # Examples
///
/// ```
/// use masala_core::identifier::Id;
///
/// let user = Id::new("User");
/// assert_eq!(user, "User");
/// assert_eq!(user, Id::new("User"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a name, interning it if needed.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates an `Id`, rejecting empty names.
    ///
    /// Used at the deserialization boundary where a blank name means the
    /// upstream document is malformed.
    pub fn try_new(name: &str) -> Result<Self, IdError> {
        if name.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self::new(name))
    }

    /// Returns an owned copy of the name.
    pub fn to_name(&self) -> String {
        self.to_string()
    }

    /// Returns the first character of the name, if any.
    pub fn first_char(&self) -> Option<char> {
        interner()
            .resolve(self.0)
            .and_then(|name| name.chars().next())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner.resolve(self.0).unwrap_or_default();
        f.write_str(name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Id::try_new(&name).map_err(de::Error::custom)
    }
}
