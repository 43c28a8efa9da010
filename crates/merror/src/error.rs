//! Error types for reflective member access

use std::fmt;

/// Result type for reflector calls
pub type ReflectResult<T> = Result<T, ReflectError>;

/// Kind of member a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Field (static or instance)
    Field,
    /// Property (static or instance)
    Property,
    /// Method (static or instance)
    Method,
    /// Constructor
    Constructor,
    /// Indexer
    Indexer,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemberKind::Field => "field",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
            MemberKind::Constructor => "constructor",
            MemberKind::Indexer => "indexer",
        };
        f.write_str(s)
    }
}

/// Reflective access error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectError {
    /// A required input was absent or invalid
    #[error("Argument error: {0}")]
    InvalidArgument(String),

    /// Named type is not registered in the assembly
    #[error("Type not found: {name} in assembly {assembly}")]
    TypeNotFound {
        /// Full type name that was requested
        name: String,
        /// Assembly the lookup ran against
        assembly: String,
    },

    /// No member matches the name, scope and signature
    #[error("Member not found: {kind} {name} on {ty}")]
    MemberNotFound {
        /// What kind of member was requested
        kind: MemberKind,
        /// Member name, with the signature for callable members
        name: String,
        /// Full name of the bound type
        ty: String,
    },

    /// Value does not convert to the declared type
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Property has no setter
    #[error("Property {name} on {ty} is read-only")]
    ReadOnly {
        /// Property name
        name: String,
        /// Full name of the bound type
        ty: String,
    },

    /// The target member itself failed
    #[error("Invocation failed: {0}")]
    Invocation(String),
}

impl ReflectError {
    /// Failure raised from inside a registered member
    pub fn invocation(msg: impl Into<String>) -> Self {
        ReflectError::Invocation(msg.into())
    }

    pub(crate) fn mismatch(expected: impl fmt::Display, got: impl fmt::Display) -> Self {
        ReflectError::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}
