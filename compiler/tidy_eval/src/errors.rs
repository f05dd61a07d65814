//! Error types and constructors for evaluation.
//!
//! `EvalErrorKind` carries the structured category; the `#[cold]` factory
//! functions below are the public way to build errors, so message wording
//! lives in one place.

use std::fmt;

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Access
    #[error("object `{name}` not found")]
    UndefinedVariable { name: String },
    #[error("could not find function `{name}`")]
    UndefinedFunction { name: String },
    #[error("{type_name} is not callable")]
    NotCallable { type_name: String },

    // Type/Operator
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("`{name}` expects {expected}, got {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    // Recursion
    #[error("maximum recursion depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },

    // Data masks
    #[error("{message}")]
    NotFoundInData { message: String },
    #[error("{message}")]
    InvalidDataMask { message: String },
    #[error("tilde evaluation requires a live data mask, but the mask was dropped")]
    MaskDropped,

    // Scope chain
    #[error("re-parenting would make an environment its own ancestor")]
    CyclicScope,
    #[error("overscope top is not an ancestor of the overscope")]
    NotAnAncestor,
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    kind: EvalErrorKind,
}

impl EvalError {
    /// Wrap a structured kind.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind }
    }

    /// The structured category.
    pub fn kind(&self) -> &EvalErrorKind {
        &self.kind
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Access Errors

/// Symbol not bound anywhere on the scope chain.
#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

/// No callable binding for the call's head symbol.
#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

/// Callee resolved to something that cannot be applied.
#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

// Type/Operator Errors

/// Value had an unexpected type.
#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Wrong number of arguments for a primitive.
#[cold]
pub fn wrong_arg_count(name: &str, expected: &str, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got,
    })
}

// Arithmetic Errors

/// Integer division by zero.
#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// Checked integer arithmetic overflowed.
#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

/// Recursion limit of a restricted evaluation mode was hit.
#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}

// Data Mask Errors

/// Data pronoun lookup failed. `template` contains one `%s` for the name.
#[cold]
pub fn not_found_in_data(template: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotFoundInData {
        message: template.replacen("%s", name, 1),
    })
}

/// Data mask construction rejected its input.
#[cold]
pub fn invalid_data_mask(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidDataMask {
        message: message.into(),
    })
}

/// The mask a `~` thunk belongs to no longer exists.
#[cold]
pub fn mask_dropped() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MaskDropped)
}

// Scope Chain Errors

/// Re-parenting would introduce a cycle.
#[cold]
pub fn cyclic_scope() -> EvalError {
    EvalError::from_kind(EvalErrorKind::CyclicScope)
}

/// The rewiring point is not on the overscope's chain.
#[cold]
pub fn not_an_ancestor() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnAncestor)
}

#[cfg(test)]
mod tests;
