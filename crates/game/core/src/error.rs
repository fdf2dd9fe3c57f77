//! Common error infrastructure for pathminder-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g. [`ContainerError`](crate::container::ContainerError)) are
//! defined alongside the operations that raise them.
//!
//! # Design Principles
//!
//! - **Expected negatives are not errors**: an item that is already held somewhere or is
//!   absent from a subtree is reported as `Ok(false)`, never as `Err`
//! - **Contract violations are errors**: dangling handles, over-capacity insertion and
//!   mutation during a traversal surface as typed errors
//! - **Severity Classification**: errors are categorized for recovery strategies

use crate::item::ItemId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller may retry with a different request.
    ///
    /// Examples: item does not fit into the chosen container
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown item handle, negative weight
    Validation,

    /// Internal error - misuse of the API detected at runtime.
    ///
    /// Examples: container mutated while a traversal over it was in flight
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a programming error.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Container the operation was applied to (if applicable).
    pub container: Option<ItemId>,

    /// Item the operation was about (if applicable).
    pub item: Option<ItemId>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            container: None,
            item: None,
            message: None,
        }
    }

    /// Attaches a container to this context (builder pattern).
    #[must_use]
    pub const fn with_container(mut self, container: ItemId) -> Self {
        self.container = Some(container);
        self
    }

    /// Attaches an item to this context (builder pattern).
    #[must_use]
    pub const fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all pathminder errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<ErrorContext> {
        None
    }

    /// Returns a stable identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_internal_errors_are_programming_errors() {
        let all = [
            ErrorSeverity::Recoverable,
            ErrorSeverity::Validation,
            ErrorSeverity::Internal,
        ];
        let names: Vec<&str> = all.iter().map(ErrorSeverity::as_str).collect();
        assert_eq!(names, ["recoverable", "validation", "internal"]);

        let internal: Vec<ErrorSeverity> = all.into_iter().filter(|s| s.is_internal()).collect();
        assert_eq!(internal, [ErrorSeverity::Internal]);
        assert!(ErrorSeverity::Recoverable.is_recoverable());
    }
}
