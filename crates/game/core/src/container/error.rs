//! Container operation errors.

use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::item::ItemId;

use super::Signature;

/// Reason a candidate cannot be inserted into a container.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum FitViolation {
    /// A container cannot hold itself.
    #[error("a container cannot hold itself")]
    SelfInsertion,

    /// The candidate already holds the container, directly or transitively.
    #[error("candidate already holds the container")]
    Cycle,

    /// The container already holds its maximum number of direct children.
    #[error("count limit reached (max: {max})")]
    Count {
        /// Maximum number of direct children.
        max: usize,
    },

    /// Inserting would exceed the weight limit.
    #[error("weight limit exceeded (max: {max}, required: {required})")]
    Weight {
        /// Maximum contents weight.
        max: f32,
        /// Contents weight after insertion.
        required: f32,
    },

    /// Inserting would exceed the volume limit.
    #[error("volume limit exceeded (max: {max}, required: {required})")]
    Volume {
        /// Maximum contents volume.
        max: f32,
        /// Contents volume after insertion.
        required: f32,
    },
}

impl FitViolation {
    /// True for violations that would break the tree shape rather than a limit.
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::SelfInsertion | Self::Cycle)
    }
}

/// Errors raised by [`ItemArena`](super::ItemArena) operations.
///
/// Benign outcomes (an item already held elsewhere, an item absent from a subtree) are
/// reported as `Ok(false)` and never appear here.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContainerError {
    /// Handle does not belong to this arena.
    #[error("unknown item {item}")]
    UnknownItem {
        /// The dangling handle.
        item: ItemId,
    },

    /// A container operation was applied to a plain item.
    #[error("item {item} is not a container")]
    NotAContainer {
        /// The plain item.
        item: ItemId,
    },

    /// An item spec carried a negative or NaN measure.
    #[error("invalid {field} {value} for item '{name}'")]
    InvalidMeasure {
        /// Name of the rejected item.
        name: String,
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f32,
    },

    /// The item failed the container's fit check.
    #[error("item {item} does not fit into {container}: {violation}")]
    DoesNotFit {
        /// Target container.
        container: ItemId,
        /// Rejected item.
        item: ItemId,
        /// What was violated.
        violation: FitViolation,
    },

    /// The arena already holds as many items as [`ItemId`] can address.
    #[error("item arena is full ({} items)", u32::MAX as u64 + 1)]
    ArenaFull,

    /// The subtree changed while a traversal over it was in progress.
    #[error("container {container} was modified during traversal (expected {expected}, found {found})")]
    ConcurrentModification {
        /// Root of the traversal.
        container: ItemId,
        /// Signature captured when the traversal started.
        expected: Signature,
        /// Signature observed before the failing step.
        found: Signature,
    },
}

impl ContainerError {
    pub(crate) fn unknown(item: ItemId) -> Self {
        Self::UnknownItem { item }
    }

    pub(crate) fn not_a_container(item: ItemId) -> Self {
        Self::NotAContainer { item }
    }
}

impl GameError for ContainerError {
    fn severity(&self) -> ErrorSeverity {
        use ContainerError::*;
        match self {
            UnknownItem { .. } | NotAContainer { .. } | InvalidMeasure { .. } => {
                ErrorSeverity::Validation
            }
            DoesNotFit { violation, .. } if violation.is_structural() => {
                ErrorSeverity::Validation
            }
            DoesNotFit { .. } => ErrorSeverity::Recoverable,
            ArenaFull | ConcurrentModification { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        use ContainerError::*;
        let context = match self {
            UnknownItem { item } => ErrorContext::new()
                .with_item(*item)
                .with_message("handle from another arena"),
            NotAContainer { item } => ErrorContext::new().with_item(*item),
            InvalidMeasure { .. } | ArenaFull => return None,
            DoesNotFit {
                container, item, ..
            } => ErrorContext::new()
                .with_container(*container)
                .with_item(*item),
            ConcurrentModification { container, .. } => ErrorContext::new()
                .with_container(*container)
                .with_message("structural change during traversal"),
        };
        Some(context)
    }

    fn error_code(&self) -> &'static str {
        use ContainerError::*;
        match self {
            UnknownItem { .. } => "CONTAINER_UNKNOWN_ITEM",
            NotAContainer { .. } => "CONTAINER_NOT_A_CONTAINER",
            InvalidMeasure { .. } => "CONTAINER_INVALID_MEASURE",
            DoesNotFit { violation, .. } => match violation {
                FitViolation::SelfInsertion | FitViolation::Cycle => "CONTAINER_CYCLE",
                FitViolation::Count { .. }
                | FitViolation::Weight { .. }
                | FitViolation::Volume { .. } => "CONTAINER_CAPACITY_EXCEEDED",
            },
            ArenaFull => "CONTAINER_ARENA_FULL",
            ConcurrentModification { .. } => "CONTAINER_CONCURRENT_MODIFICATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_and_cycle_violations_are_classified_apart() {
        let capacity = ContainerError::DoesNotFit {
            container: ItemId(0),
            item: ItemId(1),
            violation: FitViolation::Count { max: 10 },
        };
        let cycle = ContainerError::DoesNotFit {
            container: ItemId(1),
            item: ItemId(0),
            violation: FitViolation::Cycle,
        };

        assert_eq!(capacity.error_code(), "CONTAINER_CAPACITY_EXCEEDED");
        assert!(capacity.severity().is_recoverable());
        assert_eq!(cycle.error_code(), "CONTAINER_CYCLE");
        assert_eq!(cycle.severity(), ErrorSeverity::Validation);
        assert_eq!(
            capacity.context().and_then(|context| context.item),
            Some(ItemId(1))
        );
    }

    #[test]
    fn concurrent_modification_is_internal() {
        let error = ContainerError::ConcurrentModification {
            container: ItemId(3),
            expected: Signature::default(),
            found: Signature {
                changes: 1,
                latest: 1,
            },
        };
        assert!(error.severity().is_internal());
        assert!(error.to_string().contains("#3"));
    }

    #[test]
    fn full_arena_is_internal() {
        let error = ContainerError::ArenaFull;
        assert_eq!(error.error_code(), "CONTAINER_ARENA_FULL");
        assert!(error.severity().is_internal());
        assert_eq!(error.context(), None);
        assert_eq!(error.to_string(), "item arena is full (4294967296 items)");
    }
}
