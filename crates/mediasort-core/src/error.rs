//! Validation errors surfaced by the input form.

use thiserror::Error;

/// A form submission that cannot start a migration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Source or destination was left empty.
    #[error("source and destination paths are required")]
    MissingPaths,

    /// A field contains a sequence the preset store uses as a delimiter.
    #[error("{field} cannot contain '{sequence}'")]
    ReservedSequence {
        field: &'static str,
        sequence: &'static str,
    },

    /// A preset with this name is already stored.
    #[error("a preset named '{name}' already exists")]
    DuplicateName { name: String },
}
