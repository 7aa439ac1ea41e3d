// Copyright (c) 2024 Mike Tsao

//! The errors that composition can produce.

use derive_builder::UninitializedFieldError;
use thiserror::Error;

/// Everything that can go wrong while a composer builds a model.
///
/// Public operations return [anyhow::Result], so an error raised by an author's
/// function passes through unchanged. Use `downcast_ref::<ComposerError>()` to
/// tell these variants apart from author errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposerError {
    /// A declared property was missing or had an unacceptable value.
    #[error("invalid {kind}: property `{property}` {reason}")]
    Validation {
        /// The kind of entity being built, such as "instrument".
        kind: &'static str,
        /// The name of the offending property.
        property: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A collection already holds an entity with this name.
    #[error("{kind} named '{name}' already exists")]
    DuplicateName {
        /// The kind of entity the collection holds.
        kind: &'static str,
        /// The name that collided.
        name: String,
    },

    /// The DSL verb exists but has no implementation yet.
    #[error("{verb}() is not implemented")]
    NotImplemented {
        /// The verb that was called, such as "track".
        verb: &'static str,
    },

    /// A general authoring mistake, such as referring to an entity that
    /// doesn't exist.
    #[error("{0}")]
    Authoring(String),
}
impl ComposerError {
    pub(crate) fn missing(kind: &'static str, property: &'static str) -> Self {
        Self::Validation {
            kind,
            property,
            reason: "is required".to_string(),
        }
    }
}
impl From<UninitializedFieldError> for ComposerError {
    fn from(e: UninitializedFieldError) -> Self {
        Self::missing("entity", e.field_name())
    }
}
