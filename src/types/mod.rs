// Copyright (c) 2024 Mike Tsao

//! Common data types used throughout the system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{ComposerError, EngineKey, FileUid, PatchType, UidFactory};
}

pub use {
    errors::ComposerError,
    keys::{EngineKey, PatchType},
    uid::{FileUid, IsUid, UidFactory},
};

mod errors;
mod keys;
mod uid;
