// Copyright (c) 2024 Mike Tsao

//! System utilities.

/// Commonly used imports.
pub mod prelude {
    pub use super::{new_file_name, Rng, Settings};
}

pub use names::new_file_name;
pub use rng::Rng;
pub use settings::Settings;

mod names;
mod rng;
mod settings;
