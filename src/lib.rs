// Copyright (c) 2024 Mike Tsao

#![warn(missing_docs)]
#![deny(unused_imports, unused_variables)]
#![allow(rustdoc::private_intra_doc_links)]

//! Harmonicon turns declarative composition functions into a graph of
//! connected instruments and effects, and then into instructions for an audio
//! engine.
//!
//! * Compose a reusable [LibraryModel](model::LibraryModel) with [library()],
//! or a [SessionModel](model::SessionModel) with [session()].
//! * Describe a session as a JSON [Score](render::Score) and [render()] it
//! against a set of libraries, such as the built-in
//! [CoreLibrary](catalog::CoreLibrary).
//! * Let an [Orchestrator] manage files, rendering, and playback, and listen
//! for the [Event](orchestration::Event)s it emits.

/// A collection of imports that are useful to users of this crate. `use
/// harmonicon::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        catalog::CoreLibrary, composition::prelude::*, model::prelude::*,
        orchestration::prelude::*, render::prelude::*, traits::prelude::*, types::prelude::*,
        util::prelude::*,
    };
}

// Fundamental structures that are important enough to re-export at top level.
pub use {
    composition::{library, session},
    orchestration::Orchestrator,
    render::render,
};

pub mod catalog;
pub mod composition;
pub mod model;
pub mod orchestration;
pub mod render;
pub mod traits;
pub mod types;
pub mod util;
