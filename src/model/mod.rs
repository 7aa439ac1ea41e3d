// Copyright (c) 2024 Mike Tsao

//! The entity model: instruments, effects, and the other named things that
//! composers build, the collections that hold them, and the patches that
//! connect them.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        BuildFn, Collection, Demo, Effect, EngineNode, EngineNodeBuilder, Instrument,
        LibraryModel, Patch, PatchBay, Patches, SessionModel, Snippet, Template, Track,
    };
}

pub use {
    collection::Collection,
    library::LibraryModel,
    nodes::{
        BuildFn, BuildFnSignature, Effect, EffectBuilder, EngineNode, EngineNodeBuilder,
        EngineParameter, Instrument, InstrumentBuilder, Track, TrackBuilder,
    },
    patch::{Patch, PatchBay, Patches},
    records::{Demo, DemoBuilder, Snippet, SnippetBuilder, Template, TemplateBuilder},
    session::SessionModel,
};

mod collection;
mod library;
mod nodes;
mod patch;
mod records;
mod session;
