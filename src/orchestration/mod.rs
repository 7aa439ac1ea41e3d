// Copyright (c) 2024 Mike Tsao

//! Coordination of rendering, playback, files, and the events that report on
//! all of them.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        AudioDriver, Channel, Event, FileRecord, MemoryWorkspace, Orchestrator,
        OrchestratorState, SilentAudioDriver, TransportPosition, TransportState, Workspace,
    };
}

pub use {
    driver::{AudioDriver, SilentAudioDriver, TransportEvent, TransportPosition, TransportState},
    events::{Channel, Event, EventBus, Listener, UnregisteredEventError},
    orchestrator::{Orchestrator, OrchestratorState},
    workspace::{FileRecord, MemoryWorkspace, Workspace},
};

mod driver;
mod events;
mod orchestrator;
mod workspace;
