// Copyright (c) 2024 Mike Tsao

//! Runs a harmonicon [Orchestrator](harmonicon::Orchestrator) on its own
//! thread, driven by crossbeam channels.

#![deny(missing_docs)]

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        CrossbeamChannel, OrchestratorService, OrchestratorServiceEvent,
        OrchestratorServiceInput, ProvidesService,
    };
}

pub use orchestrator::{OrchestratorService, OrchestratorServiceEvent, OrchestratorServiceInput};
pub use traits::ProvidesService;
pub use types::CrossbeamChannel;

mod orchestrator;
mod traits;
mod types;
