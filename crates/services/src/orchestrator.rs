// Copyright (c) 2024 Mike Tsao

use crate::{CrossbeamChannel, ProvidesService};
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use harmonicon::{orchestration::Channel, prelude::*, types::FileUid};
use std::time::Duration;
use strum::IntoEnumIterator;

#[allow(missing_docs)]
#[derive(Debug)]
pub enum OrchestratorServiceInput {
    AddFile,
    DestroyFile(FileUid),
    Pause,
    Play,
    Render,
    Save,
    SelectFile(FileUid),
    ServiceQuit,
    SetFileSource(String),
    Stop,
}

#[allow(missing_docs)]
#[derive(Debug)]
pub enum OrchestratorServiceEvent {
    /// Something the orchestrator emitted.
    Event(Event),
    Quit,
}

/// A wrapper around an [Orchestrator] that provides a channel-based interface
/// to it. The orchestrator lives on the service's thread.
#[derive(Debug)]
pub struct OrchestratorService {
    inputs: CrossbeamChannel<OrchestratorServiceInput>,
    events: CrossbeamChannel<OrchestratorServiceEvent>,
}
impl ProvidesService<OrchestratorServiceInput, OrchestratorServiceEvent>
    for OrchestratorService
{
    fn sender(&self) -> &Sender<OrchestratorServiceInput> {
        &self.inputs.sender
    }

    fn receiver(&self) -> &Receiver<OrchestratorServiceEvent> {
        &self.events.receiver
    }
}
impl OrchestratorService {
    /// How often the service relays transport events when it's otherwise idle.
    pub const TRANSPORT_POLL_INTERVAL: Duration = Duration::from_millis(20);

    /// Moves `orchestrator` onto a new thread and starts serving it.
    pub fn new_with<D, W>(orchestrator: Orchestrator<D, W>) -> Self
    where
        D: AudioDriver + 'static,
        W: Workspace + 'static,
    {
        let r = Self {
            inputs: Default::default(),
            events: Default::default(),
        };
        r.spawn_thread(orchestrator);
        r
    }

    fn spawn_thread<D, W>(&self, orchestrator: Orchestrator<D, W>)
    where
        D: AudioDriver + 'static,
        W: Workspace + 'static,
    {
        let receiver = self.inputs.receiver.clone();
        let sender = self.events.sender.clone();
        std::thread::spawn(move || {
            let mut daemon = OrchestratorServiceDaemon::new_with(receiver, sender, orchestrator);
            daemon.execute();
        });
    }
}

struct OrchestratorServiceDaemon<D: AudioDriver, W: Workspace> {
    receiver: Receiver<OrchestratorServiceInput>,
    sender: Sender<OrchestratorServiceEvent>,
    orchestrator: Orchestrator<D, W>,
}
impl<D: AudioDriver, W: Workspace> OrchestratorServiceDaemon<D, W> {
    fn new_with(
        receiver: Receiver<OrchestratorServiceInput>,
        sender: Sender<OrchestratorServiceEvent>,
        mut orchestrator: Orchestrator<D, W>,
    ) -> Self {
        for channel in Channel::iter() {
            let sender = sender.clone();
            let result = orchestrator.on(channel, move |event| {
                let _ = sender.send(OrchestratorServiceEvent::Event(event.clone()));
            });
            if let Err(e) = result {
                log::error!("{e}");
            }
        }
        Self {
            receiver,
            sender,
            orchestrator,
        }
    }

    fn execute(&mut self) {
        loop {
            match self
                .receiver
                .recv_timeout(OrchestratorService::TRANSPORT_POLL_INTERVAL)
            {
                Ok(input) => {
                    if !self.handle_input(input) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            self.orchestrator.dispatch_transport_events();
        }
    }

    // Returns false when the service should shut down.
    fn handle_input(&mut self, input: OrchestratorServiceInput) -> bool {
        log::debug!("{input:?}");
        match input {
            OrchestratorServiceInput::AddFile => self.orchestrator.add_file(),
            OrchestratorServiceInput::DestroyFile(uid) => self.orchestrator.destroy_file(uid),
            OrchestratorServiceInput::Pause => self.orchestrator.pause(),
            OrchestratorServiceInput::Play => self.orchestrator.play(),
            OrchestratorServiceInput::Render => self.orchestrator.render(),
            OrchestratorServiceInput::Save => self.orchestrator.save(),
            OrchestratorServiceInput::SelectFile(uid) => self.orchestrator.select_file(uid),
            OrchestratorServiceInput::SetFileSource(source) => {
                self.orchestrator.set_file_source(&source)
            }
            OrchestratorServiceInput::Stop => self.orchestrator.stop(),
            OrchestratorServiceInput::ServiceQuit => {
                let _ = self.sender.send(OrchestratorServiceEvent::Quit);
                return false;
            }
        }
        true
    }
}
