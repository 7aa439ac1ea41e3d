// Copyright (c) 2024 Mike Tsao

use crate::render::RenderedNode;
use crossbeam::channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Where the transport is within the piece.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransportPosition {
    #[allow(missing_docs)]
    pub measure: u32,
    #[allow(missing_docs)]
    pub beat: u32,
    #[allow(missing_docs)]
    pub subdivision: u32,
}
impl TransportPosition {
    /// The start of the piece.
    pub const ZERO: Self = Self {
        measure: 0,
        beat: 0,
        subdivision: 0,
    };
}

/// What the transport is doing.
#[derive(Debug, Default, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TransportState {
    #[allow(missing_docs)]
    #[default]
    Stopped,
    #[allow(missing_docs)]
    Playing,
    #[allow(missing_docs)]
    Paused,
}

/// Things the transport reports on its own. Each carries the transport's
/// state at the moment it happened.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum TransportEvent {
    #[allow(missing_docs)]
    Start(TransportState),
    #[allow(missing_docs)]
    Stop(TransportState),
    #[allow(missing_docs)]
    Pause(TransportState),
    /// The transport wrapped around to the start of its loop.
    Loop(TransportState),
}

/// The boundary between the orchestrator and whatever actually makes sound.
pub trait AudioDriver: core::fmt::Debug + Send {
    /// Prepares an audio buffer. The orchestrator holds it for as long as a
    /// rendered session is live.
    fn start_audio_buffer(&mut self) -> anyhow::Result<()>;

    /// Gives the buffer back. Harmless if there isn't one.
    fn release_audio_buffer(&mut self);

    /// Whether a buffer is currently held.
    fn has_audio_buffer(&self) -> bool;

    /// Replaces the engine's node graph.
    fn load_graph(&mut self, nodes: &[RenderedNode]) -> anyhow::Result<()>;

    #[allow(missing_docs)]
    fn play(&mut self) -> anyhow::Result<()>;
    #[allow(missing_docs)]
    fn pause(&mut self) -> anyhow::Result<()>;
    #[allow(missing_docs)]
    fn stop(&mut self) -> anyhow::Result<()>;

    /// The transport's current state.
    fn state(&self) -> TransportState;

    /// The receiving end of the transport's own events.
    fn transport_events(&self) -> &Receiver<TransportEvent>;

    /// Starts reporting positions on a new channel.
    fn observe_position(&mut self) -> Receiver<TransportPosition>;
}

/// An [AudioDriver] that makes no sound. It does what it's told and keeps
/// count, which makes it useful for tests.
#[derive(Debug)]
pub struct SilentAudioDriver {
    state: TransportState,
    has_buffer: bool,
    buffers_started: usize,
    buffers_released: usize,
    graph: Vec<RenderedNode>,
    position: TransportPosition,
    fail_next_start: bool,

    sender: Sender<TransportEvent>,
    receiver: Receiver<TransportEvent>,
    position_senders: Vec<Sender<TransportPosition>>,
}
impl Default for SilentAudioDriver {
    fn default() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            state: Default::default(),
            has_buffer: Default::default(),
            buffers_started: Default::default(),
            buffers_released: Default::default(),
            graph: Default::default(),
            position: Default::default(),
            fail_next_start: Default::default(),
            sender,
            receiver,
            position_senders: Default::default(),
        }
    }
}
impl SilentAudioDriver {
    #[allow(missing_docs)]
    pub fn buffers_started(&self) -> usize {
        self.buffers_started
    }

    #[allow(missing_docs)]
    pub fn buffers_released(&self) -> usize {
        self.buffers_released
    }

    /// The most recently loaded graph.
    pub fn graph(&self) -> &[RenderedNode] {
        &self.graph
    }

    /// Makes the next [AudioDriver::start_audio_buffer()] fail.
    pub fn fail_next_start(&mut self) {
        self.fail_next_start = true;
    }

    /// Moves the transport to `position` and tells every observer. Observers
    /// that went away are forgotten.
    pub fn advance_to(&mut self, position: TransportPosition) {
        self.position = position;
        self.position_senders
            .retain(|sender| sender.send(position).is_ok());
    }

    /// Wraps the transport back to the start of its loop.
    pub fn loop_around(&mut self) {
        self.advance_to(TransportPosition::ZERO);
        self.send(TransportEvent::Loop(self.state));
    }

    /// The last position reported.
    pub fn position(&self) -> TransportPosition {
        self.position
    }

    fn send(&self, event: TransportEvent) {
        // The receiver lives in this struct, so the send can't fail.
        let _ = self.sender.send(event);
    }
}
impl AudioDriver for SilentAudioDriver {
    fn start_audio_buffer(&mut self) -> anyhow::Result<()> {
        if self.fail_next_start {
            self.fail_next_start = false;
            return Err(anyhow::anyhow!("no audio device available"));
        }
        self.has_buffer = true;
        self.buffers_started += 1;
        Ok(())
    }

    fn release_audio_buffer(&mut self) {
        if self.has_buffer {
            self.has_buffer = false;
            self.buffers_released += 1;
        }
    }

    fn has_audio_buffer(&self) -> bool {
        self.has_buffer
    }

    fn load_graph(&mut self, nodes: &[RenderedNode]) -> anyhow::Result<()> {
        if !self.has_buffer {
            return Err(anyhow::anyhow!("can't load a graph without an audio buffer"));
        }
        self.graph = nodes.to_vec();
        Ok(())
    }

    fn play(&mut self) -> anyhow::Result<()> {
        self.state = TransportState::Playing;
        self.send(TransportEvent::Start(self.state));
        Ok(())
    }

    fn pause(&mut self) -> anyhow::Result<()> {
        self.state = TransportState::Paused;
        self.send(TransportEvent::Pause(self.state));
        Ok(())
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        self.state = TransportState::Stopped;
        self.position = TransportPosition::ZERO;
        self.send(TransportEvent::Stop(self.state));
        Ok(())
    }

    fn state(&self) -> TransportState {
        self.state
    }

    fn transport_events(&self) -> &Receiver<TransportEvent> {
        &self.receiver
    }

    fn observe_position(&mut self) -> Receiver<TransportPosition> {
        let (sender, receiver) = unbounded();
        self.position_senders.push(sender);
        receiver
    }
}
