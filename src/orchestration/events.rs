// Copyright (c) 2024 Mike Tsao

use super::{FileRecord, TransportPosition, TransportState};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use thiserror::Error;

/// The channels an [EventBus] can carry. A channel has to be allowed on the
/// bus before anyone can emit on it or listen to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum Channel {
    #[allow(missing_docs)]
    #[strum(serialize = "error")]
    Error,
    #[allow(missing_docs)]
    #[strum(serialize = "changed")]
    Changed,
    #[allow(missing_docs)]
    #[strum(serialize = "transport:start")]
    TransportStart,
    #[allow(missing_docs)]
    #[strum(serialize = "transport:stop")]
    TransportStop,
    #[allow(missing_docs)]
    #[strum(serialize = "transport:pause")]
    TransportPause,
    #[allow(missing_docs)]
    #[strum(serialize = "transport:loop")]
    TransportLoop,
    #[allow(missing_docs)]
    #[strum(serialize = "transport:position")]
    TransportPosition,
    #[allow(missing_docs)]
    #[strum(serialize = "file:selected")]
    FileSelected,
    #[allow(missing_docs)]
    #[strum(serialize = "file:created")]
    FileCreated,
    #[allow(missing_docs)]
    #[strum(serialize = "file:destroyed")]
    FileDestroyed,
    #[allow(missing_docs)]
    #[strum(serialize = "file:updated")]
    FileUpdated,
    #[allow(missing_docs)]
    #[strum(serialize = "composer:parsing")]
    ComposerParsing,
    #[allow(missing_docs)]
    #[strum(serialize = "composer:parsed")]
    ComposerParsed,
    #[allow(missing_docs)]
    #[strum(serialize = "composer:rendering")]
    ComposerRendering,
    #[allow(missing_docs)]
    #[strum(serialize = "composer:rendered")]
    ComposerRendered,
}

/// Something that happened, with whatever data goes along with it. Each
/// variant travels on exactly one [Channel].
#[derive(Debug, Clone)]
pub enum Event {
    /// An action failed. `message` is stable and human-readable; `cause` is
    /// the error that caused it.
    Error {
        #[allow(missing_docs)]
        message: String,
        #[allow(missing_docs)]
        cause: Arc<anyhow::Error>,
    },
    /// Whether the active file differs from the last rendered source.
    Changed(bool),
    #[allow(missing_docs)]
    TransportStart(TransportState),
    #[allow(missing_docs)]
    TransportStop(TransportState),
    #[allow(missing_docs)]
    TransportPause(TransportState),
    #[allow(missing_docs)]
    TransportLoop(TransportState),
    #[allow(missing_docs)]
    TransportPosition(TransportPosition),
    #[allow(missing_docs)]
    FileSelected(FileRecord),
    #[allow(missing_docs)]
    FileCreated(FileRecord),
    #[allow(missing_docs)]
    FileDestroyed(FileRecord),
    #[allow(missing_docs)]
    FileUpdated(FileRecord),
    #[allow(missing_docs)]
    ComposerParsing,
    #[allow(missing_docs)]
    ComposerParsed,
    #[allow(missing_docs)]
    ComposerRendering,
    #[allow(missing_docs)]
    ComposerRendered,
}
impl Event {
    /// The channel this event travels on.
    pub fn channel(&self) -> Channel {
        match self {
            Event::Error { .. } => Channel::Error,
            Event::Changed(_) => Channel::Changed,
            Event::TransportStart(_) => Channel::TransportStart,
            Event::TransportStop(_) => Channel::TransportStop,
            Event::TransportPause(_) => Channel::TransportPause,
            Event::TransportLoop(_) => Channel::TransportLoop,
            Event::TransportPosition(_) => Channel::TransportPosition,
            Event::FileSelected(_) => Channel::FileSelected,
            Event::FileCreated(_) => Channel::FileCreated,
            Event::FileDestroyed(_) => Channel::FileDestroyed,
            Event::FileUpdated(_) => Channel::FileUpdated,
            Event::ComposerParsing => Channel::ComposerParsing,
            Event::ComposerParsed => Channel::ComposerParsed,
            Event::ComposerRendering => Channel::ComposerRendering,
            Event::ComposerRendered => Channel::ComposerRendered,
        }
    }

    /// Wraps an error for the [Channel::Error] channel.
    pub fn error(message: &str, cause: anyhow::Error) -> Self {
        Event::Error {
            message: message.to_string(),
            cause: Arc::new(cause),
        }
    }
}

/// Someone used a channel that was never allowed on the bus.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Unregistered event name \"{0}\"")]
pub struct UnregisteredEventError(pub Channel);

/// A function that receives events.
pub type Listener = Box<dyn FnMut(&Event) + Send>;

/// A synchronous publish/subscribe registry. Listeners on a channel are called
/// in the order they were added.
#[derive(Default)]
pub struct EventBus {
    listeners: FxHashMap<Channel, Vec<Listener>>,
}
impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("channels", &self.listeners.len())
            .finish()
    }
}
impl EventBus {
    /// A bus with every [Channel] allowed.
    pub fn new_with_all_channels() -> Self {
        let mut r = Self::default();
        Channel::iter().for_each(|c| r.allow(c));
        r
    }

    /// Makes `channel` usable. Allowing a channel twice keeps its listeners.
    pub fn allow(&mut self, channel: Channel) {
        self.listeners.entry(channel).or_default();
    }

    #[allow(missing_docs)]
    pub fn is_allowed(&self, channel: Channel) -> bool {
        self.listeners.contains_key(&channel)
    }

    /// Adds a listener to `channel`.
    pub fn on<F>(&mut self, channel: Channel, f: F) -> Result<(), UnregisteredEventError>
    where
        F: FnMut(&Event) + Send + 'static,
    {
        let Some(listeners) = self.listeners.get_mut(&channel) else {
            return Err(UnregisteredEventError(channel));
        };
        listeners.push(Box::new(f));
        Ok(())
    }

    /// Calls every listener on the event's channel, in registration order,
    /// before returning.
    pub fn emit(&mut self, event: &Event) -> Result<(), UnregisteredEventError> {
        let channel = event.channel();
        let Some(listeners) = self.listeners.get_mut(&channel) else {
            return Err(UnregisteredEventError(channel));
        };
        log::debug!("emit {channel} to {} listener(s)", listeners.len());
        listeners.iter_mut().for_each(|l| l(event));
        Ok(())
    }
}
