// Copyright (c) 2024 Mike Tsao

use super::{
    AudioDriver, Channel, Event, EventBus, FileRecord, TransportEvent, TransportPosition,
    UnregisteredEventError, Workspace,
};
use crate::{
    catalog::CoreLibrary,
    prelude::*,
    render::{render_score, Rendered, Score},
};
use anyhow::anyhow;
use crossbeam::channel::Receiver;
use strum_macros::Display;

/// Where the [Orchestrator] is in its render/playback cycle.
#[derive(Debug, Default, Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum OrchestratorState {
    #[default]
    Idle,
    Parsing,
    Parsed,
    Rendering,
    Rendered,
    Playing,
    Paused,
    Stopped,
}

/// [Orchestrator] coordinates everything between a file's source code and the
/// sound coming out of the driver. It composes and renders the active file
/// when needed, runs the transport, and manages the workspace's files.
///
/// Public actions never return errors. A failed action emits exactly one
/// [Event::Error] with a stable message and the underlying cause.
#[derive(Debug)]
pub struct Orchestrator<D: AudioDriver, W: Workspace> {
    settings: Settings,
    libraries: Vec<LibraryModel>,
    driver: D,
    workspace: W,
    bus: EventBus,
    rng: Rng,

    state: OrchestratorState,
    active_file: Option<FileUid>,
    rendered_source: Option<String>,
    rendered: Option<Rendered>,
    positions: Option<Receiver<TransportPosition>>,
}
impl<D: AudioDriver, W: Workspace> Orchestrator<D, W> {
    /// Creates an orchestrator that composes scores from `libraries`.
    pub fn new_with(
        settings: Settings,
        libraries: Vec<LibraryModel>,
        driver: D,
        workspace: W,
    ) -> Self {
        Self {
            settings,
            libraries,
            driver,
            workspace,
            bus: EventBus::new_with_all_channels(),
            rng: Default::default(),
            state: Default::default(),
            active_file: Default::default(),
            rendered_source: Default::default(),
            rendered: Default::default(),
            positions: Default::default(),
        }
    }

    /// Creates an orchestrator with default settings and the `core` library.
    pub fn new_with_core(driver: D, workspace: W) -> anyhow::Result<Self> {
        let core = CoreLibrary::compose()?.into_model();
        Ok(Self::new_with(Settings::default(), vec![core], driver, workspace))
    }

    /// Adds a listener to `channel`.
    pub fn on<F>(&mut self, channel: Channel, f: F) -> Result<(), UnregisteredEventError>
    where
        F: FnMut(&Event) + Send + 'static,
    {
        self.bus.on(channel, f)
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    #[allow(missing_docs)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[allow(missing_docs)]
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    #[allow(missing_docs)]
    pub fn libraries(&self) -> &[LibraryModel] {
        &self.libraries
    }

    #[allow(missing_docs)]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    #[allow(missing_docs)]
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    #[allow(missing_docs)]
    pub fn workspace(&self) -> &W {
        &self.workspace
    }

    /// The selected file, if any.
    pub fn active_file(&self) -> Option<&FileRecord> {
        self.active_file.and_then(|uid| self.workspace.file(uid))
    }

    /// The most recent successful render, if it's still live.
    pub fn rendered(&self) -> Option<&Rendered> {
        self.rendered.as_ref()
    }

    /// Whether the active file's source differs from the last rendered source.
    pub fn changed(&self) -> bool {
        self.active_file()
            .is_some_and(|f| self.rendered_source.as_deref() != Some(f.source.as_str()))
    }

    /// Renders the active file if its source changed since the last render.
    pub fn render(&mut self) {
        if let Err(e) = self.ensure_rendered() {
            self.report("Unable to render this file.", e);
        }
    }

    /// Renders if needed, then starts the transport.
    pub fn play(&mut self) {
        if let Err(e) = self.with_rendered(|o| o.driver.play()) {
            self.report("Unable to play this file.", e);
            return;
        }
        self.set_state(OrchestratorState::Playing);
    }

    /// Pauses the transport. The driver is always told, but only a playing
    /// orchestrator becomes [OrchestratorState::Paused].
    pub fn pause(&mut self) {
        if let Err(e) = self.driver.pause() {
            self.report("Unable to pause audio.", e);
            return;
        }
        self.advance_state(&[OrchestratorState::Playing], OrchestratorState::Paused);
    }

    /// Stops the transport and reports the position as the start of the piece.
    /// Only a playing or paused orchestrator becomes
    /// [OrchestratorState::Stopped].
    pub fn stop(&mut self) {
        if let Err(e) = self.driver.stop() {
            self.report("Unable to stop audio.", e);
            return;
        }
        self.advance_state(
            &[OrchestratorState::Playing, OrchestratorState::Paused],
            OrchestratorState::Stopped,
        );
        self.emit(Event::TransportPosition(TransportPosition::ZERO));
    }

    /// Re-emits whatever the driver has reported since the last call.
    pub fn dispatch_transport_events(&mut self) {
        let events: Vec<TransportEvent> = self.driver.transport_events().try_iter().collect();
        for event in events {
            self.emit(match event {
                TransportEvent::Start(state) => Event::TransportStart(state),
                TransportEvent::Stop(state) => Event::TransportStop(state),
                TransportEvent::Pause(state) => Event::TransportPause(state),
                TransportEvent::Loop(state) => Event::TransportLoop(state),
            });
        }
        let positions: Vec<TransportPosition> = self
            .positions
            .as_ref()
            .map(|r| r.try_iter().collect())
            .unwrap_or_default();
        for position in positions {
            self.emit(Event::TransportPosition(position));
        }
    }

    /// Creates a new file from the configured template and selects it.
    pub fn add_file(&mut self) {
        match self.try_add_file() {
            Ok(file) => {
                let uid = file.uid;
                self.emit(Event::FileCreated(file));
                self.select_file(uid);
            }
            Err(e) => self.report("Unable to add a new file.", e),
        }
    }

    /// Deletes a file. If it was active, the first remaining file becomes
    /// active.
    pub fn destroy_file(&mut self, uid: FileUid) {
        let file = match self.workspace.destroy_file(uid) {
            Ok(file) => file,
            Err(e) => {
                self.report("Unable to delete file.", e);
                return;
            }
        };
        log::info!("destroyed file '{}'", file.name);
        if self.active_file == Some(uid) {
            self.active_file = None;
            if let Some(first) = self.workspace.first_file().map(|f| f.uid) {
                self.select_file(first);
            }
        }
        self.emit(Event::FileDestroyed(file));
    }

    /// Makes a file active.
    pub fn select_file(&mut self, uid: FileUid) {
        let Some(file) = self.workspace.file(uid).cloned() else {
            self.report("Unable to select file.", anyhow!("no file with uid {uid}"));
            return;
        };
        log::info!("selected file '{}'", file.name);
        self.active_file = Some(uid);
        self.emit(Event::FileSelected(file));
    }

    /// Saves the workspace.
    pub fn save(&mut self) {
        if let Err(e) = self.workspace.save() {
            self.report("Unable to save workspace.", e);
        }
    }

    /// Replaces the active file's source.
    pub fn set_file_source(&mut self, source: &str) {
        let result = match self.active_file {
            Some(uid) => self.workspace.update_file(uid, source),
            None => Err(anyhow!("no file is selected")),
        };
        match result {
            Ok(file) => {
                self.emit(Event::FileUpdated(file));
                self.emit(Event::Changed(self.changed()));
            }
            Err(e) => self.report("Unable to update file.", e),
        }
    }

    fn try_add_file(&mut self) -> anyhow::Result<FileRecord> {
        let template_name = self.settings.new_file_template();
        let Some(template) = self
            .libraries
            .iter()
            .find_map(|l| l.templates().get(template_name))
        else {
            return Err(ComposerError::Authoring(format!(
                "no library has a template named '{template_name}'"
            ))
            .into());
        };
        let source = template.source().to_string();
        let name = new_file_name(&mut self.rng);
        let file = self.workspace.create_file(&name, &source)?;
        log::info!("created file '{}'", file.name);
        Ok(file)
    }

    fn with_rendered<F>(&mut self, f: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Self) -> anyhow::Result<()>,
    {
        self.ensure_rendered()?;
        f(self)
    }

    fn ensure_rendered(&mut self) -> anyhow::Result<()> {
        let Some(source) = self.active_file().map(|f| f.source.clone()) else {
            return Err(anyhow!("no file is selected"));
        };
        if self.rendered.is_some() && !self.changed() {
            log::info!("source unchanged; reusing the rendered graph");
            return Ok(());
        }

        self.release();
        self.driver.start_audio_buffer()?;
        match self.compose_and_load(&source) {
            Ok(rendered) => {
                self.rendered = Some(rendered);
                self.rendered_source = Some(source);
                if self.settings.report_positions() {
                    self.positions = Some(self.driver.observe_position());
                }
                self.set_state(OrchestratorState::Rendered);
                self.emit(Event::ComposerRendered);
                self.emit(Event::Changed(false));
                Ok(())
            }
            Err(e) => {
                self.release();
                self.set_state(OrchestratorState::Idle);
                Err(e)
            }
        }
    }

    fn compose_and_load(&mut self, source: &str) -> anyhow::Result<Rendered> {
        self.set_state(OrchestratorState::Parsing);
        self.emit(Event::ComposerParsing);
        let score = Score::parse(source)?;
        self.set_state(OrchestratorState::Parsed);
        self.emit(Event::ComposerParsed);

        self.set_state(OrchestratorState::Rendering);
        self.emit(Event::ComposerRendering);
        render_score(
            &score,
            &self.libraries,
            self.settings.default_library(),
            &mut self.driver,
        )
    }

    // Drops the rendered session and gives back its buffer.
    fn release(&mut self) {
        self.rendered = None;
        self.rendered_source = None;
        self.positions = None;
        self.driver.release_audio_buffer();
    }

    // Moves to `state` only from one of `from`.
    fn advance_state(&mut self, from: &[OrchestratorState], state: OrchestratorState) {
        if from.contains(&self.state) {
            self.set_state(state);
        } else {
            log::debug!("staying {} instead of becoming {}", self.state, state);
        }
    }

    fn set_state(&mut self, state: OrchestratorState) {
        if state != self.state {
            log::info!("{} -> {}", self.state, state);
            self.state = state;
        }
    }

    fn emit(&mut self, event: Event) {
        if let Err(e) = self.bus.emit(&event) {
            log::error!("{e}");
        }
    }

    fn report(&mut self, message: &str, cause: anyhow::Error) {
        log::error!("{message} {cause:#}");
        self.emit(Event::error(message, cause));
    }
}
impl<D: AudioDriver, W: Workspace> Drop for Orchestrator<D, W> {
    fn drop(&mut self) {
        self.driver.release_audio_buffer();
    }
}
