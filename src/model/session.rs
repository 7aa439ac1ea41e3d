// Copyright (c) 2024 Mike Tsao

use super::{Collection, PatchBay, Patches};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// The live composition of one piece: its nodes and the patches that connect
/// them.
///
/// Nodes remember the name of the session that holds them, but they don't
/// hold the session itself. To find a node's connections, ask the session
/// ([SessionModel::patches_for()]) or pass it to [Node::patches()].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionModel {
    name: String,
    #[serde(default)]
    instruments: Collection<Instrument>,
    #[serde(default)]
    effects: Collection<Effect>,
    #[serde(default)]
    tracks: Collection<Track>,
    #[serde(default)]
    patches: PatchBay,
}
impl Entity for SessionModel {
    const KIND: &'static str = "session";

    fn name(&self) -> &str {
        &self.name
    }
}
impl Serializable for SessionModel {
    fn after_deser(&mut self) {
        let name = self.name.clone();
        self.instruments
            .iter_mut()
            .for_each(|n| n.set_session(&name));
        self.effects.iter_mut().for_each(|n| n.set_session(&name));
        self.tracks.iter_mut().for_each(|n| n.set_session(&name));
    }
}
impl SessionModel {
    pub(crate) fn new_with(name: &str) -> Result<Self, ComposerError> {
        if name.trim().is_empty() {
            return Err(ComposerError::Validation {
                kind: Self::KIND,
                property: "name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            instruments: Default::default(),
            effects: Default::default(),
            tracks: Default::default(),
            patches: Default::default(),
        })
    }

    /// Serializes the session to JSON. Node builders and back-references
    /// aren't included.
    pub fn export(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Recreates a session from [SessionModel::export()] output.
    pub fn import(json: &str) -> anyhow::Result<Self> {
        let mut session = serde_json::from_str::<Self>(json)?;
        session.after_deser();
        Ok(session)
    }

    #[allow(missing_docs)]
    pub fn instruments(&self) -> &Collection<Instrument> {
        &self.instruments
    }
    #[allow(missing_docs)]
    pub fn effects(&self) -> &Collection<Effect> {
        &self.effects
    }
    #[allow(missing_docs)]
    pub fn tracks(&self) -> &Collection<Track> {
        &self.tracks
    }
    #[allow(missing_docs)]
    pub fn patches(&self) -> &PatchBay {
        &self.patches
    }

    /// Resolves the connections of the node with the given type and name.
    /// The node doesn't have to exist.
    pub fn patches_for(&self, patch_type: &PatchType, name: &str) -> Patches<'_> {
        self.patches.resolve(patch_type, name)
    }

    /// Whether a node of this type and name is in the session.
    pub fn has_node(&self, patch_type: &PatchType, name: &str) -> bool {
        match patch_type.0.as_str() {
            PatchType::INSTRUMENT => self.instruments.contains(name),
            PatchType::EFFECT => self.effects.contains(name),
            PatchType::TRACK => self.tracks.contains(name),
            _ => false,
        }
    }

    /// Patches whose endpoints don't both exist in this session. They're
    /// legal, but they won't carry any signal.
    pub fn dangling_patches(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter().filter(|p| {
            !(self.has_node(&p.input_type, &p.input) && self.has_node(&p.output_type, &p.output))
        })
    }

    pub(crate) fn add_instrument(
        &mut self,
        mut instrument: Instrument,
    ) -> Result<&Instrument, ComposerError> {
        instrument.set_session(&self.name);
        self.instruments.add(instrument)
    }

    pub(crate) fn add_effect(&mut self, mut effect: Effect) -> Result<&Effect, ComposerError> {
        effect.set_session(&self.name);
        self.effects.add(effect)
    }

    pub(crate) fn add_patch(&mut self, patch: Patch) {
        self.patches.add(patch);
    }
}
