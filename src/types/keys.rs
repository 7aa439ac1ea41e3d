// Copyright (c) 2024 Mike Tsao

use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Names the kind of slot a node plugs into. Patches refer to nodes by
/// [PatchType] plus name.
///
/// This is an open string rather than an enum because patches arrive from
/// author source code, and a patch naming an unknown type is legal. It just
/// never connects to anything.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PatchType(pub String);
impl PatchType {
    #[allow(missing_docs)]
    pub const INSTRUMENT: &'static str = "instrument";
    #[allow(missing_docs)]
    pub const EFFECT: &'static str = "effect";
    #[allow(missing_docs)]
    pub const TRACK: &'static str = "track";

    /// The [PatchType] of instruments.
    pub fn instrument() -> Self {
        Self::from(Self::INSTRUMENT)
    }

    /// The [PatchType] of effects.
    pub fn effect() -> Self {
        Self::from(Self::EFFECT)
    }

    /// The [PatchType] of tracks.
    pub fn track() -> Self {
        Self::from(Self::TRACK)
    }

    #[allow(missing_docs)]
    pub fn is(&self, patch_type: &str) -> bool {
        self.0 == patch_type
    }
}

/// Identifies a kind of audio-engine node, such as a sampler or a reverb. A
/// node's builder tells the engine which one to create.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineKey(pub String);
