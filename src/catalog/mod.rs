// Copyright (c) 2024 Mike Tsao

//! The built-in `core` library of instruments, effects, and starter scores.

use crate::prelude::*;

type Params = &'static [(&'static str, f64)];

/// Returns a node builder that asks the engine for `key` configured with
/// `params`.
fn engine(
    key: &'static str,
    params: Params,
) -> impl Fn() -> anyhow::Result<EngineNode> + Send + Sync {
    move || {
        let mut builder = EngineNodeBuilder::default();
        builder.key(key);
        for (name, value) in params {
            builder.param(name, *value);
        }
        Ok(builder.build()?)
    }
}

/// The library that ships with the system. Scores that don't name a library
/// draw from this one.
pub struct CoreLibrary {}
impl CoreLibrary {
    /// The library's name.
    pub const NAME: &'static str = "core";

    const INSTRUMENTS: &'static [(&'static str, &'static str, Params)] = &[
        ("piano", "sampler", &[("release", 1.0), ("volume", -6.0)]),
        (
            "electric-bass",
            "mono-synth",
            &[("attack", 0.01), ("release", 0.4), ("filter-q", 2.0)],
        ),
        (
            "mono-synth",
            "mono-synth",
            &[("attack", 0.05), ("decay", 0.2), ("sustain", 0.6), ("release", 0.8)],
        ),
        ("organ", "fm-synth", &[("harmonicity", 3.0), ("modulation-index", 10.0)]),
        ("violin", "sampler", &[("release", 1.5), ("volume", -4.0)]),
        ("flute", "sampler", &[("release", 0.6), ("volume", -8.0)]),
        ("drums", "drum-kit", &[("volume", -2.0)]),
    ];

    const EFFECTS: &'static [(&'static str, &'static str, Params)] = &[
        ("reverb", "reverb", &[("decay", 4.0), ("wet", 0.5)]),
        ("delay", "feedback-delay", &[("delay-time", 0.25), ("feedback", 0.4)]),
        ("chorus", "chorus", &[("frequency", 4.0), ("delay-time", 2.5), ("depth", 0.5)]),
        ("distortion", "distortion", &[("distortion", 0.4)]),
        ("tremolo", "tremolo", &[("frequency", 9.0), ("depth", 0.75)]),
        (
            "phaser",
            "phaser",
            &[("frequency", 0.5), ("octaves", 3.0), ("base-frequency", 350.0)],
        ),
        ("pitch-shift", "pitch-shift", &[("pitch", 12.0), ("window-size", 0.1)]),
        ("vibrato", "vibrato", &[("frequency", 5.0), ("depth", 0.1)]),
    ];

    const EFFECT_CHAIN: &'static str = r#"{
  "effects": [
    { "name": "drive", "use": "distortion" },
    { "name": "room", "use": "reverb" }
  ],
  "patches": [
    { "input-type": "effect", "input": "drive", "output-type": "effect", "output": "room" }
  ]
}"#;

    const BLANK: &'static str = r#"{
  "session": "untitled",
  "instruments": [],
  "effects": [],
  "patches": []
}"#;

    const PIANO: &'static str = r#"{
  "session": "untitled",
  "instruments": [{ "name": "piano", "use": "piano" }],
  "effects": [{ "name": "room", "use": "reverb" }],
  "patches": [
    { "input-type": "instrument", "input": "piano", "output-type": "effect", "output": "room" }
  ]
}"#;

    const KITCHEN_SYNC: &'static str = r#"{
  "session": "kitchen-sync",
  "instruments": [
    { "name": "keys", "use": "piano" },
    { "name": "bass", "use": "electric-bass" },
    { "name": "lead", "use": "mono-synth" },
    { "name": "kit", "use": "drums" }
  ],
  "effects": [
    { "name": "wobble", "use": "chorus" },
    { "name": "echo", "use": "delay" },
    { "name": "hall", "use": "reverb" }
  ],
  "patches": [
    { "input-type": "instrument", "input": "keys", "output-type": "effect", "output": "hall" },
    { "input-type": "instrument", "input": "lead", "output-type": "effect", "output": "wobble" },
    { "input-type": "effect", "input": "wobble", "output-type": "effect", "output": "echo" },
    { "input-type": "effect", "input": "echo", "output-type": "effect", "output": "hall" }
  ]
}"#;

    /// Composes the `core` library.
    pub fn compose() -> anyhow::Result<LibraryComposer> {
        library(Self::NAME, |l| {
            for &(name, key, params) in Self::INSTRUMENTS {
                l.instrument(name, engine(key, params))?;
            }
            for &(name, key, params) in Self::EFFECTS {
                l.effect(name, engine(key, params))?;
            }

            l.snippet("effect-chain", |s| {
                s.description("A distortion feeding a reverb.")
                    .source(Self::EFFECT_CHAIN);
                Ok(())
            })?;

            l.template("blank", |t| {
                t.description("An empty session.").source(Self::BLANK);
                Ok(())
            })?;
            l.template("piano", |t| {
                t.description("A piano in a room.").source(Self::PIANO);
                Ok(())
            })?;

            l.demo("kitchen-sync", |d| {
                d.description("A little of everything, patched together.")
                    .source(Self::KITCHEN_SYNC);
                Ok(())
            })?;
            Ok(())
        })
    }
}
