// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use core::fmt::Debug;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One named parameter of an [EngineNode].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineParameter {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub value: f64,
}

/// What a node's builder produces: an instruction telling the audio engine
/// which node to create and how to configure it.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(build_fn(error = "ComposerError"))]
#[serde(rename_all = "kebab-case")]
pub struct EngineNode {
    /// Which kind of engine node to create.
    #[builder(setter(into))]
    pub key: EngineKey,

    /// Initial parameter values, in the order they should be applied.
    #[builder(default, setter(each(name = "parameter")))]
    pub parameters: Vec<EngineParameter>,
}
impl EngineNodeBuilder {
    /// Adds a parameter by name and value.
    pub fn param(&mut self, name: &str, value: f64) -> &mut Self {
        self.parameter(EngineParameter {
            name: name.to_string(),
            value,
        })
    }
}
impl EngineNode {
    /// Returns the value of the named parameter, if present.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }
}

/// The signature of a node builder.
pub type BuildFnSignature = dyn Fn() -> anyhow::Result<EngineNode> + Send + Sync;

/// A node's deferred builder. Composition only stores it; rendering calls it.
#[derive(Clone)]
pub struct BuildFn(Arc<BuildFnSignature>);
impl BuildFn {
    #[allow(missing_docs)]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<EngineNode> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Runs the builder.
    pub fn call(&self) -> anyhow::Result<EngineNode> {
        (self.0)()
    }

    /// Whether both handles refer to the same builder.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Debug for BuildFn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BuildFn(..)")
    }
}

// Instruments, effects, and tracks differ only in the slot they plug into.
macro_rules! node_model {
    ($(#[$doc:meta])* $name:ident, $builder:ident, $kind:literal, $patch_type:expr) => {
        $(#[$doc])*
        ///
        /// The builder and the owning session's name exist only in memory.
        /// Neither survives export.
        #[derive(Debug, Clone, Builder, Serialize, Deserialize)]
        #[builder(derive(Debug), build_fn(validate = "Self::validate", error = "ComposerError"))]
        #[serde(rename_all = "kebab-case")]
        pub struct $name {
            #[builder(setter(into))]
            name: String,

            #[builder(setter(strip_option))]
            #[serde(skip)]
            build_fn: Option<BuildFn>,

            #[builder(setter(skip))]
            #[serde(skip)]
            session: Option<String>,
        }
        impl $builder {
            fn validate(&self) -> Result<(), ComposerError> {
                if self.build_fn.is_none() {
                    return Err(ComposerError::missing($kind, "fn"));
                }
                match self.name.as_ref() {
                    Some(name) if name.trim().is_empty() => Err(ComposerError::Validation {
                        kind: $kind,
                        property: "name",
                        reason: "must not be empty".to_string(),
                    }),
                    Some(_) => Ok(()),
                    None => Err(ComposerError::missing($kind, "name")),
                }
            }
        }
        impl Entity for $name {
            const KIND: &'static str = $kind;

            fn name(&self) -> &str {
                &self.name
            }
        }
        impl Node for $name {
            fn patch_type(&self) -> PatchType {
                PatchType::from($patch_type)
            }
        }
        impl $name {
            /// Creates a new node with the given name and builder.
            pub fn new_with<F>(name: &str, f: F) -> Result<Self, ComposerError>
            where
                F: Fn() -> anyhow::Result<EngineNode> + Send + Sync + 'static,
            {
                $builder::default()
                    .name(name)
                    .build_fn(BuildFn::new(f))
                    .build()
            }

            /// The node's builder. Absent if the node came from an export.
            pub fn build_fn(&self) -> Option<&BuildFn> {
                self.build_fn.as_ref()
            }

            /// The name of the session this node belongs to, if any.
            pub fn session(&self) -> Option<&str> {
                self.session.as_deref()
            }

            pub(crate) fn set_session(&mut self, session: &str) {
                self.session = Some(session.to_string());
            }

            /// Runs the node's builder. Fails with [ComposerError::Validation]
            /// if the node has none.
            pub fn instantiate(&self) -> anyhow::Result<EngineNode> {
                match self.build_fn.as_ref() {
                    Some(build_fn) => build_fn.call(),
                    None => Err(ComposerError::missing($kind, "fn").into()),
                }
            }

            /// A copy of this node under a different name, detached from any
            /// session.
            #[allow(dead_code)]
            pub(crate) fn renamed(&self, name: &str) -> Result<Self, ComposerError> {
                let mut builder = $builder::default();
                builder.name(name);
                if let Some(build_fn) = self.build_fn.as_ref() {
                    builder.build_fn(build_fn.clone());
                } else {
                    builder.build_fn = Some(None);
                }
                builder.build()
            }
        }
    };
}

node_model!(
    /// A sound source, such as a piano or a drum kit.
    Instrument,
    InstrumentBuilder,
    "instrument",
    PatchType::INSTRUMENT
);
node_model!(
    /// Something that transforms sound, such as a reverb.
    Effect,
    EffectBuilder,
    "effect",
    PatchType::EFFECT
);
node_model!(
    /// A mixer channel.
    Track,
    TrackBuilder,
    "track",
    PatchType::TRACK
);
