// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A node ready for the audio engine: what to create, plus the patches that
/// feed it and leave it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RenderedNode {
    #[allow(missing_docs)]
    pub patch_type: PatchType,
    #[allow(missing_docs)]
    pub name: String,
    /// What the node's builder returned.
    pub engine: EngineNode,
    #[allow(missing_docs)]
    pub inputs: Vec<Patch>,
    #[allow(missing_docs)]
    pub outputs: Vec<Patch>,
}
impl RenderedNode {
    fn new_with<N>(node: &N, engine: EngineNode, session: &SessionModel) -> Self
    where
        N: Node,
    {
        let patches = node.patches(session);
        Self {
            patch_type: node.patch_type(),
            name: node.name().to_string(),
            engine,
            inputs: patches.inputs.into_iter().cloned().collect(),
            outputs: patches.outputs.into_iter().cloned().collect(),
        }
    }
}

/// Turns a composed session into engine instructions. Every node's builder
/// runs exactly once, when the [Renderer] is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Renderer {
    nodes: Vec<RenderedNode>,
}
impl Renderer {
    /// Runs every node's builder and resolves its connections.
    pub fn new_with(session: &SessionModel) -> anyhow::Result<Self> {
        let mut nodes = Vec::default();
        for instrument in session.instruments() {
            nodes.push(RenderedNode::new_with(
                instrument,
                instrument.instantiate()?,
                session,
            ));
        }
        for effect in session.effects() {
            nodes.push(RenderedNode::new_with(effect, effect.instantiate()?, session));
        }
        for track in session.tracks() {
            nodes.push(RenderedNode::new_with(track, track.instantiate()?, session));
        }
        for patch in session.dangling_patches() {
            log::warn!(
                "patch {} '{}' -> {} '{}' in session '{}' doesn't connect anything",
                patch.input_type,
                patch.input,
                patch.output_type,
                patch.output,
                session.name()
            );
        }
        log::debug!("rendered {} node(s) from '{}'", nodes.len(), session.name());
        Ok(Self { nodes })
    }

    /// Nodes in order: instruments, then effects, then tracks.
    pub fn nodes(&self) -> &[RenderedNode] {
        &self.nodes
    }

    /// The rendered node with the given type and name.
    pub fn node(&self, patch_type: &PatchType, name: &str) -> Option<&RenderedNode> {
        self.nodes
            .iter()
            .find(|n| &n.patch_type == patch_type && n.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn each_builder_runs_once() {
        let calls = Arc::new(AtomicUsize::default());
        let counted = Arc::clone(&calls);
        let composer = session("song", move |s| {
            s.instrument("synth1", move || {
                counted.fetch_add(1, Ordering::Relaxed);
                Ok(EngineNodeBuilder::default().key("mono-synth").build()?)
            })?;
            s.effect("reverb1", || {
                Ok(EngineNodeBuilder::default().key("reverb").build()?)
            })?;
            s.patch(Patch::new_with("instrument", "synth1", "effect", "reverb1"));
            Ok(())
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 0, "composing shouldn't build");

        let renderer = Renderer::new_with(composer.model()).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(renderer.nodes().len(), 2);

        let reverb = renderer.node(&PatchType::effect(), "reverb1").unwrap();
        assert_eq!(reverb.inputs.len(), 1);
        assert!(reverb.outputs.is_empty());
        let synth = renderer.node(&PatchType::instrument(), "synth1").unwrap();
        assert!(synth.inputs.is_empty());
        assert_eq!(synth.outputs, reverb.inputs);
        assert!(renderer.node(&PatchType::track(), "synth1").is_none());
    }

    #[test]
    fn builder_errors_fail_the_render() {
        let composer = session("song", |s| {
            s.instrument("broken", || Err(anyhow::anyhow!("no samples")))?;
            Ok(())
        })
        .unwrap();
        let e = Renderer::new_with(composer.model()).unwrap_err();
        assert_eq!(e.to_string(), "no samples");
    }

    #[test]
    fn imported_sessions_cannot_render() {
        let composer = session("song", |s| {
            s.effect("verb", || Ok(EngineNodeBuilder::default().key("reverb").build()?))?;
            Ok(())
        })
        .unwrap();
        let imported = SessionModel::import(&composer.model().export().unwrap()).unwrap();
        let e = Renderer::new_with(&imported).unwrap_err();
        assert!(matches!(
            e.downcast_ref::<ComposerError>(),
            Some(ComposerError::Validation { property: "fn", .. })
        ));
    }
}
