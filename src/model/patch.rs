// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use delegate::delegate;
use serde::{Deserialize, Serialize};

/// A [Patch] is a directed connection between two nodes. Signal flows from the
/// `input` node into the `output` node.
///
/// Patches name their endpoints by [PatchType] and name rather than holding
/// references, so a patch can be stored before (or without) the nodes it
/// mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Patch {
    /// The [PatchType] of the node that produces the signal.
    pub input_type: PatchType,
    /// The name of the node that produces the signal.
    pub input: String,
    /// The [PatchType] of the node that receives the signal.
    pub output_type: PatchType,
    /// The name of the node that receives the signal.
    pub output: String,
}
impl Patch {
    #[allow(missing_docs)]
    pub fn new_with(input_type: &str, input: &str, output_type: &str, output: &str) -> Self {
        Self {
            input_type: PatchType::from(input_type),
            input: input.to_string(),
            output_type: PatchType::from(output_type),
            output: output.to_string(),
        }
    }

    /// Creates a patch that sends `from`'s signal into `to`.
    pub fn connect(from: &impl Node, to: &impl Node) -> Self {
        Self {
            input_type: from.patch_type(),
            input: from.name().to_string(),
            output_type: to.patch_type(),
            output: to.name().to_string(),
        }
    }

    fn is_input_side(&self, patch_type: &PatchType, name: &str) -> bool {
        self.input_type == *patch_type && self.input == name
    }

    fn is_output_side(&self, patch_type: &PatchType, name: &str) -> bool {
        self.output_type == *patch_type && self.output == name
    }
}

/// The connections of one node, as seen from that node.
#[derive(Debug, Default, PartialEq)]
pub struct Patches<'a> {
    /// Patches that feed signal into the node. In these, the node is the
    /// patch's `output`.
    pub inputs: Vec<&'a Patch>,
    /// Patches that carry signal away from the node. In these, the node is the
    /// patch's `input`.
    pub outputs: Vec<&'a Patch>,
}
impl<'a> Patches<'a> {
    /// True if the node isn't connected to anything.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}

/// A session's flat list of [Patch]es, kept in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchBay {
    patches: Vec<Patch>,
}
impl PatchBay {
    /// Adds a patch. Patches aren't checked against the session's nodes; one
    /// that names a missing node just never shows up in [PatchBay::resolve()].
    pub fn add(&mut self, patch: Patch) {
        self.patches.push(patch);
    }

    /// Finds every patch touching the node of the given type and name.
    ///
    /// Scans the whole list on every call. A patch that loops a node into
    /// itself satisfies both rules, so it appears in both `inputs` and
    /// `outputs`.
    pub fn resolve(&self, patch_type: &PatchType, name: &str) -> Patches<'_> {
        self.patches
            .iter()
            .fold(Patches::default(), |mut patches, patch| {
                if patch.is_output_side(patch_type, name) {
                    patches.inputs.push(patch);
                }
                if patch.is_input_side(patch_type, name) {
                    patches.outputs.push(patch);
                }
                patches
            })
    }

    delegate! {
        to self.patches {
            #[allow(missing_docs)]
            pub fn iter(&self) -> core::slice::Iter<'_, Patch>;
            #[allow(missing_docs)]
            pub fn len(&self) -> usize;
            #[allow(missing_docs)]
            pub fn is_empty(&self) -> bool;
        }
    }
}
impl From<Vec<Patch>> for PatchBay {
    fn from(patches: Vec<Patch>) -> Self {
        Self { patches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synth_to_reverb() -> Patch {
        Patch::new_with("instrument", "synth1", "effect", "reverb1")
    }

    #[test]
    fn direction_follows_signal_flow() {
        let bay = PatchBay::from(vec![synth_to_reverb()]);

        let reverb = bay.resolve(&PatchType::effect(), "reverb1");
        assert_eq!(
            reverb.inputs,
            vec![&synth_to_reverb()],
            "reverb1 is the patch's output, so the patch feeds into it"
        );
        assert!(
            reverb.outputs.is_empty(),
            "reverb1 isn't the input side of any patch"
        );

        let synth = bay.resolve(&PatchType::instrument(), "synth1");
        assert!(synth.inputs.is_empty());
        assert_eq!(synth.outputs, vec![&synth_to_reverb()]);
    }

    #[test]
    fn type_and_name_must_both_match() {
        let bay = PatchBay::from(vec![synth_to_reverb()]);
        assert!(
            bay.resolve(&PatchType::instrument(), "reverb1").is_empty(),
            "right name, wrong type should match nothing"
        );
        assert!(
            bay.resolve(&PatchType::effect(), "reverb2").is_empty(),
            "right type, wrong name should match nothing"
        );
    }

    #[test]
    fn unconnected_nodes_resolve_to_nothing() {
        let bay = PatchBay::default();
        assert_eq!(
            bay.resolve(&PatchType::track(), "anything"),
            Patches::default()
        );
    }

    #[test]
    fn dangling_and_unknown_patches_are_inert() {
        let mut bay = PatchBay::default();
        bay.add(Patch::new_with("kazoo", "k1", "effect", "nowhere"));
        bay.add(synth_to_reverb());

        let reverb = bay.resolve(&PatchType::effect(), "reverb1");
        assert_eq!(reverb.inputs.len(), 1);
        let nowhere = bay.resolve(&PatchType::effect(), "nowhere");
        assert_eq!(
            nowhere.inputs.len(),
            1,
            "the resolver doesn't care whether the other end exists"
        );
        assert!(bay.resolve(&PatchType::from("kazoo"), "k2").is_empty());
    }

    #[test]
    fn self_loops_appear_on_both_sides() {
        let bay = PatchBay::from(vec![Patch::new_with("effect", "fb", "effect", "fb")]);
        let fb = bay.resolve(&PatchType::effect(), "fb");
        assert_eq!(fb.inputs.len(), 1);
        assert_eq!(fb.outputs.len(), 1);
    }

    #[test]
    fn many_patches_keep_their_order() {
        let bay = PatchBay::from(vec![
            Patch::new_with("instrument", "a", "effect", "mix"),
            Patch::new_with("effect", "mix", "track", "main"),
            Patch::new_with("instrument", "b", "effect", "mix"),
        ]);
        let mix = bay.resolve(&PatchType::effect(), "mix");
        assert_eq!(
            mix.inputs.iter().map(|p| p.input.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(mix.outputs.len(), 1);
        assert_eq!(mix.outputs[0].output, "main");
    }
}
