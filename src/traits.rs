// Copyright (c) 2024 Mike Tsao

//! The traits that define many characteristics and relationships among parts of
//! the system.

use crate::{model::Patches, prelude::*};
use core::fmt::Debug;

/// Quick import of all important traits.
pub mod prelude {
    pub use super::{Composer, Entity, HasSettings, Node, Serializable};
}

/// Anything that lives in a [Collection](crate::model::Collection). Every
/// entity has a name that is unique within its collection.
pub trait Entity: Debug {
    /// A human-readable label for this kind of entity, such as "instrument".
    /// Used in error messages.
    const KIND: &'static str;

    /// The entity's name.
    fn name(&self) -> &str;
}

/// An [Entity] that can take part in patch connections.
///
/// Nodes don't know which session they belong to. Ask about their connections
/// by handing over the [SessionModel] that holds the patches.
pub trait Node: Entity {
    /// Which kind of slot this node plugs into.
    fn patch_type(&self) -> PatchType;

    /// All the patches that connect to this node within `session`.
    fn patches<'a>(&self, session: &'a SessionModel) -> Patches<'a> {
        session.patches().resolve(&self.patch_type(), self.name())
    }

    /// The patches that feed signal into this node.
    fn inputs<'a>(&self, session: &'a SessionModel) -> Vec<&'a Patch> {
        self.patches(session).inputs
    }

    /// The patches that carry signal away from this node.
    fn outputs<'a>(&self, session: &'a SessionModel) -> Vec<&'a Patch> {
        self.patches(session).outputs
    }
}

/// A [Composer] runs an author's construction function against a fresh model,
/// handing the function a context that exposes only the verbs that make sense
/// for this kind of model.
pub trait Composer: Sized {
    /// The model this composer builds.
    type Model: Entity;

    /// The DSL surface handed to the author's function. It owns the model
    /// while construction is underway.
    type Context;

    /// Creates the context for a new model called `name`.
    fn begin(name: &str) -> Result<Self::Context, ComposerError>;

    /// Seals the model once the author's function has returned.
    fn finish(context: Self::Context) -> Result<Self, ComposerError>;

    /// The finished model.
    fn model(&self) -> &Self::Model;

    /// Gives up the composer, keeping only its model.
    fn into_model(self) -> Self::Model;

    /// Builds a model named `name` by running `f`. Whatever error `f` returns
    /// comes back unchanged.
    fn compose<F>(name: &str, f: F) -> anyhow::Result<Self>
    where
        F: FnOnce(&mut Self::Context) -> anyhow::Result<()>,
    {
        log::debug!("composing {} '{name}'", Self::Model::KIND);
        let mut context = Self::begin(name)?;
        f(&mut context)?;
        Ok(Self::finish(context)?)
    }
}

/// Methods that help prepare a struct for serialization and get it running
/// again after deserialization.
pub trait Serializable {
    /// Called just before serialization.
    fn before_ser(&mut self) {}

    /// Called just after deserialization. Rebuild anything that wasn't
    /// persisted here.
    fn after_deser(&mut self) {}
}

/// Tracks whether a settings struct has unsaved changes.
pub trait HasSettings {
    /// Whether the current state has been saved.
    fn has_been_saved(&self) -> bool;
    /// Marks the struct as having unsaved changes.
    fn needs_save(&mut self);
    /// Marks the struct as saved.
    fn mark_clean(&mut self);
}
