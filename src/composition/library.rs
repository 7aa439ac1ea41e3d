// Copyright (c) 2024 Mike Tsao

use super::{compose_into, DemoComposer, DemoContext, SnippetComposer, SnippetContext};
use super::{TemplateComposer, TemplateContext};
use crate::prelude::*;

/// Builds a [LibraryModel] by running an author's function against a
/// [LibraryContext].
///
/// ```
/// use harmonicon::prelude::*;
///
/// let composer = library("strings", |l| {
///     l.instrument("violin", || {
///         Ok(EngineNodeBuilder::default().key("bowed").build()?)
///     })?;
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(composer.model().instruments().len(), 1);
/// ```
#[derive(Debug)]
pub struct LibraryComposer {
    model: LibraryModel,
}
impl Composer for LibraryComposer {
    type Model = LibraryModel;
    type Context = LibraryContext;

    fn begin(name: &str) -> Result<Self::Context, ComposerError> {
        Ok(LibraryContext {
            model: LibraryModel::new_with(name)?,
        })
    }

    fn finish(context: Self::Context) -> Result<Self, ComposerError> {
        Ok(Self {
            model: context.model,
        })
    }

    fn model(&self) -> &Self::Model {
        &self.model
    }

    fn into_model(self) -> Self::Model {
        self.model
    }
}

/// Composes a library called `name`.
pub fn library<F>(name: &str, f: F) -> anyhow::Result<LibraryComposer>
where
    F: FnOnce(&mut LibraryContext) -> anyhow::Result<()>,
{
    LibraryComposer::compose(name, f)
}

/// The verbs available while composing a library.
#[derive(Debug)]
pub struct LibraryContext {
    model: LibraryModel,
}
impl LibraryContext {
    /// The name of the library being composed.
    pub fn name(&self) -> &str {
        self.model.name()
    }

    /// The library as composed so far.
    pub fn model(&self) -> &LibraryModel {
        &self.model
    }

    /// Registers an instrument whose builder is `f`.
    pub fn instrument<F>(&mut self, name: &str, f: F) -> anyhow::Result<&Instrument>
    where
        F: Fn() -> anyhow::Result<EngineNode> + Send + Sync + 'static,
    {
        let instrument = Instrument::new_with(name, f)?;
        Ok(self.model.instruments_mut().add(instrument)?)
    }

    /// Registers an effect whose builder is `f`.
    pub fn effect<F>(&mut self, name: &str, f: F) -> anyhow::Result<&Effect>
    where
        F: Fn() -> anyhow::Result<EngineNode> + Send + Sync + 'static,
    {
        let effect = Effect::new_with(name, f)?;
        Ok(self.model.effects_mut().add(effect)?)
    }

    /// Not implemented. Always fails without registering anything.
    pub fn track<F>(&mut self, name: &str, _f: F) -> anyhow::Result<&Track>
    where
        F: Fn() -> anyhow::Result<EngineNode> + Send + Sync + 'static,
    {
        log::debug!("rejecting track '{name}'");
        Err(ComposerError::NotImplemented { verb: "track" }.into())
    }

    /// Not implemented. Always fails without registering anything.
    pub fn phrase<F>(&mut self, name: &str, _f: F) -> anyhow::Result<()> {
        log::debug!("rejecting phrase '{name}'");
        Err(ComposerError::NotImplemented { verb: "phrase" }.into())
    }

    /// Composes a snippet and adds it to the library. Returns the registered
    /// [Snippet] rather than its composer, which is consumed by registration.
    pub fn snippet<F>(&mut self, name: &str, f: F) -> anyhow::Result<&Snippet>
    where
        F: FnOnce(&mut SnippetContext) -> anyhow::Result<()>,
    {
        compose_into::<SnippetComposer, _>(self.model.snippets_mut(), name, f)
    }

    /// Composes a template and adds it to the library. Returns the registered
    /// [Template] rather than its composer, which is consumed by registration.
    pub fn template<F>(&mut self, name: &str, f: F) -> anyhow::Result<&Template>
    where
        F: FnOnce(&mut TemplateContext) -> anyhow::Result<()>,
    {
        compose_into::<TemplateComposer, _>(self.model.templates_mut(), name, f)
    }

    /// Composes a demo and adds it to the library. Returns the registered
    /// [Demo] rather than its composer, which is consumed by registration.
    pub fn demo<F>(&mut self, name: &str, f: F) -> anyhow::Result<&Demo>
    where
        F: FnOnce(&mut DemoContext) -> anyhow::Result<()>,
    {
        compose_into::<DemoComposer, _>(self.model.demos_mut(), name, f)
    }
}
