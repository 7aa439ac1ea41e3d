// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;

/// Builds a [SessionModel] by running an author's function against a
/// [SessionContext].
#[derive(Debug)]
pub struct SessionComposer {
    model: SessionModel,
}
impl Composer for SessionComposer {
    type Model = SessionModel;
    type Context = SessionContext;

    fn begin(name: &str) -> Result<Self::Context, ComposerError> {
        Ok(SessionContext {
            model: SessionModel::new_with(name)?,
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

/// Composes a session called `name`.
pub fn session<F>(name: &str, f: F) -> anyhow::Result<SessionComposer>
where
    F: FnOnce(&mut SessionContext) -> anyhow::Result<()>,
{
    SessionComposer::compose(name, f)
}

/// The verbs available while composing a session.
#[derive(Debug)]
pub struct SessionContext {
    model: SessionModel,
}
impl SessionContext {
    /// The name of the session being composed.
    pub fn name(&self) -> &str {
        self.model.name()
    }

    /// The session as composed so far.
    pub fn model(&self) -> &SessionModel {
        &self.model
    }

    /// Adds an instrument whose builder is `f`.
    pub fn instrument<F>(&mut self, name: &str, f: F) -> anyhow::Result<&Instrument>
    where
        F: Fn() -> anyhow::Result<EngineNode> + Send + Sync + 'static,
    {
        let instrument = Instrument::new_with(name, f)?;
        Ok(self.model.add_instrument(instrument)?)
    }

    /// Adds an effect whose builder is `f`.
    pub fn effect<F>(&mut self, name: &str, f: F) -> anyhow::Result<&Effect>
    where
        F: Fn() -> anyhow::Result<EngineNode> + Send + Sync + 'static,
    {
        let effect = Effect::new_with(name, f)?;
        Ok(self.model.add_effect(effect)?)
    }

    /// Adds a copy of the library's instrument `key`, calling it `name` in
    /// this session. The copy shares the library's builder.
    pub fn use_instrument(
        &mut self,
        library: &LibraryModel,
        key: &str,
        name: &str,
    ) -> anyhow::Result<&Instrument> {
        let Some(source) = library.instruments().get(key) else {
            return Err(ComposerError::Authoring(format!(
                "library '{}' has no instrument '{key}'",
                library.name()
            ))
            .into());
        };
        let instrument = source.renamed(name)?;
        Ok(self.model.add_instrument(instrument)?)
    }

    /// Adds a copy of the library's effect `key`, calling it `name` in this
    /// session.
    pub fn use_effect(
        &mut self,
        library: &LibraryModel,
        key: &str,
        name: &str,
    ) -> anyhow::Result<&Effect> {
        let Some(source) = library.effects().get(key) else {
            return Err(ComposerError::Authoring(format!(
                "library '{}' has no effect '{key}'",
                library.name()
            ))
            .into());
        };
        let effect = source.renamed(name)?;
        Ok(self.model.add_effect(effect)?)
    }

    /// Appends a patch. Its endpoints don't have to exist yet, or ever.
    pub fn patch(&mut self, patch: Patch) -> &mut Self {
        log::debug!(
            "patching {} '{}' -> {} '{}'",
            patch.input_type,
            patch.input,
            patch.output_type,
            patch.output
        );
        self.model.add_patch(patch);
        self
    }

    /// Not implemented. Always fails without adding anything.
    pub fn track<F>(&mut self, name: &str, _f: F) -> anyhow::Result<&Track>
    where
        F: Fn() -> anyhow::Result<EngineNode> + Send + Sync + 'static,
    {
        log::debug!("rejecting track '{name}'");
        Err(ComposerError::NotImplemented { verb: "track" }.into())
    }

    /// Not implemented. Always fails without adding anything.
    pub fn phrase<F>(&mut self, name: &str, _f: F) -> anyhow::Result<()> {
        log::debug!("rejecting phrase '{name}'");
        Err(ComposerError::NotImplemented { verb: "phrase" }.into())
    }
}
