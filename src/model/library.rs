// Copyright (c) 2024 Mike Tsao

use super::Collection;
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A named bundle of reusable entities. Sessions import instruments and
/// effects from libraries.
///
/// A [LibraryModel] is built once by a
/// [LibraryComposer](crate::composition::LibraryComposer) and is read-only
/// after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LibraryModel {
    name: String,
    #[serde(default)]
    instruments: Collection<Instrument>,
    #[serde(default)]
    effects: Collection<Effect>,
    #[serde(default)]
    snippets: Collection<Snippet>,
    #[serde(default)]
    templates: Collection<Template>,
    #[serde(default)]
    demos: Collection<Demo>,
}
impl Entity for LibraryModel {
    const KIND: &'static str = "library";

    fn name(&self) -> &str {
        &self.name
    }
}
impl LibraryModel {
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
            snippets: Default::default(),
            templates: Default::default(),
            demos: Default::default(),
        })
    }

    /// Serializes the library to JSON. Node builders aren't included.
    pub fn export(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Recreates a library from [LibraryModel::export()] output. Its nodes
    /// have no builders, so it can describe a library but can't render one.
    pub fn import(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str::<Self>(json)?)
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
    pub fn snippets(&self) -> &Collection<Snippet> {
        &self.snippets
    }
    #[allow(missing_docs)]
    pub fn templates(&self) -> &Collection<Template> {
        &self.templates
    }
    #[allow(missing_docs)]
    pub fn demos(&self) -> &Collection<Demo> {
        &self.demos
    }

    pub(crate) fn instruments_mut(&mut self) -> &mut Collection<Instrument> {
        &mut self.instruments
    }
    pub(crate) fn effects_mut(&mut self) -> &mut Collection<Effect> {
        &mut self.effects
    }
    pub(crate) fn snippets_mut(&mut self) -> &mut Collection<Snippet> {
        &mut self.snippets
    }
    pub(crate) fn templates_mut(&mut self) -> &mut Collection<Template> {
        &mut self.templates
    }
    pub(crate) fn demos_mut(&mut self) -> &mut Collection<Demo> {
        &mut self.demos
    }
}
