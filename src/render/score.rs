// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// One node in a [Score]: a library entry used under a session-local name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeDecl {
    /// The node's name in the session.
    pub name: String,
    /// The library entry to copy.
    #[serde(rename = "use")]
    pub uses: String,
    /// Which library to copy from. Absent means the default library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
}

/// A parsed score: the source code an author writes to describe a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Score {
    #[allow(missing_docs)]
    #[serde(default = "Score::default_session_name")]
    pub session: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub instruments: Vec<NodeDecl>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub effects: Vec<NodeDecl>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub patches: Vec<Patch>,
    /// Tracks aren't supported yet. Any entry here fails composition.
    #[serde(default)]
    pub tracks: Vec<serde_json::Value>,
    /// Phrases aren't supported yet. Any entry here fails composition.
    #[serde(default)]
    pub phrases: Vec<serde_json::Value>,
}
impl Score {
    fn default_session_name() -> String {
        "untitled".to_string()
    }

    /// Parses score source code.
    pub fn parse(code: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(code)?)
    }

    /// Composes the session this score describes. Node entries without a
    /// library draw from `default_library`.
    pub fn compose(
        &self,
        libraries: &[LibraryModel],
        default_library: &str,
    ) -> anyhow::Result<SessionComposer> {
        session(&self.session, |s| {
            for decl in &self.instruments {
                let library = Self::find_library(libraries, decl, default_library)?;
                s.use_instrument(library, &decl.uses, &decl.name)?;
            }
            for decl in &self.effects {
                let library = Self::find_library(libraries, decl, default_library)?;
                s.use_effect(library, &decl.uses, &decl.name)?;
            }
            for patch in &self.patches {
                s.patch(patch.clone());
            }
            if let Some(track) = self.tracks.first() {
                s.track(Self::entry_name(track), || {
                    Err(anyhow::anyhow!("tracks can't be built"))
                })?;
            }
            if let Some(phrase) = self.phrases.first() {
                s.phrase(Self::entry_name(phrase), ())?;
            }
            Ok(())
        })
    }

    fn entry_name(entry: &serde_json::Value) -> &str {
        entry
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unnamed")
    }

    fn find_library<'a>(
        libraries: &'a [LibraryModel],
        decl: &NodeDecl,
        default_library: &str,
    ) -> Result<&'a LibraryModel, ComposerError> {
        let name = decl.library.as_deref().unwrap_or(default_library);
        libraries
            .iter()
            .find(|l| l.name() == name)
            .ok_or_else(|| {
                ComposerError::Authoring(format!(
                    "'{}' wants library '{name}', which isn't loaded",
                    decl.name
                ))
            })
    }
}
