// Copyright (c) 2024 Mike Tsao

//! Settings that change how the orchestrator composes and renders. Intended to
//! be serialized.

use crate::prelude::*;
use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// Contains persistent orchestrator settings.
#[derive(Debug, Clone, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// The library a score entry uses when it doesn't name one.
    #[serde(default = "Settings::default_library_default")]
    #[derivative(Default(value = "Settings::default_library_default()"))]
    default_library: String,

    /// The template whose source seeds new files.
    #[serde(default = "Settings::new_file_template_default")]
    #[derivative(Default(value = "Settings::new_file_template_default()"))]
    new_file_template: String,

    /// Whether a render subscribes to the driver's position updates.
    #[serde(default = "Settings::report_positions_default")]
    #[derivative(Default(value = "true"))]
    report_positions: bool,

    #[serde(skip)]
    has_been_saved: bool,
}
impl HasSettings for Settings {
    fn has_been_saved(&self) -> bool {
        self.has_been_saved
    }

    fn needs_save(&mut self) {
        self.has_been_saved = false;
    }

    fn mark_clean(&mut self) {
        self.has_been_saved = true;
    }
}
impl Settings {
    fn default_library_default() -> String {
        "core".to_string()
    }
    fn new_file_template_default() -> String {
        "blank".to_string()
    }
    fn report_positions_default() -> bool {
        true
    }

    /// Reads settings from JSON. Missing fields take their defaults.
    pub fn load_from_json(json: &str) -> anyhow::Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.mark_clean();
        Ok(settings)
    }

    /// Writes settings as JSON and marks them clean.
    pub fn to_json(&mut self) -> anyhow::Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        self.mark_clean();
        Ok(json)
    }

    #[allow(missing_docs)]
    pub fn default_library(&self) -> &str {
        &self.default_library
    }
    /// Updates the field and marks the struct eligible to save.
    pub fn set_default_library(&mut self, library: &str) {
        if library != self.default_library {
            self.default_library = library.to_string();
            self.needs_save();
        }
    }

    #[allow(missing_docs)]
    pub fn new_file_template(&self) -> &str {
        &self.new_file_template
    }
    /// Updates the field and marks the struct eligible to save.
    pub fn set_new_file_template(&mut self, template: &str) {
        if template != self.new_file_template {
            self.new_file_template = template.to_string();
            self.needs_save();
        }
    }

    #[allow(missing_docs)]
    pub fn report_positions(&self) -> bool {
        self.report_positions
    }
    /// Updates the field and marks the struct eligible to save.
    pub fn set_report_positions(&mut self, report: bool) {
        if report != self.report_positions {
            self.report_positions = report;
            self.needs_save();
        }
    }
}
