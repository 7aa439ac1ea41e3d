// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// Snippets, templates, and demos are all named pieces of score source with a
// description. They live in different collections and mean different things
// to the app.
macro_rules! record_model {
    ($(#[$doc:meta])* $name:ident, $builder:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
        #[builder(derive(Debug), build_fn(validate = "Self::validate", error = "ComposerError"))]
        #[serde(rename_all = "kebab-case")]
        pub struct $name {
            #[builder(setter(into))]
            name: String,

            #[builder(default, setter(into))]
            #[serde(default)]
            description: String,

            #[builder(default, setter(into))]
            #[serde(default)]
            source: String,
        }
        impl $builder {
            fn validate(&self) -> Result<(), ComposerError> {
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
        impl $name {
            /// A sentence or two about what this is for.
            pub fn description(&self) -> &str {
                &self.description
            }

            /// Score source code.
            pub fn source(&self) -> &str {
                &self.source
            }
        }
    };
}

record_model!(
    /// A reusable fragment of score source, such as a common effect chain.
    Snippet,
    SnippetBuilder,
    "snippet"
);
record_model!(
    /// The starting source of a new file.
    Template,
    TemplateBuilder,
    "template"
);
record_model!(
    /// A complete piece that shows off what the library can do.
    Demo,
    DemoBuilder,
    "demo"
);
