// Copyright (c) 2024 Mike Tsao

use crate::{
    model::{DemoBuilder, SnippetBuilder, TemplateBuilder},
    prelude::*,
};

macro_rules! record_composer {
    ($(#[$doc:meta])* $composer:ident, $context:ident, $model:ident, $builder:ident) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $composer {
            model: $model,
        }

        #[doc = concat!("The verbs available while composing a [", stringify!($model), "].")]
        #[derive(Debug)]
        pub struct $context {
            builder: $builder,
        }
        impl $context {
            /// Sets the description.
            pub fn description(&mut self, text: &str) -> &mut Self {
                self.builder.description(text);
                self
            }

            /// Sets the score source.
            pub fn source(&mut self, text: &str) -> &mut Self {
                self.builder.source(text);
                self
            }
        }

        impl Composer for $composer {
            type Model = $model;
            type Context = $context;

            fn begin(name: &str) -> Result<Self::Context, ComposerError> {
                let mut builder = $builder::default();
                builder.name(name);
                Ok($context { builder })
            }

            fn finish(context: Self::Context) -> Result<Self, ComposerError> {
                Ok(Self {
                    model: context.builder.build()?,
                })
            }

            fn model(&self) -> &Self::Model {
                &self.model
            }

            fn into_model(self) -> Self::Model {
                self.model
            }
        }
    };
}

record_composer!(
    /// Composes a [Snippet].
    SnippetComposer,
    SnippetContext,
    Snippet,
    SnippetBuilder
);
record_composer!(
    /// Composes a [Template].
    TemplateComposer,
    TemplateContext,
    Template,
    TemplateBuilder
);
record_composer!(
    /// Composes a [Demo].
    DemoComposer,
    DemoContext,
    Demo,
    DemoBuilder
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_compose_from_their_context() {
        let c = TemplateComposer::compose("piano", |t| {
            t.description("One piano into a reverb.")
                .source(r#"{"session": "untitled"}"#);
            Ok(())
        })
        .unwrap();
        assert_eq!(c.model().name(), "piano");
        assert_eq!(c.model().description(), "One piano into a reverb.");
        assert_eq!(c.model().source(), r#"{"session": "untitled"}"#);
    }

    #[test]
    fn empty_name_fails_when_sealed() {
        let e = DemoComposer::compose("", |d| {
            d.source("{}");
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(
            e.downcast_ref::<ComposerError>(),
            Some(ComposerError::Validation {
                kind: "demo",
                property: "name",
                ..
            })
        ));
    }

    #[test]
    fn author_errors_pass_through() {
        let e = SnippetComposer::compose("chain", |_| Err(anyhow::anyhow!("out of ideas")))
            .unwrap_err();
        assert!(e.downcast_ref::<ComposerError>().is_none());
        assert_eq!(e.to_string(), "out of ideas");
    }
}
