// Copyright (c) 2024 Mike Tsao

//! Composers run an author's function against a fresh model and hand back the
//! finished result. Each kind of model has its own composer, and each
//! composer has its own context exposing only the verbs that make sense for
//! that kind.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        library, session, DemoComposer, LibraryComposer, LibraryContext, SessionComposer,
        SessionContext, SnippetComposer, TemplateComposer,
    };
}

pub use library::{library, LibraryComposer, LibraryContext};
pub use records::{
    DemoComposer, DemoContext, SnippetComposer, SnippetContext, TemplateComposer, TemplateContext,
};
pub use session::{session, SessionComposer, SessionContext};

mod library;
mod records;
mod session;

use crate::{model::Collection, prelude::*};

/// Composes a child model and registers it in `collection`. Nothing is
/// registered if composition fails.
pub(crate) fn compose_into<'c, C, F>(
    collection: &'c mut Collection<C::Model>,
    name: &str,
    f: F,
) -> anyhow::Result<&'c C::Model>
where
    C: Composer,
    F: FnOnce(&mut C::Context) -> anyhow::Result<()>,
{
    let composer = C::compose(name, f)?;
    Ok(collection.add(composer.into_model())?)
}
