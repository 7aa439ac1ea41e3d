// Copyright (c) 2024 Mike Tsao

//! Rendering turns score source code into a composed session and then into
//! instructions for the audio engine.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{render, render_score, Rendered, RenderedNode, Renderer, Score};
}

pub use renderer::{RenderedNode, Renderer};
pub use score::{NodeDecl, Score};

mod renderer;
mod score;

use crate::{catalog::CoreLibrary, orchestration::AudioDriver, prelude::*};

/// The result of a successful render.
#[derive(Debug)]
pub struct Rendered {
    /// The composer that built the session.
    pub composer: SessionComposer,
    /// The engine instructions derived from the session.
    pub renderer: Renderer,
}

/// Parses `code`, composes its session from `libraries`, and hands the result
/// to `driver`. Entries that don't name a library use the `core` library.
///
/// The driver must already hold an audio buffer.
pub fn render(
    code: &str,
    libraries: &[LibraryModel],
    driver: &mut dyn AudioDriver,
) -> anyhow::Result<Rendered> {
    render_score(&Score::parse(code)?, libraries, CoreLibrary::NAME, driver)
}

/// Like [render()], but starts from a parsed [Score] and a chosen default
/// library.
pub fn render_score(
    score: &Score,
    libraries: &[LibraryModel],
    default_library: &str,
    driver: &mut dyn AudioDriver,
) -> anyhow::Result<Rendered> {
    let composer = score.compose(libraries, default_library)?;
    let renderer = Renderer::new_with(composer.model())?;
    driver.load_graph(renderer.nodes())?;
    Ok(Rendered { composer, renderer })
}
