// Copyright (c) 2024 Mike Tsao

use harmonicon::prelude::*;
use std::sync::{Arc, Mutex};

fn core() -> Vec<LibraryModel> {
    vec![CoreLibrary::compose().unwrap().into_model()]
}

// Renders the kitchen-sync demo straight from the core library.
#[test]
fn demo_renders_through_the_core_library() {
    let _ = env_logger::builder().is_test(true).try_init();

    let libraries = core();
    let demo = libraries[0].demos().get("kitchen-sync").unwrap().source().to_string();
    let mut driver = SilentAudioDriver::default();
    driver.start_audio_buffer().unwrap();

    let rendered = render(&demo, &libraries, &mut driver).unwrap();
    assert_eq!(rendered.composer.model().name(), "kitchen-sync");
    assert_eq!(rendered.renderer.nodes().len(), 7);

    let hall = rendered
        .renderer
        .node(&PatchType::effect(), "hall")
        .unwrap();
    assert_eq!(hall.engine.key, EngineKey::from("reverb"));
    assert_eq!(
        hall.inputs.iter().map(|p| p.input.as_str()).collect::<Vec<_>>(),
        vec!["keys", "echo"]
    );
    assert_eq!(driver.graph(), rendered.renderer.nodes());
}

#[test]
fn exported_library_cannot_render() {
    let exported = CoreLibrary::compose().unwrap().model().export().unwrap();
    let libraries = vec![LibraryModel::import(&exported).unwrap()];
    let mut driver = SilentAudioDriver::default();
    driver.start_audio_buffer().unwrap();

    let e = render(
        r#"{"instruments": [{"name": "keys", "use": "piano"}]}"#,
        &libraries,
        &mut driver,
    )
    .unwrap_err();
    assert!(matches!(
        e.downcast_ref::<ComposerError>(),
        Some(ComposerError::Validation { property: "fn", .. })
    ));
}

// Walks an orchestrator through a typical editing session.
#[test]
fn orchestrator_edit_render_play() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut o = Orchestrator::new_with(
        Settings::load_from_json(r#"{"new-file-template": "piano"}"#).unwrap(),
        core(),
        SilentAudioDriver::default(),
        MemoryWorkspace::default(),
    );
    let events = Arc::new(Mutex::new(Vec::default()));
    for channel in [Channel::Error, Channel::Changed, Channel::TransportPosition] {
        let events = Arc::clone(&events);
        o.on(channel, move |e| events.lock().unwrap().push(e.clone()))
            .unwrap();
    }

    o.add_file();
    assert!(o.changed());
    o.play();
    assert_eq!(o.state(), OrchestratorState::Playing);
    assert!(!o.changed());
    assert_eq!(o.driver().graph().len(), 2, "the piano template has two nodes");

    o.driver_mut().advance_to(TransportPosition {
        measure: 4,
        beat: 0,
        subdivision: 0,
    });
    o.dispatch_transport_events();
    o.stop();

    let source = o.active_file().unwrap().source.replace("\"piano\" }", "\"organ\" }");
    o.set_file_source(&source);
    assert!(o.changed());

    let events = events.lock().unwrap();
    assert!(
        !events.iter().any(|e| matches!(e, Event::Error { .. })),
        "{events:?}"
    );
    let positions: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::TransportPosition(p) => Some(p.measure),
            _ => None,
        })
        .collect();
    assert_eq!(positions, vec![4, 0]);
    assert!(matches!(events.last(), Some(Event::Changed(true))));
}
