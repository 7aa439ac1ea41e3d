// Copyright (c) 2024 Mike Tsao

use harmonicon::prelude::*;
use more_asserts::assert_ge;

fn node(key: &'static str) -> impl Fn() -> anyhow::Result<EngineNode> + Send + Sync {
    move || Ok(EngineNodeBuilder::default().key(key).build()?)
}

// A library with a bit of everything, exported and brought back.
#[test]
fn library_survives_export_and_import() {
    let _ = env_logger::builder().is_test(true).try_init();

    let composer = library("band", |l| {
        l.instrument("bass", node("b1"))?;
        assert!(l.instrument("bass", node("b2")).is_err());
        l.instrument("keys", node("sampler"))?;
        l.effect("room", node("reverb"))?;
        l.snippet("chain", |s| {
            s.description("drive into room").source("{}");
            Ok(())
        })?;
        l.template("starter", |t| {
            t.source(r#"{"session": "new"}"#);
            Ok(())
        })?;
        l.demo("showcase", |d| {
            d.description("all of it");
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    let model = composer.model();
    assert_eq!(model.instruments().len(), 2);
    assert_eq!(
        model
            .instruments()
            .get("bass")
            .unwrap()
            .instantiate()
            .unwrap()
            .key,
        EngineKey::from("b1"),
        "the first bass should win"
    );

    let imported = LibraryModel::import(&model.export().unwrap()).unwrap();
    assert_eq!(imported.name(), "band");
    assert_eq!(
        imported.instruments().names().collect::<Vec<_>>(),
        vec!["bass", "keys"]
    );
    assert_eq!(imported.effects().first().unwrap().name(), "room");
    assert_eq!(imported.snippets().get("chain").unwrap().description(), "drive into room");
    assert_eq!(
        imported.templates().get("starter").unwrap().source(),
        r#"{"session": "new"}"#
    );
    assert_eq!(imported.demos().get("showcase").unwrap().source(), "");
    assert!(imported.instruments().iter().all(|i| i.build_fn().is_none()));
}

#[test]
fn patch_resolution_follows_types_and_names() {
    let composer = session("s", |s| {
        s.instrument("synth1", node("mono-synth"))?;
        s.effect("reverb1", node("reverb"))?;
        s.effect("delay1", node("delay"))?;
        s.patch(Patch::new_with("instrument", "synth1", "effect", "reverb1"))
            .patch(Patch::new_with("effect", "reverb1", "effect", "delay1"))
            .patch(Patch::new_with("effect", "synth1", "effect", "delay1"))
            .patch(Patch::new_with("instrument", "ghost", "effect", "delay1"));
        Ok(())
    })
    .unwrap();
    let s = composer.model();

    let reverb = s.effects().get("reverb1").unwrap();
    let patches = reverb.patches(s);
    assert_eq!(patches.inputs.len(), 1);
    assert_eq!(patches.inputs[0].input, "synth1");
    assert_eq!(patches.outputs.len(), 1);
    assert_eq!(patches.outputs[0].output, "delay1");

    let synth = s.instruments().get("synth1").unwrap();
    assert_eq!(
        synth.outputs(s).len(),
        1,
        "an effect-typed patch from 'synth1' isn't the instrument's"
    );

    let delay = s.effects().get("delay1").unwrap();
    assert_eq!(delay.inputs(s).len(), 3, "dangling patches still resolve by name");
    assert!(delay.outputs(s).is_empty());
    assert_ge!(s.dangling_patches().count(), 2);
}

#[test]
fn core_library_feeds_a_session() {
    let core = CoreLibrary::compose().unwrap().into_model();
    let composer = session("quartet", |s| {
        for (i, key) in ["violin", "violin", "flute", "piano"].iter().enumerate() {
            s.use_instrument(&core, key, &format!("player-{i}"))?;
        }
        s.use_effect(&core, "reverb", "hall")?;
        for i in 0..4 {
            s.patch(Patch::new_with(
                "instrument",
                &format!("player-{i}"),
                "effect",
                "hall",
            ));
        }
        Ok(())
    })
    .unwrap();

    let model = composer.into_model();
    let hall = model.effects().get("hall").unwrap();
    assert_eq!(hall.inputs(&model).len(), 4);
    assert!(model.dangling_patches().next().is_none());
    assert!(model
        .instruments()
        .iter()
        .all(|i| i.session() == Some("quartet")));
}
