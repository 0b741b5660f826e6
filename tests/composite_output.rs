//! Composite selection: tile grids and animation pipelines.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;

use frameforge::{Engine, EngineConfig, Error, RenderFormat, TileGrid};
use frameforge_av::testing::ScriptedRunner;

fn engine_with(runner: Arc<ScriptedRunner>) -> Engine {
    let config: EngineConfig = serde_json::from_value(serde_json::json!({
        "tools": { "ffmpeg_path": std::env::current_exe().unwrap() }
    }))
    .unwrap();
    Engine::with_runner(&config, runner)
}

#[test]
fn five_stills_select_a_3x2_grid() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::indexed_source(dir.path());

    let runner = Arc::new(ScriptedRunner::touching_outputs());
    let engine = engine_with(Arc::clone(&runner));

    engine
        .render(&source, &common::still_request(&[0, 10, 20, 31, 42]))
        .unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1]
        .arguments()
        .windows(2)
        .any(|w| w == ["-vf", "tile=3x2"]));
}

#[test]
fn explicit_grid_overrides_the_automatic_one() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::indexed_source(dir.path());

    let runner = Arc::new(ScriptedRunner::touching_outputs());
    let engine = engine_with(Arc::clone(&runner));

    let mut request = common::still_request(&[0, 10, 20, 31]);
    request.grid = Some(TileGrid { cols: 4, rows: 1 });
    engine.render(&source, &request).unwrap();

    assert!(runner.calls()[1]
        .arguments()
        .windows(2)
        .any(|w| w == ["-vf", "tile=4x1"]));
}

#[test]
fn undersized_grid_is_a_range_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::indexed_source(dir.path());

    let runner = Arc::new(ScriptedRunner::touching_outputs());
    let engine = engine_with(Arc::clone(&runner));

    let mut request = common::still_request(&[0, 10, 20, 31, 42]);
    request.grid = Some(TileGrid { cols: 2, rows: 2 });
    let result = engine.render(&source, &request);
    assert_matches!(result, Err(Error::Range(_)));
}

#[test]
fn mp4_animation_stops_at_the_intermediate_video() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::indexed_source(dir.path());

    let runner = Arc::new(ScriptedRunner::touching_outputs());
    let engine = engine_with(Arc::clone(&runner));

    let mut request = common::still_request(&[0, 10, 20]);
    request.format = RenderFormat::Mp4;
    request.fps = Some(12.0);
    engine.render(&source, &request).unwrap();

    // One still batch, one mux; no palette passes.
    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1]
        .arguments()
        .windows(2)
        .any(|w| w == ["-framerate", "12"]));
    assert!(!calls[1].arguments().iter().any(|a| a.contains("palette")));
}

#[test]
fn gif_animation_adds_the_two_palette_passes() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::indexed_source(dir.path());

    let runner = Arc::new(ScriptedRunner::touching_outputs());
    let engine = engine_with(Arc::clone(&runner));

    let mut request = common::still_request(&[0, 10, 20]);
    request.format = RenderFormat::Gif;
    engine.render(&source, &request).unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls[2]
        .arguments()
        .windows(2)
        .any(|w| w == ["-vf", "palettegen"]));
    assert!(calls[3]
        .arguments()
        .windows(2)
        .any(|w| w == ["-lavfi", "paletteuse"]));
}

#[test]
fn animation_defaults_to_the_source_frame_rate() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::indexed_source(dir.path());

    let runner = Arc::new(ScriptedRunner::touching_outputs());
    let engine = engine_with(Arc::clone(&runner));

    let mut request = common::still_request(&[0, 10, 20]);
    request.format = RenderFormat::Mp4;
    engine.render(&source, &request).unwrap();

    assert!(runner.calls()[1]
        .arguments()
        .windows(2)
        .any(|w| w == ["-framerate", "30"]));
}

#[test]
fn animation_intermediates_are_png() {
    let dir = tempfile::tempdir().unwrap();
    let source = common::indexed_source(dir.path());

    let runner = Arc::new(ScriptedRunner::touching_outputs());
    let engine = engine_with(Arc::clone(&runner));

    let mut request = common::still_request(&[0, 10]);
    request.format = RenderFormat::Mp4;
    engine.render(&source, &request).unwrap();

    let batch_args = runner.calls()[0].arguments().to_vec();
    assert!(batch_args
        .iter()
        .any(|a| a.ends_with("still_00000.png")));
}
