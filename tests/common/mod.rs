//! Shared fixtures for integration tests.
//!
//! Builds the worked two-fragment media layout on disk: a synthetic source
//! file whose bytes are position-dependent (so extraction slices are easy to
//! verify) plus its side-car segment index manifest.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use frameforge::{MediaSource, RenderFormat, RenderRequest};

/// Source length: header(100) + moof0(20) + mdat0(5000) + moof1(20) + mdat1(5000).
pub const SOURCE_LEN: usize = 10_140;

/// Two fragments of 30 frames each at 30 fps.
pub const MANIFEST_JSON: &str = r#"{"segments":[
    {"name":"header","offset":0,"size":100},
    {"name":"moof","offset":100,"size":20,"frame_start":0,"frame_samples":30},
    {"name":"mdat","offset":120,"size":5000},
    {"name":"moof","offset":5120,"size":20,"frame_start":30,"frame_samples":30},
    {"name":"mdat","offset":5140,"size":5000}
]}"#;

pub fn source_bytes() -> Vec<u8> {
    (0..SOURCE_LEN as u32).map(|i| (i % 251) as u8).collect()
}

/// Write the synthetic source and manifest into `dir`, returning their paths.
pub fn write_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let source = dir.join("source.frag.mp4");
    let manifest = dir.join("source.index.json");
    std::fs::write(&source, source_bytes()).expect("write source fixture");
    std::fs::write(&manifest, MANIFEST_JSON).expect("write manifest fixture");
    (source, manifest)
}

/// An indexed 640x360 source at 30 fps over the fixture files.
pub fn indexed_source(dir: &Path) -> MediaSource {
    let (source, manifest) = write_fixture(dir);
    let index = frameforge_media::SegmentIndex::from_file(manifest).expect("parse fixture index");
    MediaSource::new(source, 30.0, 640, 360, Some(index)).expect("build fixture source")
}

/// The same source without an index, for whole-file fallback paths.
pub fn plain_source(dir: &Path) -> MediaSource {
    let (source, _) = write_fixture(dir);
    MediaSource::new(source, 30.0, 640, 360, None).expect("build fixture source")
}

/// A still-image render request for the given frames.
pub fn still_request(frames: &[u64]) -> RenderRequest {
    RenderRequest {
        frames: frames.to_vec(),
        regions: None,
        scale: None,
        format: RenderFormat::Png,
        fps: None,
        grid: None,
    }
}
