//! Integration tests for M3U export and import
//!
//! Writes REAL files into a temp directory and reads them back.

use mixtape_builder::{BuilderConfig, PlaylistBuilder};
use mixtape_cli::{copy_audio_files, DirectoryExport, M3uCodec};
use mixtape_core::Track;
use std::path::PathBuf;

fn create_test_builder(names: &[(&str, f64)]) -> PlaylistBuilder {
    let mut builder = PlaylistBuilder::new(BuilderConfig::default());
    let ids = builder.add_tracks(
        names
            .iter()
            .map(|(name, duration)| Track::from_upload(PathBuf::from(format!("/music/{}", name)), *duration))
            .collect(),
    );
    for id in &ids {
        builder.add_to_playlist(id).unwrap();
    }
    builder
}

#[test]
fn test_export_writes_m3u_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut builder = create_test_builder(&[("intro.mp3", 184.0), ("mystery.flac", 0.0)]);
    builder.rename_playlist("Road Trip").unwrap();

    let target = DirectoryExport::new(temp_dir.path());
    let file_name = builder.export_to(&target, Some("/media/usb")).unwrap();
    assert_eq!(file_name, "Road Trip.m3u");

    let content = std::fs::read_to_string(temp_dir.path().join("Road Trip.m3u")).unwrap();
    assert_eq!(
        content,
        "#EXTM3U\n\
         #EXTINF:184,intro\n/media/usb/intro.mp3\n\
         #EXTINF:-1,mystery\n/media/usb/mystery.flac\n"
    );
}

#[test]
fn test_export_creates_missing_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out = temp_dir.path().join("nested").join("exports");
    let builder = create_test_builder(&[("a.mp3", 1.0)]);

    builder.export_to(&DirectoryExport::new(&out), None).unwrap();
    let content = std::fs::read_to_string(out.join("My Playlist.m3u")).unwrap();
    assert!(content.ends_with("a.mp3\n"));
}

#[test]
fn test_exported_file_imports_back() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_test_builder(&[("one.mp3", 60.0), ("two.mp3", 60.0), ("one.mp3", 60.0)]);
    source
        .export_to(&DirectoryExport::new(temp_dir.path()), Some("C:\\Music"))
        .unwrap();
    let content = std::fs::read_to_string(temp_dir.path().join("My Playlist.m3u")).unwrap();

    let mut target = create_test_builder(&[("two.mp3", 60.0), ("one.mp3", 60.0)]);
    target.clear_playlist();
    let report = target.import_playlist(&content, &M3uCodec::new());

    assert_eq!(report.matched, 3);
    assert_eq!(report.unmatched, 0);
    let names: Vec<_> = target.playlist().entries().iter().map(|e| e.name.clone()).collect();
    assert_eq!(names, vec!["one", "two", "one"]);
}

#[tokio::test]
async fn test_copy_audio_files_once_per_source() {
    let source_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let path = source_dir.path().join("loop.wav");
    std::fs::write(&path, b"RIFF").unwrap();

    let mut builder = PlaylistBuilder::new(BuilderConfig::default());
    let ids = builder.add_tracks(vec![Track::from_upload(path, 4.0)]);
    builder.add_to_playlist(&ids[0]).unwrap();
    builder.add_to_playlist(&ids[0]).unwrap();

    let copied = copy_audio_files(builder.playlist().entries(), out_dir.path())
        .await
        .unwrap();
    assert_eq!(copied, 1);
    assert_eq!(std::fs::read(out_dir.path().join("loop.wav")).unwrap(), b"RIFF");
}
