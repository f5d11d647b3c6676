//! CLI test cases.
//!
//! These run the compiled binary against synthetic documents built with the
//! same libraries the extractors read with. Tests that need the `tesseract`
//! binary are marked `#[ignore]` so the rest of the suite runs anywhere.

use std::{fs, io::Write, path::Path, process::Command};

use assert_cmd::prelude::*;
use predicates::prelude::*;

/// Create a new `Command` with our binary.
fn cmd() -> Command {
    Command::cargo_bin("docharvest").unwrap()
}

/// Build a DOCX-shaped archive with the given media entries.
fn write_docx(path: &Path, media: &[(&str, &[u8])]) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(b"<document/>").unwrap();
    for &(name, data) in media {
        writer
            .start_file(format!("word/media/{name}"), options)
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn test_help() {
    cmd().arg("--help").assert().success();
}

#[test]
fn test_version() {
    cmd().arg("--version").assert().success();
}

#[test]
fn extract_rejects_unsupported_formats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"hello").unwrap();

    cmd()
        .arg("extract")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document format"));
}

#[test]
fn extract_copies_docx_media_into_done() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(
        &dir.path().join("report.docx"),
        &[("image1.png", b"png-bytes"), ("photo.jpeg", b"jpeg-bytes")],
    );

    cmd()
        .current_dir(dir.path())
        .arg("extract")
        .arg("report.docx")
        .assert()
        .success()
        .stdout(predicate::str::contains("extracted 2 image(s)"));

    let out = dir.path().join("done").join("report");
    assert_eq!(fs::read(out.join("image1.png")).unwrap(), b"png-bytes");
    assert_eq!(fs::read(out.join("photo.jpeg")).unwrap(), b"jpeg-bytes");
    assert!(out.join("manifest.json").is_file());
}

#[test]
fn extract_without_arguments_discovers_documents() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("a.docx"), &[("pic.png", b"bytes")]);
    write_docx(&dir.path().join("b.docx"), &[]);

    cmd()
        .current_dir(dir.path())
        .arg("extract")
        .assert()
        .success()
        .stdout(predicate::str::contains("extracted 1 image(s)"))
        .stdout(predicate::str::contains("no images found in"));

    assert!(dir.path().join("done").join("a").join("pic.png").is_file());
    assert!(dir.path().join("done").join("b").is_dir());
}

#[test]
fn extract_reports_empty_directories() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .arg("extract")
        .assert()
        .success()
        .stdout(predicate::str::contains("no documents"));
}

#[test]
fn list_shows_documents_and_folders() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("report.docx"), &[]);
    fs::create_dir_all(dir.path().join("done").join("older")).unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("report.docx"))
        .stdout(predicate::str::contains("older"));
}

#[test]
#[ignore = "requires tesseract to be installed"]
fn check_reports_the_installed_engine() {
    cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("found"));
}

#[test]
#[ignore = "requires tesseract to be installed"]
fn ocr_reports_folders_without_images() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("empty");
    fs::create_dir(&folder).unwrap();

    cmd()
        .arg("ocr")
        .arg(&folder)
        .assert()
        .success()
        .stdout(predicate::str::contains("no text recognized"));
}
