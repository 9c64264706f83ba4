mod common;

use assert_cmd::Command;
use common::{page_count, pdf_with_pages, sample_project};
use evacplan::project::{CompressionMode, StoreOptions, save_project};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn evacplan_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("evacplan").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn write_sample(dir: &Path) -> PathBuf {
    let path = dir.join("office.json");
    let options = StoreOptions {
        compression: CompressionMode::Off,
        ..StoreOptions::default()
    };
    save_project(&path, &sample_project(), &options).expect("save project");
    path
}

#[test]
fn help_prints_about() {
    let temp = TempDir::new().expect("tempdir");
    evacplan_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Draw evacuation plans over floor-plan PDFs",
        ));
}

#[test]
fn inspect_prints_counts() {
    let temp = TempDir::new().expect("tempdir");
    let project = write_sample(temp.path());

    evacplan_cmd(temp.path())
        .arg("inspect")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: Office"))
        .stdout(predicate::str::contains("Shapes: 1"))
        .stdout(predicate::str::contains("Symbols: 1"))
        .stdout(predicate::str::contains("Walls: 1"));
}

#[test]
fn inspect_missing_project_fails() {
    let temp = TempDir::new().expect("tempdir");
    evacplan_cmd(temp.path())
        .arg("inspect")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to stat project file"));
}

#[test]
fn init_config_writes_once() {
    let temp = TempDir::new().expect("tempdir");
    evacplan_cmd(temp.path())
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let written = std::fs::read_to_string(temp.path().join("evacplan").join("config.toml"))
        .expect("config written");
    assert!(written.contains("[walls]"));

    evacplan_cmd(temp.path())
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn export_without_pdf_fails() {
    let temp = TempDir::new().expect("tempdir");
    let project = write_sample(temp.path());

    evacplan_cmd(temp.path())
        .arg("export")
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no floor-plan PDF"));
}

#[test]
fn export_writes_default_name_next_to_project() {
    let temp = TempDir::new().expect("tempdir");
    let project = write_sample(temp.path());
    let pdf = temp.path().join("plan.pdf");
    std::fs::write(&pdf, pdf_with_pages(1, 595, 842)).expect("write pdf");

    evacplan_cmd(temp.path())
        .arg("export")
        .arg(&project)
        .arg("--pdf")
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("Office-evacuation-plan.pdf"));

    let exported = std::fs::read(temp.path().join("Office-evacuation-plan.pdf")).expect("exported");
    assert_eq!(page_count(&exported), 1);
}

#[test]
fn export_name_stays_in_project_dir() {
    let temp = TempDir::new().expect("tempdir");
    let dir = temp.path().join("plans");
    std::fs::create_dir(&dir).expect("mkdir");
    let project_path = dir.join("escape.json");
    let mut project = sample_project();
    project.name = "../escape".to_string();
    save_project(&project_path, &project, &StoreOptions::default()).expect("save project");
    let pdf = temp.path().join("plan.pdf");
    std::fs::write(&pdf, pdf_with_pages(1, 595, 842)).expect("write pdf");

    evacplan_cmd(temp.path())
        .arg("export")
        .arg(&project_path)
        .arg("--pdf")
        .arg(&pdf)
        .assert()
        .success();

    assert!(dir.join(".._escape-evacuation-plan.pdf").exists());
    assert!(!temp.path().join("escape-evacuation-plan.pdf").exists());
}

#[test]
fn export_rejects_page_less_pdf() {
    let temp = TempDir::new().expect("tempdir");
    let project = write_sample(temp.path());
    let pdf = temp.path().join("empty.pdf");
    std::fs::write(&pdf, pdf_with_pages(0, 595, 842)).expect("write pdf");

    evacplan_cmd(temp.path())
        .args(["export", "--pdf"])
        .arg(&pdf)
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not have any pages"));
}

#[test]
fn render_writes_png() {
    let temp = TempDir::new().expect("tempdir");
    let project = write_sample(temp.path());
    let output = temp.path().join("office.png");

    evacplan_cmd(temp.path())
        .arg("render")
        .arg(&project)
        .arg("-o")
        .arg(&output)
        .args(["--width", "320", "--height", "240"])
        .assert()
        .success();

    let bytes = std::fs::read(&output).expect("png written");
    assert_eq!(&bytes[..4], b"\x89PNG");
}
