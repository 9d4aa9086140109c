//! Integration tests for working-directory staging.
//!
//! Uses tempfile for testing the recursive copy and its exclusions.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use maglaunch::runtime::stage_workdir;
use std::path::Path;
use tempfile::TempDir;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "x").unwrap();
}

#[test]
fn stages_nested_tree() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let shared = temp.path().join("shared");
    touch(&home.join("main.nf"));
    touch(&home.join("conf/base.config"));
    touch(&home.join("assets/ncbi_genome_infos.csv"));

    stage_workdir(&home, &shared).unwrap();

    assert!(shared.join("main.nf").exists());
    assert!(shared.join("conf/base.config").exists());
    assert!(shared.join("assets/ncbi_genome_infos.csv").exists());
}

#[test]
fn skips_ignored_names_at_any_depth() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let shared = temp.path().join("shared");
    touch(&home.join("main.nf"));
    touch(&home.join("work/intermediate.bin"));
    touch(&home.join(".nextflow/history"));
    touch(&home.join("sub/results/report.html"));
    touch(&home.join("miniconda/bin/python"));

    stage_workdir(&home, &shared).unwrap();

    assert!(shared.join("main.nf").exists());
    assert!(!shared.join("work").exists());
    assert!(!shared.join(".nextflow").exists());
    assert!(shared.join("sub").exists());
    assert!(!shared.join("sub/results").exists());
    assert!(!shared.join("miniconda").exists());
}

#[test]
fn merges_into_existing_tree() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let shared = temp.path().join("shared");
    touch(&home.join("main.nf"));
    touch(&shared.join("pre-existing.txt"));

    stage_workdir(&home, &shared).unwrap();

    assert!(shared.join("main.nf").exists());
    assert!(shared.join("pre-existing.txt").exists());
}

#[test]
fn skips_dangling_symlinks() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let shared = temp.path().join("shared");
    touch(&home.join("main.nf"));
    std::os::unix::fs::symlink(temp.path().join("gone"), home.join("dangling")).unwrap();

    stage_workdir(&home, &shared).unwrap();

    assert!(shared.join("main.nf").exists());
    assert!(!shared.join("dangling").exists());
}

#[test]
fn follows_live_symlinks() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let shared = temp.path().join("shared");
    let target = temp.path().join("target.txt");
    touch(&target);
    std::fs::create_dir_all(&home).unwrap();
    std::os::unix::fs::symlink(&target, home.join("linked.txt")).unwrap();

    stage_workdir(&home, &shared).unwrap();

    assert!(shared.join("linked.txt").exists());
    assert!(!shared.join("linked.txt").is_symlink());
}
