use crate::common::command::{repository_dir, run_branchdiff_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn compare_outside_repository_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();

    run_branchdiff_command(dir, &["-s", "main", "-t", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository not found"));

    assert!(!dir.join("comparison.csv").exists());

    Ok(())
}

#[rstest]
fn compare_requires_both_branches(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_branchdiff_command(repository_dir.path(), &["-s", "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--target"));

    Ok(())
}
