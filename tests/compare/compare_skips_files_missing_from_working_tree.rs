use crate::common::command::{
    git, git_commit, init_repository_dir, read_report, run_branchdiff_command,
};
use crate::common::file::{delete_path, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// `feature` adds `docs/file0.txt`..`docs/file9.txt`; two of them are then
/// removed from the working tree
#[fixture]
fn repository_with_missing_files(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();

    git(dir, &["checkout", "-q", "-b", "feature"]);
    write_generated_files(&dir.join("docs"), 10);
    git(dir, &["add", "docs"]);
    git_commit(dir, "Add docs");

    delete_path(&dir.join("docs").join("file3.txt"));
    delete_path(&dir.join("docs").join("file7.txt"));

    init_repository_dir
}

#[rstest]
fn compare_skips_files_missing_from_working_tree(
    repository_with_missing_files: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_missing_files.path();

    run_branchdiff_command(dir, &["-s", "main", "-t", "feature"])
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to process 2 changes"))
        .stderr(predicate::str::contains("docs/file3.txt"))
        .stderr(predicate::str::contains("docs/file7.txt"));

    let report = read_report(&dir.join("comparison.csv"));
    let listed = report
        .lines()
        .skip(2)
        .map(|line| line.trim_start_matches(',').split(',').next().unwrap_or_default())
        .collect::<Vec<_>>();

    assert_eq!(
        listed,
        vec![
            "docs/file0.txt",
            "docs/file1.txt",
            "docs/file2.txt",
            "docs/file4.txt",
            "docs/file5.txt",
            "docs/file6.txt",
            "docs/file8.txt",
            "docs/file9.txt",
        ]
    );

    Ok(())
}

#[rstest]
fn compare_in_strict_mode_fails_but_keeps_report(
    repository_with_missing_files: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_missing_files.path();

    run_branchdiff_command(dir, &["-s", "main", "-t", "feature", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to process 2 changes"));

    assert_eq!(read_report(&dir.join("comparison.csv")).lines().count(), 2 + 8);

    Ok(())
}
