use crate::common::command::{
    MAIN_FEATURE_HEADERS, read_report, run_branchdiff_command, swapped_library_repository_dir,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn compare_in_other_directory_with_custom_output(
    swapped_library_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = TempDir::new()?;
    let repository = swapped_library_repository_dir.path().display().to_string();

    run_branchdiff_command(
        work_dir.path(),
        &["-s", "main", "-t", "feature", "-d", &repository, "-o", "release"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(format!(
        "Comparing branches main and feature in {repository}"
    )))
    .stdout(predicate::str::contains(
        "Successfully wrote comparison to release.csv",
    ));

    assert!(!swapped_library_repository_dir.path().join("release.csv").exists());
    assert_eq!(
        read_report(&work_dir.path().join("release.csv")),
        format!(
            "{MAIN_FEATURE_HEADERS}\
             lib/a.SO,SO,15/01/2023,1,,,,\n\
             ,,,,lib/b.SO,SO,15/01/2023,2\n"
        )
    );

    Ok(())
}

#[rstest]
fn compare_overwrites_existing_report(
    swapped_library_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = swapped_library_repository_dir.path();
    std::fs::write(dir.join("comparison.csv"), "stale\n")?;

    run_branchdiff_command(dir, &["-s", "main", "-t", "feature"])
        .assert()
        .success();

    assert!(read_report(&dir.join("comparison.csv")).starts_with(MAIN_FEATURE_HEADERS));

    Ok(())
}
