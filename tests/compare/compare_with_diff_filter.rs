use crate::common::command::{
    MAIN_FEATURE_HEADERS, read_report, run_branchdiff_command, swapped_library_repository_dir,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("A", ",,,,lib/b.SO,SO,15/01/2023,2\n")]
#[case("d", "lib/a.SO,SO,15/01/2023,1,,,,\n")]
#[case("MR", "")]
fn compare_with_diff_filter(
    swapped_library_repository_dir: TempDir,
    #[case] filter: &str,
    #[case] rows: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = swapped_library_repository_dir.path();

    run_branchdiff_command(dir, &["-s", "main", "-t", "feature", "--diff-filter", filter])
        .assert()
        .success();

    assert_eq!(
        read_report(&dir.join("comparison.csv")),
        format!("{MAIN_FEATURE_HEADERS}{rows}")
    );

    Ok(())
}

#[rstest]
fn compare_rejects_unknown_diff_filter(
    swapped_library_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = swapped_library_repository_dir.path();

    run_branchdiff_command(dir, &["-s", "main", "-t", "feature", "--diff-filter", "AX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid diff filter"));

    assert!(!dir.join("comparison.csv").exists());

    Ok(())
}
