use crate::common::command::{
    MAIN_FEATURE_HEADERS, git, git_commit, init_repository_dir, read_report,
    run_branchdiff_command,
};
use crate::common::file::pin_modified_date;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// `feature` tracks the content of `lib/a.SO` as `lib/c.SO` instead; the old
/// file is left on disk untracked
#[fixture]
fn repository_with_renamed_library(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();

    git(dir, &["checkout", "-q", "-b", "feature"]);
    std::fs::copy(dir.join("lib").join("a.SO"), dir.join("lib").join("c.SO"))
        .expect("Failed to copy library");
    git(dir, &["rm", "-q", "--cached", "lib/a.SO"]);
    git(dir, &["add", "lib/c.SO"]);
    git_commit(dir, "Rename library");

    pin_modified_date(&dir.join("lib").join("a.SO"), 2022, 12, 31);
    pin_modified_date(&dir.join("lib").join("c.SO"), 2023, 2, 1);

    init_repository_dir
}

#[rstest]
fn compare_with_renamed_file_reports_one_row(
    repository_with_renamed_library: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_renamed_library.path();

    run_branchdiff_command(dir, &["-s", "main", "-t", "feature"])
        .assert()
        .success();

    assert_eq!(
        read_report(&dir.join("comparison.csv")),
        format!("{MAIN_FEATURE_HEADERS}lib/a.SO,SO,31/12/2022,1,lib/c.SO,SO,01/02/2023,1\n")
    );

    Ok(())
}

#[rstest]
fn compare_without_renames_reports_deletion_and_addition(
    repository_with_renamed_library: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_renamed_library.path();

    run_branchdiff_command(dir, &["-s", "main", "-t", "feature", "--no-renames"])
        .assert()
        .success();

    assert_eq!(
        read_report(&dir.join("comparison.csv")),
        format!(
            "{MAIN_FEATURE_HEADERS}\
             lib/a.SO,SO,31/12/2022,1,,,,\n\
             ,,,,lib/c.SO,SO,01/02/2023,1\n"
        )
    );

    Ok(())
}
