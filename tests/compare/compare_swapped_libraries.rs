use crate::common::command::{
    MAIN_FEATURE_HEADERS, read_report, run_branchdiff_command, swapped_library_repository_dir,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn compare_swapped_libraries(
    swapped_library_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = swapped_library_repository_dir.path();

    run_branchdiff_command(dir, &["--source", "main", "--target", "feature"])
        .assert()
        .success();

    assert_eq!(
        read_report(&dir.join("comparison.csv")),
        format!(
            "{MAIN_FEATURE_HEADERS}\
             lib/a.SO,SO,15/01/2023,1,,,,\n\
             ,,,,lib/b.SO,SO,15/01/2023,2\n"
        )
    );

    Ok(())
}

#[rstest]
fn compare_swapped_libraries_in_reverse(
    swapped_library_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = swapped_library_repository_dir.path();

    run_branchdiff_command(dir, &["-s", "feature", "-t", "main"])
        .assert()
        .success();

    assert_eq!(
        read_report(&dir.join("comparison.csv")),
        "feature,,,,main,,,\n\
         Library/Object,Type,Compile/Promote Date,Size (KBytes),\
         Library/Object,Type,Compile/Promote Date,Size (KBytes)\n\
         ,,,,lib/a.SO,SO,15/01/2023,1\n\
         lib/b.SO,SO,15/01/2023,2,,,,\n"
    );

    Ok(())
}
