use crate::common::command::{git, init_repository_dir, read_report, run_branchdiff_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn compare_identical_branches_writes_headers_only(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    git(dir, &["branch", "develop"]);

    run_branchdiff_command(dir, &["-s", "main", "-t", "develop"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Comparing branches main and develop in .",
        ))
        .stdout(predicate::str::contains(
            "Successfully wrote comparison to comparison.csv",
        ));

    assert_eq!(
        read_report(&dir.join("comparison.csv")),
        "main,,,,develop,,,\n\
         Library/Object,Type,Compile/Promote Date,Size (KBytes),\
         Library/Object,Type,Compile/Promote Date,Size (KBytes)\n"
    );

    Ok(())
}
