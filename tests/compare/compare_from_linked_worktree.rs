use crate::common::command::{
    MAIN_FEATURE_HEADERS, git, git_commit, init_repository_dir, read_report,
    run_branchdiff_command,
};
use crate::common::file::{pin_modified_date, write_sized_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn compare_from_linked_worktree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    git(dir, &["checkout", "-q", "-b", "feature"]);
    write_sized_file(dir.join("lib").join("b.SO"), 2048, 'b');
    git(dir, &["add", "lib/b.SO"]);
    git_commit(dir, "Add library");
    git(dir, &["checkout", "-q", "main"]);
    git(dir, &["pack-refs", "--all"]);

    let worktrees = TempDir::new()?;
    let worktree = worktrees.path().join("feature-wt");
    git(
        dir,
        &["worktree", "add", "-q", &worktree.display().to_string(), "feature"],
    );
    pin_modified_date(&worktree.join("lib").join("b.SO"), 2023, 1, 15);

    run_branchdiff_command(&worktree, &["-s", "main", "-t", "feature"])
        .assert()
        .success();

    assert_eq!(
        read_report(&worktree.join("comparison.csv")),
        format!("{MAIN_FEATURE_HEADERS},,,,lib/b.SO,SO,15/01/2023,2\n")
    );

    Ok(())
}
