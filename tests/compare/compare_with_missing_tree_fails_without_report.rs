use crate::common::command::{
    git, git_commit, init_repository_dir, run_branchdiff_command, run_git_command,
};
use crate::common::file::write_sized_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

fn rev_parse(dir: &std::path::Path, revision: &str) -> String {
    let output = run_git_command(dir, &["rev-parse", revision])
        .output()
        .expect("Failed to run git rev-parse");
    String::from_utf8(output.stdout)
        .expect("rev-parse output is not UTF-8")
        .trim()
        .to_string()
}

#[rstest]
fn compare_with_missing_tree_fails_without_report(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    git(dir, &["checkout", "-q", "-b", "feature"]);
    write_sized_file(dir.join("lib").join("b.SO"), 2048, 'b');
    git(dir, &["add", "lib/b.SO"]);
    git_commit(dir, "Add library");

    // the nested `lib` tree of `feature` is only reachable through the diff
    let lib_tree = rev_parse(dir, "feature:lib");
    std::fs::remove_file(
        dir.join(".git")
            .join("objects")
            .join(&lib_tree[..2])
            .join(&lib_tree[2..]),
    )?;

    run_branchdiff_command(dir, &["-s", "main", "-t", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to compute diff"))
        .stderr(predicate::str::contains(lib_tree.as_str()));

    assert!(!dir.join("comparison.csv").exists());

    Ok(())
}
