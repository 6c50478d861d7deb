use crate::common::command::{git, init_repository_dir, swapped_library_repository_dir};
use anyhow::bail;
use assert_fs::TempDir;
use branchdiff::areas::repository::Repository;
use branchdiff::artifacts::compare::config::CompareConfig;
use branchdiff::artifacts::compare::metadata::{FileMetadata, MetadataResolver};
use branchdiff::errors::CompareError;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Knows only `lib/b.SO`
struct OnlyNewLibrary;

impl MetadataResolver for OnlyNewLibrary {
    fn resolve(&self, path: &str) -> anyhow::Result<FileMetadata> {
        match path {
            "lib/b.SO" => Ok(FileMetadata::new(
                NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
                7,
            )),
            _ => bail!("unknown path {path}"),
        }
    }
}

#[rstest]
fn identical_branches_have_no_pairs_and_no_failures(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    git(dir, &["branch", "copy"]);

    let repository = Repository::open(dir).unwrap();
    let result = repository
        .compare("main", "copy", &CompareConfig::default())
        .unwrap();

    assert!(result.pairs().is_empty());
    assert_eq!(result.failure_count(), 0);
    assert!(result.partial_failure().is_none());
}

#[rstest]
fn working_tree_metadata_describes_both_sides(swapped_library_repository_dir: TempDir) {
    let repository = Repository::open(swapped_library_repository_dir.path()).unwrap();

    let pairs = repository
        .compare("main", "feature", &CompareConfig::default())
        .unwrap()
        .into_pairs();

    assert_eq!(pairs.len(), 2);
    let deleted = pairs[0].source.as_ref().unwrap();
    assert_eq!(
        (deleted.path.as_str(), deleted.extension.as_str(), deleted.size_kb),
        ("lib/a.SO", "SO", 1)
    );
    assert!(pairs[0].target.is_none());

    let added = pairs[1].target.as_ref().unwrap();
    assert_eq!(
        (added.path.as_str(), added.formatted_date(), added.size_kb),
        ("lib/b.SO", "15/01/2023".to_string(), 2)
    );
    assert!(pairs[1].source.is_none());
}

#[rstest]
fn custom_resolver_failures_are_partial(swapped_library_repository_dir: TempDir) {
    let repository = Repository::open(swapped_library_repository_dir.path()).unwrap();

    let result = repository
        .compare_with("main", "feature", &CompareConfig::default(), &OnlyNewLibrary)
        .unwrap();

    assert_eq!(result.pairs().len(), 1);
    assert_eq!(result.pairs()[0].target.as_ref().unwrap().size_kb, 7);
    assert!(matches!(
        result.partial_failure(),
        Some(CompareError::ChangesFailed(1))
    ));
    assert!(matches!(
        &result.failures()[0].error,
        CompareError::MetadataUnavailable(path) if path == "lib/a.SO"
    ));
}

#[rstest]
fn unknown_branch_is_fatal(init_repository_dir: TempDir) {
    let repository = Repository::open(init_repository_dir.path()).unwrap();

    let error = repository
        .compare("main", "missing", &CompareConfig::default())
        .unwrap_err();

    assert!(error.is_fatal());
    assert!(matches!(error, CompareError::BranchNotFound(name) if name == "missing"));
}
