mod compare_from_linked_worktree;
mod compare_identical_branches_writes_headers_only;
mod compare_in_other_directory_with_custom_output;
mod compare_outside_repository_fails;
mod compare_skips_files_missing_from_working_tree;
mod compare_swapped_libraries;
mod compare_with_diff_filter;
mod compare_with_missing_tree_fails_without_report;
mod compare_with_renamed_file;
mod library_compare_result;
