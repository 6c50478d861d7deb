//! CSV comparison report
//!
//! Layout, eight columns per row:
//!
//! ```text
//! <source>,,,,<target>,,,
//! Library/Object,Type,Compile/Promote Date,Size (KBytes),Library/Object,Type,Compile/Promote Date,Size (KBytes)
//! lib/a.SO,SO,15/01/2023,1,,,,
//! ```
//!
//! The left half describes the source branch, the right half the target
//! branch. A side with no file is written as four empty cells.

use crate::artifacts::compare::file_descriptor::{FileDescriptor, FileDescriptorPair};
use anyhow::Context;
use derive_new::new;
use std::io;
use std::path::Path;

pub const SIDE_HEADERS: [&str; 4] = [
    "Library/Object",
    "Type",
    "Compile/Promote Date",
    "Size (KBytes)",
];

const SIDE_WIDTH: usize = SIDE_HEADERS.len();

#[derive(Debug, new)]
pub struct ComparisonReport<'a> {
    source_branch: &'a str,
    target_branch: &'a str,
    pairs: &'a [FileDescriptorPair],
}

impl ComparisonReport<'_> {
    pub fn write_to<W: io::Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(self.branch_row())?;
        csv_writer.write_record(SIDE_HEADERS.iter().chain(SIDE_HEADERS.iter()))?;

        for pair in self.pairs {
            let row = side_cells(pair.source.as_ref())
                .into_iter()
                .chain(side_cells(pair.target.as_ref()));
            csv_writer.write_record(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Create or truncate `path` and write the report into it
    pub fn write_file(&self, path: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Unable to create report file {}", path.display()))?;

        self.write_to(io::BufWriter::new(file))
            .with_context(|| format!("Unable to write report file {}", path.display()))
    }

    fn branch_row(&self) -> Vec<&str> {
        let mut row = vec![""; SIDE_WIDTH * 2];
        row[0] = self.source_branch;
        row[SIDE_WIDTH] = self.target_branch;
        row
    }
}

fn side_cells(descriptor: Option<&FileDescriptor>) -> [String; SIDE_WIDTH] {
    match descriptor {
        Some(descriptor) => [
            descriptor.path.clone(),
            descriptor.extension.clone(),
            descriptor.formatted_date(),
            descriptor.size_kb.to_string(),
        ],
        None => Default::default(),
    }
}
