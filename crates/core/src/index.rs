//! Directory index format.
//!
//! A directory index is UTF-8 text with one `<partition> <url>` record per
//! line. Record order is preserved as read.

use crate::error::{Error, Result};

/// Identifier of one shard of a directory's outputs.
pub type PartitionId = i64;

/// One record of a directory index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub partition: PartitionId,
    pub url: String,
}

/// A parsed directory index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryIndex {
    entries: Vec<IndexEntry>,
}

impl DirectoryIndex {
    /// Parse index text. Blank lines are skipped; any other line must be
    /// exactly an integer partition id and a URL.
    pub fn parse(text: &str) -> Result<Self> {
        let entries = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| parse_record(n + 1, line))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Parse raw index bytes, which must be UTF-8.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::Format(format!("directory index is not UTF-8: {e}")))?;
        Self::parse(text)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URLs of the records in `partition`, or of all records for `None`.
    pub fn urls(&self, partition: Option<PartitionId>) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| partition.is_none_or(|id| id == entry.partition))
            .map(|entry| entry.url.clone())
            .collect()
    }
}

fn parse_record(line_no: usize, line: &str) -> Result<IndexEntry> {
    let mut fields = line.split_whitespace();
    let (Some(id), Some(url), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(Error::Format(format!(
            "index line {line_no}: expected `<partition> <url>`, got {line:?}"
        )));
    };
    let partition = id.parse::<PartitionId>().map_err(|_| {
        Error::Format(format!(
            "index line {line_no}: invalid partition id {id:?}"
        ))
    })?;
    Ok(IndexEntry {
        partition,
        url: url.to_string(),
    })
}
