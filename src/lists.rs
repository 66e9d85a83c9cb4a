use thiserror::Error;

use crate::allocator::SourceList;

/// Identifier of one item (e.g. a slide number)
pub type ItemId = u32;

/// Source ranges used when no lists are given on the command line
pub const DEFAULT_SOURCE_RANGES: [(ItemId, ItemId); 3] = [(2, 41), (41, 131), (131, 163)];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListSpecError {
    #[error("Empty list spec")]
    Empty,

    #[error("Invalid item id '{0}'")]
    InvalidId(String),

    #[error("Range {start}..{end} contains no items")]
    EmptyRange { start: ItemId, end: ItemId },
}

/// Parse one source list from a command-line spec
///
/// Accepted forms:
/// - `2..41` half-open range
/// - `2..=40` inclusive range
/// - `3,7,11` explicit ids
pub fn parse_source_list(spec: &str) -> Result<SourceList<ItemId>, ListSpecError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ListSpecError::Empty);
    }

    if let Some((start, end)) = spec.split_once("..=") {
        let start = parse_id(start)?;
        let end = parse_id(end)?;
        if end < start {
            return Err(ListSpecError::EmptyRange {
                start,
                end: end.saturating_add(1),
            });
        }
        return Ok((start..=end).collect());
    }

    if let Some((start, end)) = spec.split_once("..") {
        let start = parse_id(start)?;
        let end = parse_id(end)?;
        if end <= start {
            return Err(ListSpecError::EmptyRange { start, end });
        }
        return Ok((start..end).collect());
    }

    spec.split(',').map(parse_id).collect()
}

/// The three default source ranges as lists
pub fn default_source_lists() -> Vec<SourceList<ItemId>> {
    DEFAULT_SOURCE_RANGES
        .iter()
        .map(|&(start, end)| (start..end).collect())
        .collect()
}

fn parse_id(raw: &str) -> Result<ItemId, ListSpecError> {
    let raw = raw.trim();
    raw.parse()
        .map_err(|_| ListSpecError::InvalidId(raw.to_string()))
}
