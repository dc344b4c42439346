use super::numeric::normalize;
use crate::table::DataRow;

const DATA_MARKER: &str = "|data=";
const BLOCK_END: char = '|';
const FIELD_SEPARATOR: char = ';';

/// Locate the text between the first `|data=` and the next `|`.
///
/// The span may cover many lines. Returns `None` when there is no marker or
/// the block is never closed. A `|` inside the data ends the block early.
pub fn find_data_block(markup: &str) -> Option<&str> {
    let start = markup.find(DATA_MARKER)? + DATA_MARKER.len();
    let len = markup[start..].find(BLOCK_END)?;
    Some(&markup[start..start + len])
}

/// One row per non-blank line, in line order.
pub fn parse_block(block: &str) -> Vec<DataRow> {
    block
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect()
}

// date;deaths;recoveries;cases. Segments past the fourth are ignored.
fn parse_line(line: &str) -> Option<DataRow> {
    let mut segments = line.split(FIELD_SEPARATOR);
    let date = segments.next()?.trim();
    if date.is_empty() {
        return None;
    }

    Some(DataRow {
        date: date.to_string(),
        deaths: normalize(segments.next()),
        recoveries: normalize(segments.next()),
        cases: normalize(segments.next()),
    })
}
