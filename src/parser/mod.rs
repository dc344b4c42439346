pub mod block;
pub mod numeric;
pub mod template;

use clap::ValueEnum;

use crate::table::DataRow;

/// Chart markup conventions a page may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkupFormat {
    /// `|data=` block of `date;deaths;recoveries;cases` lines
    DataBlock,
    /// One `{{Medical cases chart/Row|...}}` template per day (older pages)
    RowTemplate,
}

/// Page markup → rows of its `|data=` block. Missing block yields no rows.
pub fn extract(markup: &str) -> Vec<DataRow> {
    block::find_data_block(markup)
        .map(block::parse_block)
        .unwrap_or_default()
}
