use std::sync::LazyLock;

use regex::Regex;

use crate::table::TemplateRow;

// {{Medical cases chart/Row|date|deaths|recoveries|cases|...  on a single line.
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{Medical cases chart/Row\|([^|\n]*)\|([^|\n]*)\|([^|\n]*)\|([^|\n]*)\|").unwrap()
});

/// Rows of the older one-template-per-day chart markup, fields untouched.
pub fn extract_template_rows(markup: &str) -> Vec<TemplateRow> {
    ROW_RE
        .captures_iter(markup)
        .map(|caps| TemplateRow {
            date: caps[1].to_string(),
            deaths: caps[2].to_string(),
            recoveries: caps[3].to_string(),
            cases: caps[4].to_string(),
        })
        .collect()
}
