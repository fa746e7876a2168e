//! Plain-text dump of a similarity table.

use std::fmt::Write;

use super::SimilarityTable;

const RULE_WIDTH: usize = 40;

/// Renders every template as its representative URL followed by the variants
/// recorded for each wildcarded position.
pub fn render_table(table: &SimilarityTable) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    for template in table.templates() {
        let _ = writeln!(out, "{}  ({} url(s))", template.representative(), template.members());
        for (position, variants) in template.variants() {
            let _ = writeln!(out, "  {position}");
            for variant in variants {
                let _ = writeln!(out, "\t{variant}");
            }
        }
        let _ = writeln!(out, "{rule}");
    }
    out
}
