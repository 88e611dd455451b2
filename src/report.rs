use crate::record::Match;

use std::io::{self, Write};

const RULE_WIDTH: usize = 50;

/// Write the plain-text search report.
///
/// A summary line comes first, then one block per match in discovery order.
/// The quality line is printed only when the match carries quality scores.
pub fn write_report<W: Write>(out: &mut W, query: &str, matches: &[Match]) -> io::Result<()> {
    if matches.is_empty() {
        writeln!(out, "No sequences found containing '{query}'")?;
        return Ok(());
    }

    writeln!(
        out,
        "Found {} sequence(s) containing '{query}':\n",
        matches.len()
    )?;
    for m in matches {
        writeln!(out, "Line number: {}", m.line_number)?;
        writeln!(out, "Sequence name: {}", m.header)?;
        writeln!(out, "Sequence data: {}", m.sequence)?;
        if m.has_quality() {
            writeln!(out, "Quality scores: {}", m.quality)?;
        }
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    }
    Ok(())
}
