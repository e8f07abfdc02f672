use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::annotation::domain::grid::Grid;
use crate::annotation::domain::interval::Interval;
use crate::annotation::domain::tier::Tier;
use crate::shared::constants::{FILE_TYPE_LINE, TEXTGRID_CLASS, TIERS_EXIST_LINE};
use crate::textgrid::domain::grid_writer::GridWriter;
use crate::textgrid::domain::textgrid_error::TextGridError;

/// Writes Praat's long text format, as produced by "Save as text file".
///
/// Interval tiers are gap-filled with empty labels first, since Praat
/// expects every interval tier to cover its whole time range. Labels are
/// written verbatim between double quotes; embedded quotes are not
/// escaped.
pub struct PraatTextWriter;

impl PraatTextWriter {
    pub fn new() -> Self {
        Self
    }

    /// Writes a standalone single-tier file (`Object class = "IntervalTier"`
    /// or `"TextTier"`).
    pub fn write_tier(&self, tier: &Tier, sink: &mut dyn Write) -> Result<(), TextGridError> {
        let (min, max) = tier.bounds();
        writeln!(sink, "{FILE_TYPE_LINE}")?;
        writeln!(sink, "Object class = \"{}\"", tier.kind().tag())?;
        writeln!(sink)?;
        writeln!(sink, "xmin = {min:.6}")?;
        writeln!(sink, "xmax = {max:.6}")?;
        write_items(sink, tier, 0, 0)
    }

    pub fn write_tier_path(&self, tier: &Tier, path: &Path) -> Result<(), TextGridError> {
        let file = File::create(path).map_err(|source| TextGridError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut sink = BufWriter::new(file);
        self.write_tier(tier, &mut sink)?;
        sink.flush()?;
        Ok(())
    }
}

impl Default for PraatTextWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl GridWriter for PraatTextWriter {
    fn write(&self, grid: &Grid, sink: &mut dyn Write) -> Result<(), TextGridError> {
        let (min, max) = grid.bounds();
        writeln!(sink, "{FILE_TYPE_LINE}")?;
        writeln!(sink, "Object class = \"{TEXTGRID_CLASS}\"")?;
        writeln!(sink)?;
        writeln!(sink, "xmin = {min:.6}")?;
        writeln!(sink, "xmax = {max:.6}")?;
        writeln!(sink, "{TIERS_EXIST_LINE}")?;
        writeln!(sink, "size = {}", grid.len())?;
        writeln!(sink, "item []:")?;

        for (i, tier) in grid.iter().enumerate() {
            let (tier_min, tier_max) = tier.bounds();
            writeln!(sink, "\titem [{}]:", i + 1)?;
            writeln!(sink, "\t\tclass = \"{}\"", tier.kind().tag())?;
            writeln!(sink, "\t\tname = \"{}\"", tier.name().unwrap_or_default())?;
            writeln!(sink, "\t\txmin = {tier_min:.6}")?;
            writeln!(sink, "\t\txmax = {tier_max:.6}")?;
            write_items(sink, tier, 2, 3)?;
        }
        Ok(())
    }
}

/// Writes the `size` line and every element. `depth` indents the size
/// line, `item_depth` the element headers; element fields go one deeper.
fn write_items(
    sink: &mut dyn Write,
    tier: &Tier,
    depth: usize,
    item_depth: usize,
) -> Result<(), TextGridError> {
    let indent = "\t".repeat(depth);
    let item_indent = "\t".repeat(item_depth);
    let field_indent = "\t".repeat(item_depth + 1);

    match tier {
        Tier::Interval(t) => {
            let intervals: Vec<Interval> = t.fill_gaps("");
            writeln!(sink, "{indent}intervals: size = {}", intervals.len())?;
            for (j, interval) in intervals.iter().enumerate() {
                writeln!(sink, "{item_indent}intervals [{}]:", j + 1)?;
                writeln!(sink, "{field_indent}xmin = {:.6}", interval.min_time)?;
                writeln!(sink, "{field_indent}xmax = {:.6}", interval.max_time)?;
                writeln!(sink, "{field_indent}text = \"{}\"", interval.label)?;
            }
        }
        Tier::Point(t) => {
            writeln!(sink, "{indent}points: size = {}", t.len())?;
            for (k, mark) in t.iter().enumerate() {
                writeln!(sink, "{item_indent}points [{}]:", k + 1)?;
                writeln!(sink, "{field_indent}time = {:.6}", mark.time)?;
                writeln!(sink, "{field_indent}mark = \"{}\"", mark.label)?;
            }
        }
    }
    Ok(())
}
