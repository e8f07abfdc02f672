use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::annotation::domain::annotation_error::AnnotationError;
use crate::annotation::domain::grid::Grid;
use crate::annotation::domain::interval::Interval;
use crate::annotation::domain::interval_tier::IntervalTier;
use crate::annotation::domain::mark::Mark;
use crate::annotation::domain::point_tier::PointTier;
use crate::annotation::domain::tier::{Tier, TierKind};
use crate::shared::constants::{TEXTGRID_CLASS, TIERS_EXIST_LINE};
use crate::shared::time::round_time;
use crate::textgrid::domain::grid_reader::GridReader;
use crate::textgrid::domain::textgrid_error::TextGridError;

const OO_TEXT_FILE: &str = "ooTextFile";

/// Reads Praat's long text format.
///
/// All times are rounded to five decimals. Elements go through the tiers'
/// validating `insert`, so overlapping intervals abort the read; intervals
/// of zero duration are dropped.
pub struct PraatTextReader;

impl PraatTextReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a standalone single-tier file (`Object class = "IntervalTier"`
    /// or `"TextTier"`). The returned tier is unnamed.
    pub fn read_tier(&self, source: &mut dyn BufRead) -> Result<Tier, TextGridError> {
        let mut scanner = LineScanner::new(source);
        scanner.expect_quoted("File type", OO_TEXT_FILE)?;
        let class = scanner.quoted("Object class")?;
        let kind = TierKind::from_tag(&class)
            .ok_or_else(|| scanner.format_error(format!("unknown tier class \"{class}\"")))?;
        read_tier_body(&mut scanner, kind, None)
    }

    pub fn read_tier_path(&self, path: &Path) -> Result<Tier, TextGridError> {
        let file = File::open(path).map_err(|source| TextGridError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_tier(&mut BufReader::new(file))
    }
}

impl Default for PraatTextReader {
    fn default() -> Self {
        Self::new()
    }
}

impl GridReader for PraatTextReader {
    fn read(&self, source: &mut dyn BufRead) -> Result<Grid, TextGridError> {
        let mut scanner = LineScanner::new(source);
        scanner.expect_quoted("File type", OO_TEXT_FILE)?;
        scanner.expect_quoted("Object class", TEXTGRID_CLASS)?;
        let min = scanner.time("xmin")?;
        let max = scanner.time("xmax")?;
        let mut grid = Grid::bounded(min, max).map_err(|e| scanner.annotation_error(e))?;

        scanner.expect_line(TIERS_EXIST_LINE)?;
        let size = scanner.count("size")?;
        scanner.expect_line("item []:")?;

        for _ in 0..size {
            scanner.expect_header("item")?;
            let class = scanner.quoted("class")?;
            let kind = TierKind::from_tag(&class)
                .ok_or_else(|| scanner.format_error(format!("unknown tier class \"{class}\"")))?;
            let name = scanner.quoted("name")?;
            let tier = read_tier_body(&mut scanner, kind, Some(name))?;
            grid.append(tier).map_err(|e| scanner.annotation_error(e))?;
        }
        Ok(grid)
    }
}

/// Reads bounds, element count and elements of one tier, starting at the
/// tier's `xmin` line.
fn read_tier_body(
    scanner: &mut LineScanner<'_>,
    kind: TierKind,
    name: Option<String>,
) -> Result<Tier, TextGridError> {
    let min = scanner.time("xmin")?;
    let max = scanner.time("xmax")?;

    match kind {
        TierKind::Interval => {
            let mut tier =
                IntervalTier::bounded(name, min, max).map_err(|e| scanner.annotation_error(e))?;
            let size = scanner.count("intervals: size")?;
            for _ in 0..size {
                scanner.expect_header("intervals")?;
                let xmin = scanner.time("xmin")?;
                let xmax = scanner.time("xmax")?;
                let text = scanner.quoted("text")?;
                if xmin == xmax {
                    log::debug!(
                        "dropping zero-duration interval at {xmin} (line {})",
                        scanner.line_number
                    );
                    continue;
                }
                let interval =
                    Interval::new(xmin, xmax, text).map_err(|e| scanner.annotation_error(e))?;
                tier.insert(interval)
                    .map_err(|e| scanner.annotation_error(e))?;
            }
            Ok(Tier::Interval(tier))
        }
        TierKind::Point => {
            let mut tier =
                PointTier::bounded(name, min, max).map_err(|e| scanner.annotation_error(e))?;
            let size = scanner.count("points: size")?;
            for _ in 0..size {
                scanner.expect_header("points")?;
                let time = scanner.time("time")?;
                let mark = scanner.quoted("mark")?;
                tier.insert(Mark::new(time, mark))
                    .map_err(|e| scanner.annotation_error(e))?;
            }
            Ok(Tier::Point(tier))
        }
    }
}

/// Line-oriented cursor over `key = value` lines. Blank lines are skipped
/// and surrounding whitespace is ignored.
struct LineScanner<'a> {
    source: &'a mut dyn BufRead,
    line_number: usize,
}

impl<'a> LineScanner<'a> {
    fn new(source: &'a mut dyn BufRead) -> Self {
        Self {
            source,
            line_number: 0,
        }
    }

    fn next_line(&mut self) -> Result<String, TextGridError> {
        let mut buffer = String::new();
        loop {
            buffer.clear();
            if self.source.read_line(&mut buffer)? == 0 {
                return Err(self.format_error("unexpected end of file".to_string()));
            }
            self.line_number += 1;
            let trimmed = buffer.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
    }

    fn expect_line(&mut self, expected: &str) -> Result<(), TextGridError> {
        let line = self.next_line()?;
        if line != expected {
            return Err(self.format_error(format!("expected `{expected}`, found `{line}`")));
        }
        Ok(())
    }

    /// Element headers such as `item [3]:` or `intervals [12]:`.
    fn expect_header(&mut self, prefix: &str) -> Result<(), TextGridError> {
        let line = self.next_line()?;
        let is_header = line
            .strip_prefix(prefix)
            .map(str::trim_start)
            .is_some_and(|rest| rest.starts_with('[') && rest.ends_with("]:"));
        if !is_header {
            return Err(self.format_error(format!("expected `{prefix} [n]:`, found `{line}`")));
        }
        Ok(())
    }

    fn value(&mut self, key: &str) -> Result<String, TextGridError> {
        let line = self.next_line()?;
        match line.split_once('=') {
            Some((lhs, rhs)) if lhs.trim() == key => Ok(rhs.trim().to_string()),
            _ => Err(self.format_error(format!("expected `{key} = ...`, found `{line}`"))),
        }
    }

    /// A finite number, rounded with [`round_time`]. `nan` and `inf` are
    /// format errors.
    fn time(&mut self, key: &str) -> Result<f64, TextGridError> {
        let raw = self.value(key)?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(round_time(value)),
            _ => Err(self.format_error(format!("invalid number `{raw}` for {key}"))),
        }
    }

    fn count(&mut self, key: &str) -> Result<usize, TextGridError> {
        let raw = self.value(key)?;
        raw.parse::<usize>()
            .map_err(|_| self.format_error(format!("invalid count `{raw}` for {key}")))
    }

    /// Everything between the outermost double quotes of the value.
    fn quoted(&mut self, key: &str) -> Result<String, TextGridError> {
        let raw = self.value(key)?;
        match (raw.find('"'), raw.rfind('"')) {
            (Some(open), Some(close)) if open < close => Ok(raw[open + 1..close].to_string()),
            _ => Err(self.format_error(format!("expected quoted string for {key}, found `{raw}`"))),
        }
    }

    fn expect_quoted(&mut self, key: &str, expected: &str) -> Result<(), TextGridError> {
        let found = self.quoted(key)?;
        if found != expected {
            return Err(self.format_error(format!(
                "expected {key} \"{expected}\", found \"{found}\""
            )));
        }
        Ok(())
    }

    fn format_error(&self, message: String) -> TextGridError {
        TextGridError::Format {
            line: self.line_number,
            message,
        }
    }

    fn annotation_error(&self, source: AnnotationError) -> TextGridError {
        TextGridError::Annotation {
            line: self.line_number,
            source,
        }
    }
}
