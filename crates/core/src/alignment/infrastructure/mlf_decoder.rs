use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::alignment::domain::alignment_record::AlignmentRecord;
use crate::alignment::domain::decoder_config::DecoderConfig;
use crate::alignment::domain::mlf_error::MlfError;
use crate::alignment::domain::utterance_assembler::UtteranceAssembler;
use crate::annotation::domain::grid::Grid;
use crate::shared::constants::{MLF_HEADER, MLF_TERMINATOR};

/// Lazily decodes an HTK master label file into one [`Grid`] per utterance.
///
/// Each yielded grid is named after its utterance and holds a phone tier
/// and a word tier. Utterances are decoded one at a time as the iterator is
/// advanced. The first error is yielded once and ends the sequence.
pub struct MlfDecoder<R> {
    lines: Lines<R>,
    config: DecoderConfig,
    line_number: usize,
    header_seen: bool,
    finished: bool,
}

impl<R: BufRead> MlfDecoder<R> {
    pub fn new(source: R, config: DecoderConfig) -> Result<Self, MlfError> {
        config.validate()?;
        Ok(Self {
            lines: source.lines(),
            config,
            line_number: 0,
            header_seen: false,
            finished: false,
        })
    }

    fn decode_next(&mut self) -> Result<Option<Grid>, MlfError> {
        if !self.header_seen {
            match self.next_line()? {
                Some(line) if line == MLF_HEADER => self.header_seen = true,
                Some(line) => {
                    return Err(self.format_error(format!(
                        "expected `{MLF_HEADER}`, found `{line}`"
                    )))
                }
                None => return Err(self.format_error(format!("missing `{MLF_HEADER}` header"))),
            }
        }

        let Some(line) = self.next_line()? else {
            return Ok(None);
        };
        let name = utterance_name(&line)
            .ok_or_else(|| self.format_error(format!("expected quoted utterance name, found `{line}`")))?;

        let mut assembler = UtteranceAssembler::new(name, &self.config);
        loop {
            let Some(line) = self.next_line()? else {
                return Err(self.format_error(format!(
                    "utterance {} is missing its `{MLF_TERMINATOR}` terminator",
                    assembler.name()
                )));
            };
            if line == MLF_TERMINATOR {
                break;
            }
            let record = AlignmentRecord::parse(&line).map_err(|message| self.format_error(message))?;
            assembler
                .push(&record)
                .map_err(|source| MlfError::Annotation {
                    utterance: assembler.name().to_string(),
                    line: self.line_number,
                    source,
                })?;
        }

        let utterance = assembler.name().to_string();
        let grid = assembler.finish().map_err(|source| MlfError::Annotation {
            utterance,
            line: self.line_number,
            source,
        })?;
        log::debug!(
            "decoded {} ending at line {}",
            grid.name().unwrap_or_default(),
            self.line_number
        );
        Ok(Some(grid))
    }

    /// Next non-blank line, trimmed.
    fn next_line(&mut self) -> Result<Option<String>, MlfError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_number += 1;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
        Ok(None)
    }

    fn format_error(&self, message: String) -> MlfError {
        MlfError::Format {
            line: self.line_number,
            message,
        }
    }
}

impl MlfDecoder<BufReader<File>> {
    pub fn open(path: &Path, config: DecoderConfig) -> Result<Self, MlfError> {
        let file = File::open(path).map_err(|source| MlfError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(BufReader::new(file), config)
    }
}

impl<R: BufRead> Iterator for MlfDecoder<R> {
    type Item = Result<Grid, MlfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.decode_next() {
            Ok(Some(grid)) => Some(Ok(grid)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for MlfDecoder<R> {}

fn utterance_name(line: &str) -> Option<&str> {
    line.strip_prefix('"')?.strip_suffix('"')
}
