use super::alignment_record::AlignmentRecord;
use super::decoder_config::DecoderConfig;
use crate::annotation::domain::annotation_error::AnnotationError;
use crate::annotation::domain::grid::Grid;
use crate::annotation::domain::interval_tier::IntervalTier;
use crate::shared::time::ticks_to_seconds;

/// A word whose end is still growing as phones arrive.
#[derive(Clone, Debug, PartialEq)]
struct PendingWord {
    label: String,
    start: f64,
    end: f64,
}

/// Rebuilds phone and word tiers for one utterance from its flat
/// alignment records.
///
/// Word-initial records (those carrying a word label) open a new word; the
/// following phone-only records extend it. A short pause closes the current
/// word and is kept as its own word-tier segment, but not as a phone.
/// Records of zero duration are skipped.
pub struct UtteranceAssembler {
    config: DecoderConfig,
    name: String,
    phones: IntervalTier,
    words: IntervalTier,
    pending: Option<PendingWord>,
}

impl UtteranceAssembler {
    pub fn new(name: impl Into<String>, config: &DecoderConfig) -> Self {
        Self {
            name: name.into(),
            phones: IntervalTier::new(config.phone_tier.clone()),
            words: IntervalTier::new(config.word_tier.clone()),
            pending: None,
            config: config.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, record: &AlignmentRecord) -> Result<(), AnnotationError> {
        let start = ticks_to_seconds(record.start, self.config.ticks_per_second);
        let end = ticks_to_seconds(record.end, self.config.ticks_per_second);
        if start == end {
            log::debug!(
                "{}: skipping zero-duration record {} at {start}",
                self.name,
                record.phone
            );
            return Ok(());
        }

        match &record.word {
            Some(word) => {
                self.phones.add(start, end, record.phone.as_str())?;
                let continues = self.config.merge_repeated_words
                    && matches!(&self.pending, Some(p) if p.label == *word && p.end == start);
                match self.pending.as_mut() {
                    Some(pending) if continues => pending.end = end,
                    _ => self.open_word(word, start, end)?,
                }
            }
            None if record.phone == self.config.short_pause_label => {
                self.open_word(&record.phone, start, end)?;
            }
            None => {
                self.phones.add(start, end, record.phone.as_str())?;
                if let Some(pending) = self.pending.as_mut() {
                    pending.end = end;
                }
            }
        }
        Ok(())
    }

    /// Flushes the last pending word and returns the utterance's grid,
    /// named after the utterance, holding the phone and word tiers.
    pub fn finish(mut self) -> Result<Grid, AnnotationError> {
        self.flush()?;
        let mut grid = Grid::named(self.name);
        grid.append(self.phones)?;
        grid.append(self.words)?;
        Ok(grid)
    }

    fn open_word(&mut self, label: &str, start: f64, end: f64) -> Result<(), AnnotationError> {
        self.flush()?;
        self.pending = Some(PendingWord {
            label: label.to_string(),
            start,
            end,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), AnnotationError> {
        match self.pending.take() {
            Some(word) => self.words.add(word.start, word.end, word.label),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::domain::interval::Interval;
    use crate::annotation::domain::tier::Tier;

    fn record(start: u64, end: u64, phone: &str, word: Option<&str>) -> AlignmentRecord {
        AlignmentRecord::new(start, end, phone, word)
    }

    fn assemble(records: &[AlignmentRecord], config: &DecoderConfig) -> Grid {
        let mut assembler = UtteranceAssembler::new("utt1", config);
        for r in records {
            assembler.push(r).unwrap();
        }
        assembler.finish().unwrap()
    }

    fn spans<'a>(grid: &'a Grid, tier: &str) -> Vec<(f64, f64, &'a str)> {
        grid.first(tier)
            .and_then(Tier::as_interval_tier)
            .unwrap()
            .iter()
            .map(|iv: &Interval| (iv.min_time, iv.max_time, iv.label.as_str()))
            .collect()
    }

    fn scenario() -> Vec<AlignmentRecord> {
        vec![
            record(0, 1_000_000, "sil", Some("w1")),
            record(1_000_000, 3_000_000, "ae", Some("w1")),
            record(3_000_000, 3_500_000, "sp", None),
            record(3_500_000, 6_000_000, "t", Some("w2")),
        ]
    }

    #[test]
    fn test_reconstructs_phones_and_words() {
        let grid = assemble(&scenario(), &DecoderConfig::default());

        assert_eq!(grid.name(), Some("utt1"));
        assert_eq!(grid.names(), vec![Some("phones"), Some("words")]);
        assert_eq!(
            spans(&grid, "phones"),
            vec![(0.0, 0.1, "sil"), (0.1, 0.3, "ae"), (0.35, 0.6, "t")]
        );
        assert_eq!(
            spans(&grid, "words"),
            vec![(0.0, 0.3, "w1"), (0.3, 0.35, "sp"), (0.35, 0.6, "w2")]
        );
    }

    #[test]
    fn test_repeated_word_kept_separate_when_merging_disabled() {
        let config = DecoderConfig {
            merge_repeated_words: false,
            ..DecoderConfig::default()
        };
        let grid = assemble(&scenario(), &config);
        assert_eq!(
            spans(&grid, "words"),
            vec![(0.0, 0.1, "w1"), (0.1, 0.3, "w1"), (0.3, 0.35, "sp"), (0.35, 0.6, "w2")]
        );
    }

    #[test]
    fn test_phone_only_records_extend_the_pending_word() {
        let records = vec![
            record(0, 1_000_000, "k", Some("cat")),
            record(1_000_000, 2_000_000, "ae", None),
            record(2_000_000, 3_000_000, "t", None),
            record(3_000_000, 4_000_000, "d", Some("dog")),
            record(4_000_000, 5_000_000, "ao", None),
        ];
        let grid = assemble(&records, &DecoderConfig::default());

        assert_eq!(spans(&grid, "phones").len(), 5);
        assert_eq!(
            spans(&grid, "words"),
            vec![(0.0, 0.3, "cat"), (0.3, 0.5, "dog")]
        );
    }

    #[test]
    fn test_zero_duration_records_are_skipped() {
        let records = vec![
            record(0, 1_000_000, "h", Some("hi")),
            record(1_000_000, 1_000_000, "sp", None),
            record(1_000_000, 1_000_000, "x", Some("ghost")),
            record(1_000_000, 2_000_000, "ay", None),
        ];
        let grid = assemble(&records, &DecoderConfig::default());

        assert_eq!(spans(&grid, "phones"), vec![(0.0, 0.1, "h"), (0.1, 0.2, "ay")]);
        assert_eq!(spans(&grid, "words"), vec![(0.0, 0.2, "hi")]);
    }

    #[test]
    fn test_leading_phones_without_word_stay_off_word_tier() {
        let records = vec![
            record(0, 1_000_000, "sil", None),
            record(1_000_000, 2_000_000, "ay", Some("I")),
        ];
        let grid = assemble(&records, &DecoderConfig::default());

        assert_eq!(spans(&grid, "phones").len(), 2);
        assert_eq!(spans(&grid, "words"), vec![(0.1, 0.2, "I")]);
    }

    #[test]
    fn test_trailing_short_pause_is_flushed() {
        let records = vec![
            record(0, 1_000_000, "ay", Some("I")),
            record(1_000_000, 1_500_000, "sp", None),
        ];
        let grid = assemble(&records, &DecoderConfig::default());

        assert_eq!(spans(&grid, "phones"), vec![(0.0, 0.1, "ay")]);
        assert_eq!(spans(&grid, "words"), vec![(0.0, 0.1, "I"), (0.1, 0.15, "sp")]);
    }

    #[test]
    fn test_custom_short_pause_label_and_tick_rate() {
        let config = DecoderConfig {
            ticks_per_second: 100.0,
            short_pause_label: "pau".to_string(),
            ..DecoderConfig::default()
        };
        let records = vec![
            record(0, 10, "a", Some("uh")),
            record(10, 15, "pau", None),
            record(15, 30, "o", Some("oh")),
        ];
        let grid = assemble(&records, &config);

        assert_eq!(
            spans(&grid, "words"),
            vec![(0.0, 0.1, "uh"), (0.1, 0.15, "pau"), (0.15, 0.3, "oh")]
        );
    }

    #[test]
    fn test_empty_utterance_yields_empty_tiers() {
        let grid = assemble(&[], &DecoderConfig::default());
        assert_eq!(grid.len(), 2);
        assert!(grid.iter().all(Tier::is_empty));
    }

    #[test]
    fn test_overlapping_phones_are_an_error() {
        let mut assembler = UtteranceAssembler::new("bad", &DecoderConfig::default());
        assembler
            .push(&record(0, 2_000_000, "a", Some("w")))
            .unwrap();
        let err = assembler
            .push(&record(1_000_000, 3_000_000, "b", None))
            .unwrap_err();
        assert!(matches!(err, AnnotationError::Ordering { .. }));
    }

    #[test]
    fn test_inverted_record_is_a_construction_error() {
        let mut assembler = UtteranceAssembler::new("bad", &DecoderConfig::default());
        let err = assembler
            .push(&record(2_000_000, 1_000_000, "a", Some("w")))
            .unwrap_err();
        assert!(matches!(err, AnnotationError::Construction { .. }));
    }
}
