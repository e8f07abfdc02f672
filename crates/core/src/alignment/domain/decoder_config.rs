use super::mlf_error::MlfError;
use crate::shared::constants::{
    DEFAULT_TICKS_PER_SECOND, PHONE_TIER_NAME, SHORT_PAUSE_LABEL, WORD_TIER_NAME,
};

/// Settings for turning an MLF alignment stream into grids.
#[derive(Clone, Debug, PartialEq)]
pub struct DecoderConfig {
    /// Toolkit ticks per second (HTK uses 100ns units).
    pub ticks_per_second: f64,
    /// Phone label that closes the current word and becomes a word-tier
    /// segment of its own.
    pub short_pause_label: String,
    pub phone_tier: String,
    pub word_tier: String,
    /// Treat a word-initial record that repeats the pending word's label
    /// and starts where it ends as a continuation of that word.
    pub merge_repeated_words: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            short_pause_label: SHORT_PAUSE_LABEL.to_string(),
            phone_tier: PHONE_TIER_NAME.to_string(),
            word_tier: WORD_TIER_NAME.to_string(),
            merge_repeated_words: true,
        }
    }
}

impl DecoderConfig {
    pub fn validate(&self) -> Result<(), MlfError> {
        if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0) {
            return Err(MlfError::Config(format!(
                "ticks per second must be positive, got {}",
                self.ticks_per_second
            )));
        }
        Ok(())
    }
}
