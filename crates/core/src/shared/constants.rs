pub const TIME_DECIMALS: i32 = 5;

pub const DEFAULT_TICKS_PER_SECOND: f64 = 1e7;
pub const SHORT_PAUSE_LABEL: &str = "sp";
pub const PHONE_TIER_NAME: &str = "phones";
pub const WORD_TIER_NAME: &str = "words";

pub const MLF_HEADER: &str = "#!MLF!#";
pub const MLF_TERMINATOR: &str = ".";

pub const TEXTGRID_EXTENSION: &str = "TextGrid";
pub const FILE_TYPE_LINE: &str = "File type = \"ooTextFile\"";
pub const TEXTGRID_CLASS: &str = "TextGrid";
pub const INTERVAL_TIER_CLASS: &str = "IntervalTier";
pub const POINT_TIER_CLASS: &str = "TextTier";
pub const TIERS_EXIST_LINE: &str = "tiers? <exists>";

/// Boundaries closer than this are counted as agreeing (~2 frames at 100 fps).
pub const DEFAULT_TOLERANCE_MS: f64 = 20.0;
pub const DEFAULT_EVALUATION_TIER: &str = PHONE_TIER_NAME;
