use std::path::Path;

use crate::shared::constants::TEXTGRID_EXTENSION;

/// Output file name for an utterance: directory prefix and extension of
/// the label path are dropped, e.g. `*/utt1.lab` becomes `utt1.TextGrid`.
pub fn textgrid_file_name(utterance: &str) -> String {
    let stem = Path::new(utterance)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(utterance);
    format!("{stem}.{TEXTGRID_EXTENSION}")
}
