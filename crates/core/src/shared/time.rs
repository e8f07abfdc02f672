use super::constants::TIME_DECIMALS;

/// Rounds seconds to [`TIME_DECIMALS`] places.
///
/// Both the TextGrid reader and the MLF decoder pass every time through
/// here so that repeated write/read cycles settle on identical values.
pub fn round_time(seconds: f64) -> f64 {
    round_to(seconds, TIME_DECIMALS)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Converts integer toolkit ticks to rounded seconds.
pub fn ticks_to_seconds(ticks: u64, ticks_per_second: f64) -> f64 {
    round_time(ticks as f64 / ticks_per_second)
}
