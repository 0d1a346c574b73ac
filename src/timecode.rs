/*!
 * SRT time-code decoding.
 *
 * A time code is `HH:MM:SS,mmm`. Each group is read as a plain integer and
 * multiplied by its position factor, so `00:00:01,5` is 1005 ms, not 1500 ms.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @const: Time code pattern, anchored at the start of the operand
static TIME_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d+):(\d+),(\d+)").unwrap()
});

/// Milliseconds per hour, minute, second and millisecond group
const POSITION_FACTORS_MS: [u64; 4] = [3_600_000, 60_000, 1_000, 1];

/// Separator between the start and end time codes of a cue line
pub const TIME_RANGE_SEPARATOR: &str = "-->";

/// Decode a `HH:MM:SS,mmm` time code into milliseconds
pub fn parse_time_code(value: &str) -> Result<u64, SubtitleError> {
    let caps = TIME_CODE_REGEX
        .captures(value)
        .ok_or_else(|| SubtitleError::UnparseableTimeCode(value.to_string()))?;

    let mut total_ms: u64 = 0;
    for (idx, factor) in POSITION_FACTORS_MS.iter().enumerate() {
        let group: u64 = caps
            .get(idx + 1)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| SubtitleError::UnparseableTimeCode(value.to_string()))?;

        total_ms = group
            .checked_mul(*factor)
            .and_then(|part| total_ms.checked_add(part))
            .ok_or_else(|| SubtitleError::UnparseableTimeCode(value.to_string()))?;
    }

    Ok(total_ms)
}

/// Split a cue line on `-->` and decode both sides
///
/// Returns `MalformedTimeRange` when the line does not split into exactly
/// two parts, and `UnparseableTimeCode` when either side fails to decode.
pub fn parse_time_range(line: &str) -> Result<(u64, u64), SubtitleError> {
    let parts: Vec<&str> = line.split(TIME_RANGE_SEPARATOR).map(str::trim).collect();

    if parts.len() != 2 {
        return Err(SubtitleError::MalformedTimeRange(line.to_string()));
    }

    let start_ms = parse_time_code(parts[0])?;
    let end_ms = parse_time_code(parts[1])?;

    Ok((start_ms, end_ms))
}

/// Format milliseconds as an SRT time code (HH:MM:SS,mmm)
pub fn format_time_code(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}
