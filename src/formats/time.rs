use crate::error::{Result, SubtitleError};

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

// Negative input renders as zero; hours grow past 99 instead of wrapping.
pub fn format_srt_timestamp(ms_in: i64) -> String {
    if ms_in < 0 {
        return "00:00:00,000".to_string();
    }
    let ms = ms_in;

    let hour = ms / MS_PER_HOUR;
    let min = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let sec = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let milli = ms % MS_PER_SECOND;

    format!("{hour:02}:{min:02}:{sec:02},{milli:03}")
}

/// Field ranges are not checked (`00:61:00,000` is 61 minutes); a field
/// overflowing `i64` counts as malformed.
pub fn parse_srt_timestamp(s: &str) -> Result<i64> {
    let (hms, milli) = s
        .split_once(',')
        .ok_or_else(|| SubtitleError::malformed(s))?;

    let mut parts = hms.split(':');
    let (Some(h), Some(m), Some(sec), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(SubtitleError::malformed(s));
    };

    let h = numeric_field(h, s)?;
    let m = numeric_field(m, s)?;
    let sec = numeric_field(sec, s)?;
    let milli = numeric_field(milli, s)?;

    h.checked_mul(MS_PER_HOUR)
        .and_then(|acc| acc.checked_add(m.checked_mul(MS_PER_MINUTE)?))
        .and_then(|acc| acc.checked_add(sec.checked_mul(MS_PER_SECOND)?))
        .and_then(|acc| acc.checked_add(milli))
        .ok_or_else(|| SubtitleError::malformed(s))
}

fn numeric_field(field: &str, whole: &str) -> Result<i64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SubtitleError::malformed(whole));
    }
    field.parse().map_err(|_| SubtitleError::malformed(whole))
}
