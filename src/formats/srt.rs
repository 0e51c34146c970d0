use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Cue, Document, ParseStats};

const BOM: char = '\u{feff}';
const CRLF: &str = "\r\n";

static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\n+").expect("block separator pattern is valid"));

// Unanchored: settings trailing the timing pair (positions, styles) are ignored.
static TIMING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2,}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2,}:[0-9]{2}:[0-9]{2},[0-9]{3})")
        .expect("timing line pattern is valid")
});

/// Never fails: malformed blocks are dropped and counted in [`Document::stats`].
pub fn parse_srt(input: &str) -> Document {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");

    let mut cues = Vec::new();
    let mut stats = ParseStats::default();

    for block in BLOCK_SEPARATOR.split(&normalized) {
        if trim_srt(block).is_empty() {
            continue;
        }
        stats.blocks += 1;

        match parse_block(block) {
            Ok(cue) => cues.push(cue),
            Err(reason) => {
                stats.skipped += 1;
                tracing::debug!(block = stats.blocks, reason, "skipping SRT block");
            }
        }
    }

    tracing::debug!(
        cues = cues.len(),
        blocks = stats.blocks,
        skipped = stats.skipped,
        "parsed SRT"
    );

    Document { cues, stats }
}

fn parse_block(block: &str) -> Result<Cue, &'static str> {
    let lines: Vec<&str> = block.split('\n').collect();
    if lines.len() < 3 {
        return Err("fewer than three lines");
    }

    let sequence_id = leading_integer(trim_srt(lines[0])).ok_or("index line is not an integer")?;

    let caps = TIMING_LINE
        .captures(lines[1])
        .ok_or("timing line does not match 'start --> end'")?;

    Ok(Cue {
        sequence_id,
        start: caps[1].to_string(),
        end: caps[2].to_string(),
        text: lines[2..].join("\n"),
    })
}

fn trim_srt(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// Leading optionally signed run of digits; trailing text is ignored.
/// Values past `i64` saturate.
fn leading_integer(s: &str) -> Option<i64> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let value = match rest[..len].parse::<i64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    Some(value)
}

// BOM first, cues renumbered from 1, CRLF between fields and cues.
pub fn write_srt(doc: &Document) -> String {
    let mut out = String::new();
    out.push(BOM);

    for (i, cue) in doc.cues.iter().enumerate() {
        if i > 0 {
            out.push_str(CRLF);
            out.push_str(CRLF);
        }

        out.push_str(&(i + 1).to_string());
        out.push_str(CRLF);
        out.push_str(&format!("{} --> {}", cue.start, cue.end));
        out.push_str(CRLF);
        out.push_str(&cue.text);
    }

    out
}
