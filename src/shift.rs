use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    formats::{
        srt::{parse_srt, write_srt},
        time::format_srt_timestamp,
    },
    model::{Cue, Document},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Later: subtitles appear after they used to.
    Forward,
    /// Earlier: subtitles appear before they used to.
    Backward,
}

impl Direction {
    pub fn signed(self, offset_ms: i64) -> i64 {
        match self {
            Direction::Forward => offset_ms,
            Direction::Backward => offset_ms.saturating_neg(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Parsed,
    Shifted,
    Serialized,
}

impl Stage {
    pub fn percent(self) -> u8 {
        match self {
            Stage::Parsed => 50,
            Stage::Shifted => 70,
            Stage::Serialized => 90,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Parsed => "parsed",
            Stage::Shifted => "shifted",
            Stage::Serialized => "serialized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shifted {
    pub output: String,
    pub document: Document,
}

/// A zero offset returns the cues untouched. The first undecodable
/// timestamp aborts the whole shift.
pub fn shift_document(doc: Document, offset_ms: i64) -> Result<Document> {
    if offset_ms == 0 {
        return Ok(doc);
    }

    let cues = doc
        .cues
        .into_iter()
        .map(|cue| shift_cue(cue, offset_ms))
        .collect::<Result<Vec<_>>>()?;

    Ok(Document {
        cues,
        stats: doc.stats,
    })
}

fn shift_cue(cue: Cue, offset_ms: i64) -> Result<Cue> {
    let start = cue.start_ms()?.saturating_add(offset_ms);
    let end = cue.end_ms()?.saturating_add(offset_ms);
    tracing::trace!(id = cue.sequence_id, start, end, "shifted cue");

    Ok(Cue {
        start: format_srt_timestamp(start),
        end: format_srt_timestamp(end),
        ..cue
    })
}

pub fn transform(raw: &str, offset_ms: i64, direction: Direction) -> Result<String> {
    transform_with_progress(raw, offset_ms, direction, |_| {}).map(|s| s.output)
}

pub fn transform_with_progress<F>(
    raw: &str,
    offset_ms: i64,
    direction: Direction,
    mut on_stage: F,
) -> Result<Shifted>
where
    F: FnMut(Stage),
{
    let parsed = parse_srt(raw);
    on_stage(Stage::Parsed);

    let document = shift_document(parsed, direction.signed(offset_ms))?;
    on_stage(Stage::Shifted);

    let output = write_srt(&document);
    on_stage(Stage::Serialized);

    Ok(Shifted { output, document })
}
