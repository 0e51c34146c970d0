use serde::{Deserialize, Serialize};

use crate::{error::Result, formats::time::parse_srt_timestamp};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub cues: Vec<Cue>,
    #[serde(default)]
    pub stats: ParseStats,
}

impl Document {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self {
            cues,
            stats: ParseStats::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub blocks: usize,
    pub skipped: usize,
}

// Timestamps stay as source text until a shift decodes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub sequence_id: i64,
    pub start: String,
    pub end: String,
    pub text: String,
}

impl Cue {
    pub fn start_ms(&self) -> Result<i64> {
        parse_srt_timestamp(&self.start)
    }

    pub fn end_ms(&self) -> Result<i64> {
        parse_srt_timestamp(&self.end)
    }
}
