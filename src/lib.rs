//! Shift the timings of SRT (SubRip) subtitles.
//!
//! The core is a pure pipeline: [`formats::srt::parse_srt`] builds a
//! [`Document`], [`shift::shift_document`] offsets every cue through the
//! timestamp codec in [`formats::time`], and [`formats::srt::write_srt`]
//! renders canonical SRT. [`transform`] runs all three for one file.
//! [`pipeline`] and [`cli`] are the batch command line built on top.

pub mod cli;
pub mod config;
pub mod error;
pub mod formats;
pub mod model;
pub mod pipeline;
pub mod shift;

pub use error::SubtitleError;
pub use model::{Cue, Document, ParseStats};
pub use shift::{Direction, Stage, transform, transform_with_progress};
