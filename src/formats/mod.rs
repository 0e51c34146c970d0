pub mod srt;
pub mod time;
