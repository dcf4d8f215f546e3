#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for capture post-production.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building and execution with pre/postcondition
//!   enforcement around every subprocess
//! - Duration and stream probing via FFprobe
//! - The transform stages: optimize, audio merge, fixed loop, crossfade
//!   seamless loop, thumbnail extraction
//! - Progress parsing from `-progress pipe:2`
//! - Atomic cross-device moves for the publish step

pub mod command;
pub mod error;
pub mod filters;
pub mod fs_utils;
pub mod looping;
pub mod merge;
pub mod optimize;
pub mod probe;
pub mod progress;
pub mod thumbnail;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use filters::build_crossfade_filter;
pub use fs_utils::move_file;
pub use looping::{crossfade_loop, loop_to_duration, repeats_for_target};
pub use merge::merge_audio;
pub use optimize::optimize_video;
pub use probe::{probe_duration, probe_video, StreamKind, VideoInfo};
pub use progress::FfmpegProgress;
pub use thumbnail::extract_thumbnail;
