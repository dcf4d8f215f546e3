//! FFmpeg command builder and runner.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{MediaError, MediaResult};
use crate::progress::FfmpegProgress;

/// How many diagnostic stderr lines are retained for error reports.
const STDERR_TAIL_LINES: usize = 40;

/// Immutable description of one FFmpeg invocation.
///
/// Builders assemble the argument list; execution is the runner's job.
/// Declared inputs and the declared output let the runner enforce
/// pre- and postconditions around the subprocess.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input files, in `-i` order
    inputs: Vec<PathBuf>,
    /// Declared output file
    output: PathBuf,
    /// Arguments emitted before the first `-i`
    input_args: Vec<String>,
    /// Arguments emitted after the inputs
    output_args: Vec<String>,
    /// Whether to overwrite the output
    overwrite: bool,
    /// FFmpeg log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a command with a single input.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            inputs: vec![input.as_ref().to_path_buf()],
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Append another input file.
    pub fn add_input(mut self, input: impl AsRef<Path>) -> Self {
        self.inputs.push(input.as_ref().to_path_buf());
        self
    }

    /// Add an input argument (before the first `-i`).
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add multiple input arguments.
    pub fn input_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an output argument (after the inputs).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Add multiple output arguments.
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set seek position (before input).
    pub fn seek(self, seconds: f64) -> Self {
        self.input_arg("-ss").input_arg(format!("{:.3}", seconds))
    }

    /// Loop the first input this many additional times (`-stream_loop`).
    pub fn stream_loop(self, count: u64) -> Self {
        self.input_arg("-stream_loop").input_arg(count.to_string())
    }

    /// Hard-cap the output duration (`-t` on the output side).
    pub fn trim_to(self, seconds: f64) -> Self {
        self.output_arg("-t").output_arg(format!("{:.3}", seconds))
    }

    /// Set video filter.
    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    /// Set filter complex.
    pub fn filter_complex(self, filter: impl Into<String>) -> Self {
        self.output_arg("-filter_complex").output_arg(filter)
    }

    /// Add an explicit stream mapping directive.
    pub fn map(self, spec: impl Into<String>) -> Self {
        self.output_arg("-map").output_arg(spec)
    }

    /// Set video codec.
    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:v").output_arg(codec)
    }

    /// Set audio codec.
    pub fn audio_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:a").output_arg(codec)
    }

    /// Set audio bitrate.
    pub fn audio_bitrate(self, bitrate: impl Into<String>) -> Self {
        self.output_arg("-b:a").output_arg(bitrate)
    }

    /// Copy all streams without re-encoding.
    pub fn codec_copy(self) -> Self {
        self.output_arg("-c").output_arg("copy")
    }

    /// Extract single frame.
    pub fn single_frame(self) -> Self {
        self.output_arg("-vframes").output_arg("1")
    }

    /// Set log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Declared input files.
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Declared output file.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        // Overwrite flag
        if self.overwrite {
            args.push("-y".to_string());
        }

        // Log level
        args.push("-v".to_string());
        args.push(self.log_level.clone());

        // Progress output to stderr
        args.push("-progress".to_string());
        args.push("pipe:2".to_string());

        // Input args apply to the first input
        args.extend(self.input_args.clone());

        for input in &self.inputs {
            args.push("-i".to_string());
            args.push(input.to_string_lossy().to_string());
        }

        args.extend(self.output_args.clone());

        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Runner for FFmpeg commands with progress tracking and cancellation.
pub struct FfmpegRunner {
    /// Cancellation signal receiver
    cancel_rx: Option<watch::Receiver<bool>>,
    /// Timeout in seconds
    timeout_secs: Option<u64>,
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegRunner {
    /// Create a new runner.
    pub fn new() -> Self {
        Self {
            cancel_rx: None,
            timeout_secs: None,
        }
    }

    /// Set cancellation signal. The caller owns cleanup after a cancel,
    /// exactly as it does on any other stage failure.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    /// Set a deadline. Without one a hung invocation blocks indefinitely.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Run an FFmpeg command.
    pub async fn run(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        self.run_with_progress(cmd, |_| {}).await
    }

    /// Run an FFmpeg command with a progress callback.
    ///
    /// Preconditions: every declared input exists. Postcondition: the
    /// declared output exists; a zero exit status without an output file
    /// is reported as a stage failure, never a silent no-op.
    pub async fn run_with_progress<F>(
        &self,
        cmd: &FfmpegCommand,
        progress_callback: F,
    ) -> MediaResult<()>
    where
        F: Fn(FfmpegProgress) + Send + 'static,
    {
        for input in cmd.inputs() {
            if !input.exists() {
                return Err(MediaError::FileNotFound(input.clone()));
            }
        }

        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stderr = child.stderr.take().expect("stderr not captured");
        let mut reader = BufReader::new(stderr).lines();

        // Parse progress as it streams; keep the diagnostic tail for error reports.
        let stderr_handle = tokio::spawn(async move {
            let mut current_progress = FfmpegProgress::default();
            let mut tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);

            while let Ok(Some(line)) = reader.next_line().await {
                if is_progress_line(&line) {
                    if let Some(progress) = parse_progress_line(&line, &mut current_progress) {
                        progress_callback(progress);
                    }
                } else if !line.trim().is_empty() {
                    if tail.len() == STDERR_TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
            }

            tail.into_iter().collect::<Vec<_>>().join("\n")
        });

        let wait_result = self.wait_for_completion(&mut child).await;
        let stderr_tail = stderr_handle.await.unwrap_or_default();
        let stderr_tail = (!stderr_tail.is_empty()).then_some(stderr_tail);

        let status = wait_result?;

        if !status.success() {
            return Err(MediaError::stage_failed(
                "FFmpeg exited with non-zero status",
                stderr_tail,
                status.code(),
            ));
        }

        if !cmd.output().exists() {
            return Err(MediaError::stage_failed(
                format!(
                    "FFmpeg reported success but produced no output: {}",
                    cmd.output().display()
                ),
                stderr_tail,
                status.code(),
            ));
        }

        Ok(())
    }

    /// Wait for the child process, honoring cancellation and timeout.
    async fn wait_for_completion(&self, child: &mut Child) -> MediaResult<std::process::ExitStatus> {
        enum WaitOutcome {
            Exited(std::io::Result<std::process::ExitStatus>),
            Cancelled,
            TimedOut,
        }

        let mut cancel_rx = self.cancel_rx.clone();

        // The wait future borrows the child; it must be dropped before the
        // kill below can run.
        let outcome = {
            let cancelled = async {
                match cancel_rx.as_mut() {
                    Some(rx) => {
                        if rx.wait_for(|cancel| *cancel).await.is_err() {
                            // Sender dropped without cancelling
                            std::future::pending::<()>().await;
                        }
                    }
                    None => std::future::pending::<()>().await,
                }
            };

            let deadline = async {
                match self.timeout_secs {
                    Some(secs) => tokio::time::sleep(std::time::Duration::from_secs(secs)).await,
                    None => std::future::pending::<()>().await,
                }
            };

            let wait = child.wait();
            tokio::pin!(wait);

            tokio::select! {
                status = &mut wait => WaitOutcome::Exited(status),
                _ = cancelled => WaitOutcome::Cancelled,
                _ = deadline => WaitOutcome::TimedOut,
            }
        };

        match outcome {
            WaitOutcome::Exited(status) => Ok(status?),
            WaitOutcome::Cancelled => {
                info!("FFmpeg cancelled, killing process");
                let _ = child.kill().await;
                Err(MediaError::Cancelled)
            }
            WaitOutcome::TimedOut => {
                let secs = self.timeout_secs.unwrap_or_default();
                warn!(timeout_secs = secs, "FFmpeg timed out, killing process");
                let _ = child.kill().await;
                Err(MediaError::Timeout(secs))
            }
        }
    }
}

/// Keys FFmpeg emits on stderr under `-progress pipe:2`.
const PROGRESS_KEYS: &[&str] = &[
    "frame",
    "fps",
    "bitrate",
    "total_size",
    "out_time_us",
    "out_time_ms",
    "out_time",
    "dup_frames",
    "drop_frames",
    "speed",
    "progress",
];

/// Whether a stderr line belongs to the `-progress` key/value stream.
fn is_progress_line(line: &str) -> bool {
    match line.trim().split_once('=') {
        Some((key, _)) => PROGRESS_KEYS.contains(&key) || key.starts_with("stream_"),
        None => false,
    }
}

/// Parse a progress line from FFmpeg's `-progress` output.
///
/// Returns a snapshot on the terminating `progress=` key.
fn parse_progress_line(line: &str, current: &mut FfmpegProgress) -> Option<FfmpegProgress> {
    let line = line.trim();

    if let Some((key, value)) = line.split_once('=') {
        match key {
            "out_time_ms" | "out_time_us" => {
                // Normalize to milliseconds
                if let Ok(us) = value.parse::<i64>() {
                    current.out_time_ms = if key == "out_time_us" { us / 1000 } else { us };
                }
            }
            "out_time" => {
                // Format: HH:MM:SS.microseconds
                current.out_time = value.to_string();
            }
            "frame" => {
                if let Ok(frame) = value.parse() {
                    current.frame = frame;
                }
            }
            "fps" => {
                if let Ok(fps) = value.parse() {
                    current.fps = fps;
                }
            }
            "speed" => {
                // Format: "1.5x" or "N/A"
                if value != "N/A" {
                    if let Some(speed_str) = value.strip_suffix('x') {
                        if let Ok(speed) = speed_str.parse() {
                            current.speed = speed;
                        }
                    }
                }
            }
            "progress" => {
                // "continue" or "end"
                if value == "end" {
                    current.is_complete = true;
                }
                return Some(current.clone());
            }
            _ => {}
        }
    }

    None
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check if FFprobe is available.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let cmd = FfmpegCommand::new("input.mp4", "output.mp4")
            .seek(10.0)
            .trim_to(30.0)
            .video_codec("libx264");

        let args = cmd.build_args();
        assert!(args.contains(&"-ss".to_string()));
        assert!(args.contains(&"10.000".to_string()));
        assert!(args.contains(&"-t".to_string()));
        assert!(args.contains(&"-c:v".to_string()));
        assert!(args.contains(&"libx264".to_string()));
    }

    #[test]
    fn test_multi_input_ordering() {
        let cmd = FfmpegCommand::new("video.mp4", "out.mp4")
            .add_input("audio.m4a")
            .map("0:v:0")
            .map("1:a:0");

        let args = cmd.build_args();
        let input_flags: Vec<usize> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-i")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(input_flags.len(), 2);
        assert_eq!(args[input_flags[0] + 1], "video.mp4");
        assert_eq!(args[input_flags[1] + 1], "audio.m4a");
        // Maps follow the inputs, output comes last
        assert!(args.iter().position(|a| a == "-map").unwrap() > input_flags[1]);
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[test]
    fn test_stream_loop_precedes_input() {
        let cmd = FfmpegCommand::new("loop.mp4", "out.mp4").stream_loop(2);
        let args = cmd.build_args();
        let loop_pos = args.iter().position(|a| a == "-stream_loop").unwrap();
        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        assert!(loop_pos < input_pos);
        assert_eq!(args[loop_pos + 1], "2");
    }

    #[test]
    fn test_progress_parsing() {
        let mut progress = FfmpegProgress::default();

        parse_progress_line("out_time_ms=5000000", &mut progress);
        assert_eq!(progress.out_time_ms, 5000000);

        parse_progress_line("speed=1.5x", &mut progress);
        assert!((progress.speed - 1.5).abs() < 0.01);

        let result = parse_progress_line("progress=end", &mut progress);
        assert!(result.is_some());
        assert!(progress.is_complete);
    }

    #[test]
    fn test_stderr_line_classification() {
        assert!(is_progress_line("frame=120"));
        assert!(is_progress_line("progress=continue"));
        assert!(!is_progress_line("[concat @ 0x...] Impossible to open 'x.mp4'"));
        assert!(!is_progress_line("Error opening input file"));
    }

    #[tokio::test]
    async fn test_missing_input_fails_before_spawn() {
        let cmd = FfmpegCommand::new("/nonexistent/input.mp4", "/tmp/out.mp4");
        let err = FfmpegRunner::new().run(&cmd).await.unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
