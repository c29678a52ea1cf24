use crate::error::{Result, VizError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Destination for rendered animation frames (packed RGB, one buffer per frame).
pub trait FrameSink {
    fn push_frame(&mut self, rgb: &[u8]) -> Result<()>;

    /// Flush and close the sink, returning the written file.
    fn finish(self) -> Result<PathBuf>;
}

// Streams raw RGB frames into an ffmpeg child process.
//
// Dropping the encoder before `finish` kills and reaps the child.
pub struct FfmpegEncoder {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    output: PathBuf,
    frame_bytes: usize,
}

impl FfmpegEncoder {
    pub fn spawn(
        program: &str,
        output: impl AsRef<Path>,
        size: (u32, u32),
        fps: u32,
    ) -> Result<Self> {
        let output = output.as_ref().to_path_buf();
        let args = ffmpeg_args(&output, size, fps);
        log::debug!("Spawning {} {}", program, args.join(" "));

        let mut command = Command::new(program);
        command.args(&args);
        Self::from_command(command, program, output, size)
    }

    fn from_command(
        mut command: Command,
        program: &str,
        output: PathBuf,
        size: (u32, u32),
    ) -> Result<Self> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| VizError::EncoderUnavailable {
                program: program.to_string(),
                source,
            })?;
        let stdin = child.stdin.take();

        Ok(FfmpegEncoder {
            child: Some(child),
            stdin,
            output,
            frame_bytes: size.0 as usize * size.1 as usize * 3,
        })
    }
}

impl FrameSink for FfmpegEncoder {
    fn push_frame(&mut self, rgb: &[u8]) -> Result<()> {
        if rgb.len() != self.frame_bytes {
            return Err(VizError::shape(
                "frame",
                format!("{} bytes, expected {}", rgb.len(), self.frame_bytes),
            ));
        }
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| VizError::EncoderFailed("encoder input already closed".to_string()))?;
        stdin.write_all(rgb)?;
        Ok(())
    }

    fn finish(mut self) -> Result<PathBuf> {
        // Closing stdin signals end of stream
        drop(self.stdin.take());
        let child = self
            .child
            .take()
            .ok_or_else(|| VizError::EncoderFailed("encoder already finished".to_string()))?;
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
            return Err(VizError::EncoderFailed(format!(
                "{} ({})",
                output.status,
                tail.into_iter().rev().collect::<Vec<_>>().join(" | ")
            )));
        }
        Ok(std::mem::take(&mut self.output))
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            log::warn!("Encoder stopped before the last frame, {:?} is incomplete", self.output);
            if let Err(e) = child.kill() {
                log::debug!("Encoder already exited: {}", e);
            }
            if let Err(e) = child.wait() {
                log::warn!("Failed to reap encoder process: {}", e);
            }
        }
    }
}

/// Arguments reading rgb24 frames from stdin and writing `output`.
pub fn ffmpeg_args(output: &Path, size: (u32, u32), fps: u32) -> Vec<String> {
    let mut args: Vec<String> = [
        "-y",
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgb24",
        "-s",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    args.push(format!("{}x{}", size.0, size.1));
    args.extend(["-r".to_string(), fps.to_string(), "-i".to_string(), "-".to_string()]);

    // GIF picks its own palette; other containers get a broadly playable pixel format
    let is_gif = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
    if !is_gif {
        args.extend(["-pix_fmt".to_string(), "yuv420p".to_string()]);
    }

    args.push(output.to_string_lossy().to_string());
    args
}
