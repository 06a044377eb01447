//! FFprobe duration probing.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Probe a video file for its duration in seconds.
///
/// Invokes `ffprobe -show_entries format=duration` with unwrapped plain-text
/// output, so stdout is a single floating-point duration.
pub async fn probe_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            "FFprobe failed",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    parse_duration_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse ffprobe's plain-text duration output.
fn parse_duration_output(stdout: &str) -> MediaResult<f64> {
    let text = stdout.trim();
    let duration: f64 = text
        .parse()
        .map_err(|_| MediaError::InvalidDuration(text.to_string()))?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(MediaError::InvalidDuration(text.to_string()));
    }

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_output() {
        assert!((parse_duration_output("30.500000\n").unwrap() - 30.5).abs() < 0.001);
        assert!((parse_duration_output("  12.0  ").unwrap() - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(matches!(
            parse_duration_output("N/A"),
            Err(MediaError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration_output(""),
            Err(MediaError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration_output("0.0"),
            Err(MediaError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration_output("-4.2"),
            Err(MediaError::InvalidDuration(_))
        ));
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let err = probe_duration("definitely/not/here.mp4").await.unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
