//! ffmpeg wrapper for resampling, carrier trimming and M4A encoding.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::config::FfmpegConfig;
use crate::error::{GenError, Result};

/// Audio filter that drops leading silence and then the first `offset`
/// seconds, i.e. a spoken carrier phrase.
pub fn carrier_trim_filter(offset: f64) -> String {
    format!("silenceremove=start_periods=1:start_threshold=-40dB,atrim=start={offset}")
}

pub struct Transcoder {
    binary: String,
    sample_rate: u32,
    channels: u16,
}

impl Transcoder {
    pub fn new(config: &FfmpegConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            sample_rate: config.sample_rate,
            channels: config.channels,
        }
    }

    /// Convert any ffmpeg-readable input to PCM WAV at the configured rate
    /// and channel count, optionally through an audio filter graph.
    pub async fn to_wav(&self, input: &Path, output: &Path, filter: Option<&str>) -> Result<()> {
        let args = self.wav_args(input, output, filter);
        self.run(args).await
    }

    /// Encode a WAV file as AAC in an M4A container.
    pub async fn to_m4a(&self, input: &Path, output: &Path, bitrate: &str) -> Result<()> {
        let args: Vec<OsString> = vec![
            "-y".into(),
            "-i".into(),
            input.into(),
            "-c:a".into(),
            "aac".into(),
            "-b:a".into(),
            bitrate.into(),
            output.into(),
        ];
        self.run(args).await
    }

    fn wav_args(&self, input: &Path, output: &Path, filter: Option<&str>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into()];
        if let Some(filter) = filter {
            args.push("-af".into());
            args.push(filter.into());
        }
        args.extend([
            "-ar".into(),
            self.sample_rate.to_string().into(),
            "-ac".into(),
            self.channels.to_string().into(),
            output.into(),
        ]);
        args
    }

    async fn run(&self, args: Vec<OsString>) -> Result<()> {
        debug!("{} {:?}", self.binary, args);
        let out = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GenError::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        if !out.status.success() {
            return Err(GenError::ProcessFailed {
                program: self.binary.clone(),
                status: out.status.to_string(),
                stderr: stderr_tail(&out.stderr),
            });
        }
        Ok(())
    }
}

/// Last few lines of a process's stderr; ffmpeg prints its banner first.
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    lines[lines.len().saturating_sub(5)..].join("\n")
}

/// Duration in seconds of a WAV file, read from its header.
pub fn wav_duration(path: &Path) -> Option<f64> {
    let reader = hound::WavReader::open(path).ok()?;
    let spec = reader.spec();
    Some(f64::from(reader.duration()) / f64::from(spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcoder() -> Transcoder {
        Transcoder::new(&FfmpegConfig::default())
    }

    #[test]
    fn wav_args_without_filter() {
        let args = transcoder().wav_args(Path::new("in.mp3"), Path::new("out.wav"), None);
        assert_eq!(
            args,
            ["-y", "-i", "in.mp3", "-ar", "44100", "-ac", "1", "out.wav"]
                .map(OsString::from)
                .to_vec()
        );
    }

    #[test]
    fn wav_args_place_filter_before_resampling() {
        let filter = carrier_trim_filter(0.58);
        let args = transcoder().wav_args(Path::new("in.mp3"), Path::new("out.wav"), Some(&filter));
        assert_eq!(args[3], OsString::from("-af"));
        assert_eq!(
            args[4],
            OsString::from("silenceremove=start_periods=1:start_threshold=-40dB,atrim=start=0.58")
        );
        assert_eq!(args.last(), Some(&OsString::from("out.wav")));
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let stderr = b"banner\n\nline1\nline2\nline3\nline4\nline5\nline6\n";
        assert_eq!(stderr_tail(stderr), "line2\nline3\nline4\nline5\nline6");
    }

    #[test]
    fn reads_wav_duration_from_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..4000 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        assert_eq!(wav_duration(&path), Some(0.5));
        assert_eq!(wav_duration(&dir.path().join("missing.wav")), None);
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let config = FfmpegConfig {
            binary: "matb-voicegen-no-such-ffmpeg".into(),
            ..FfmpegConfig::default()
        };
        let err = Transcoder::new(&config)
            .to_wav(Path::new("a.mp3"), Path::new("b.wav"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, GenError::Spawn { .. }));
    }
}
