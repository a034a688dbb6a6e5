//! macOS `say` command.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{GenError, Result};
use crate::ffmpeg::stderr_tail;

pub struct SaySpeech {
    binary: String,
    voice: String,
}

impl SaySpeech {
    pub fn new(binary: &str, voice: &str) -> Self {
        Self {
            binary: binary.to_string(),
            voice: voice.to_string(),
        }
    }

    /// Speak `text` into an AIFF file at `output`.
    pub async fn synthesize(&self, text: &str, output: &Path) -> Result<()> {
        debug!("{} -v {} -o {}", self.binary, self.voice, output.display());
        let out = Command::new(&self.binary)
            .arg("-v")
            .arg(&self.voice)
            .arg("-o")
            .arg(output)
            .arg(text)
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
