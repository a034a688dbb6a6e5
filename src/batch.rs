//! Pieces shared by the batch tasks: file listing, the synthesize → transcode
//! step, and run counters.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{GenError, Result};
use crate::ffmpeg::{wav_duration, Transcoder};
use crate::speech::SpeechEngine;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub generated: usize,
    /// Output already present and left alone.
    pub existing: usize,
    /// Input names that are not scenario tokens.
    pub malformed: usize,
    pub failed: usize,
}

impl RunStats {
    pub fn merge(&mut self, other: RunStats) {
        self.generated += other.generated;
        self.existing += other.existing;
        self.malformed += other.malformed;
        self.failed += other.failed;
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} generated, {} already present, {} unrecognised, {} failed",
            self.generated, self.existing, self.malformed, self.failed
        )
    }
}

/// File names in `dir` with the given extension (case-insensitive), sorted.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(GenError::MissingInputDir(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| GenError::io(dir, e))?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            if !entry.file_type().ok()?.is_file() {
                return None;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let ext = Path::new(&name).extension()?.to_str()?.to_ascii_lowercase();
            (ext == extension).then_some(name)
        })
        .collect();

    names.sort();
    Ok(names)
}

/// Whether a previous run already produced `path`. Zero-byte files are
/// leftovers of a failed conversion and do not count.
pub fn already_generated(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.len() > 0)
}

/// Timings for one synthesized file.
#[derive(Debug, Clone, Copy)]
pub struct Rendered {
    pub synth_ms: f64,
    pub convert_ms: f64,
    pub duration_s: Option<f64>,
}

/// Synthesize `text` with `engine`, transcode the intermediate into the WAV
/// at `output` (through `filter` if given) and remove the intermediate.
/// A failed transcode also removes whatever ffmpeg left at `output`.
pub async fn synthesize_to_wav(
    engine: &SpeechEngine,
    transcoder: &Transcoder,
    text: &str,
    output: &Path,
    filter: Option<&str>,
) -> Result<Rendered> {
    let t_synth = Instant::now();
    let intermediate = match engine.synthesize(text, output).await {
        Ok(path) => path,
        Err(e) => {
            remove_partial(&output.with_extension(engine.intermediate_extension()));
            return Err(e);
        }
    };
    let synth_ms = t_synth.elapsed().as_secs_f64() * 1000.0;

    let t_convert = Instant::now();
    let converted = transcoder.to_wav(&intermediate, output, filter).await;
    remove_partial(&intermediate);
    if converted.is_err() {
        remove_partial(output);
    }
    converted?;
    let convert_ms = t_convert.elapsed().as_secs_f64() * 1000.0;

    let duration_s = wav_duration(output);
    debug!(
        "{}: synth={synth_ms:.0}ms convert={convert_ms:.0}ms duration={:?}",
        output.display(),
        duration_s
    );

    Ok(Rendered {
        synth_ms,
        convert_ms,
        duration_s,
    })
}

fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove {}: {e}", path.display());
        }
    }
}
