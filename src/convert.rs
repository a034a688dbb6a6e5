//! WAV → M4A (AAC) conversion for a directory of prompts.

use std::path::Path;

use tracing::{error, info};

use crate::batch::{list_files, RunStats};
use crate::ffmpeg::Transcoder;
use crate::error::Result;

/// Convert every `.wav` in `dir` to a sibling `.m4a`, skipping files that
/// already have one.
pub async fn convert_dir(transcoder: &Transcoder, dir: &Path, bitrate: &str) -> Result<RunStats> {
    let files = list_files(dir, "wav")?;
    let mut stats = RunStats::default();

    if files.is_empty() {
        info!("No .wav files found in {}", dir.display());
        return Ok(stats);
    }
    info!("Found {} .wav files in {}. Starting conversion...", files.len(), dir.display());

    for file in &files {
        let wav_path = dir.join(file);
        let m4a_path = wav_path.with_extension("m4a");
        let m4a_name = m4a_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if m4a_path.exists() {
            info!("Skipping {file}, {m4a_name} already exists.");
            stats.existing += 1;
            continue;
        }

        info!("Converting {file} to {m4a_name}...");
        match transcoder.to_m4a(&wav_path, &m4a_path, bitrate).await {
            Ok(()) => stats.generated += 1,
            Err(e) => {
                error!("Error converting {file}: {e}");
                stats.failed += 1;
            }
        }
    }

    info!("Conversion complete: {stats}");
    Ok(stats)
}
