//! Comms prompt generation: legacy file names → per-locale WAV prompts.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, error, info};

use super::templater::UtteranceTemplater;
use super::transcript::Transcript;
use crate::batch::{already_generated, list_files, synthesize_to_wav, RunStats};
use crate::config::Config;
use crate::error::{GenError, Result};
use crate::ffmpeg::Transcoder;
use crate::history::{GenerationRecord, History};
use crate::locale::Locale;
use crate::speech::{EngineFactory, EngineKind, SpeechEngine};

#[derive(Debug, Clone)]
pub struct CommsJob {
    pub input_dir: PathBuf,
    pub output_base: PathBuf,
    pub locales: Vec<Locale>,
    pub engines: BTreeMap<Locale, EngineKind>,
    /// Render and log utterances and write transcripts, but synthesize nothing.
    pub dry_run: bool,
    /// Regenerate files that already exist.
    pub force: bool,
    pub transcript: bool,
}

impl CommsJob {
    pub fn from_config(config: &Config) -> Self {
        let locales = config.comms.languages.clone();
        let engines = locales
            .iter()
            .map(|&l| (l, config.comms.engine_for(l)))
            .collect();
        Self {
            input_dir: config.paths.legacy_dir.clone(),
            output_base: config.paths.comms_output.clone(),
            locales,
            engines,
            dry_run: false,
            force: false,
            transcript: config.comms.transcript,
        }
    }

    pub fn engine_for(&self, locale: Locale) -> EngineKind {
        self.engines.get(&locale).copied().unwrap_or(EngineKind::Say)
    }
}

pub async fn run(config: &Config, job: &CommsJob, history: &History) -> Result<RunStats> {
    let files = list_files(&job.input_dir, "wav")?;
    info!("Found {} files in {}", files.len(), job.input_dir.display());

    // Build every engine before touching any file so a missing key or voice
    // stops the run up front.
    let mut engines = BTreeMap::new();
    if !job.dry_run {
        let factory = EngineFactory::load(config, job.locales.iter().map(|&l| job.engine_for(l)))?;
        for &locale in &job.locales {
            engines.insert(locale, factory.build(job.engine_for(locale), locale)?);
        }
    }

    let transcoder = Transcoder::new(&config.ffmpeg);
    let mut templater = UtteranceTemplater::new(
        Locale::En,
        &config.comms.own_callout,
        &config.comms.other_callouts,
    );
    let mut total = RunStats::default();

    for &locale in &job.locales {
        templater.start_pass(locale);
        let stats = run_locale(
            job,
            &mut templater,
            &files,
            engines.get(&locale),
            &transcoder,
            history,
        )
        .await?;
        info!("[{locale}] {stats}");
        total.merge(stats);
    }

    Ok(total)
}

async fn run_locale(
    job: &CommsJob,
    templater: &mut UtteranceTemplater,
    files: &[String],
    engine: Option<&SpeechEngine>,
    transcoder: &Transcoder,
    history: &History,
) -> Result<RunStats> {
    let locale = templater.locale();
    let lang_dir = job.output_base.join(locale.tag());
    fs::create_dir_all(&lang_dir).map_err(|e| GenError::io(&lang_dir, e))?;
    info!("Processing language: {locale}");

    let mut transcript = Transcript::new(locale);
    let mut stats = RunStats::default();

    for file in files {
        // Render before the exists-check so callout assignment does not
        // depend on what earlier runs left behind.
        let Some(text) = templater.render_file(file) else {
            debug!("[{locale}] Skipping {file}: not a scenario token");
            stats.malformed += 1;
            continue;
        };
        transcript.push(file, &text);

        let Some(engine) = engine else {
            info!("[{locale}] {file}: {text}");
            continue;
        };

        let output = lang_dir.join(file);
        if !job.force && already_generated(&output) {
            debug!("[{locale}] Skipping existing {}", output.display());
            stats.existing += 1;
            continue;
        }

        info!("[{locale}] Text: {text}");
        let mut record = GenerationRecord::now("comms", locale.tag(), file, &text, engine.name());

        match synthesize_to_wav(engine, transcoder, &text, &output, None).await {
            Ok(rendered) => {
                info!("[{locale}] Generated: {file}");
                record.status = "generated".into();
                record.synth_ms = rendered.synth_ms as i64;
                record.convert_ms = rendered.convert_ms as i64;
                record.audio_duration_s = rendered.duration_s;
                stats.generated += 1;
            }
            Err(e) => {
                error!("[{locale}] Failed to generate {file}: {e}");
                record.status = "failed".into();
                record.error = Some(e.to_string());
                stats.failed += 1;
            }
        }
        history.save(&record);
    }

    if job.transcript || job.dry_run {
        transcript.write(&lang_dir)?;
    }

    Ok(stats)
}
