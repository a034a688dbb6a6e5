//! N-back letter prompts.
//!
//! Single letters are too short for neural voices to pronounce reliably, so
//! each is wrapped in a carrier phrase ("Letter C.", "Bokstaven ce.") which
//! ffmpeg trims off again after leading silence. Greek uses a bare
//! comma-prefixed phonetic spelling and is not trimmed.

use std::fs;
use std::path::PathBuf;

use tracing::{error, info};

use crate::batch::{already_generated, synthesize_to_wav, RunStats};
use crate::config::Config;
use crate::error::{GenError, Result};
use crate::ffmpeg::{carrier_trim_filter, Transcoder};
use crate::history::{GenerationRecord, History};
use crate::locale::Locale;
use crate::speech::EngineFactory;

const GREEK_LETTERS: &[(&str, &str)] = &[
    ("C", "Σί"),
    ("H", "Ήττα"),
    ("K", "Κάππα"),
    ("N", "Νί"),
    ("R", "άρρ"),
    ("W", "ντάμπλιγιου"),
    ("X", "Χί"),
    ("Y", "υψιλον"),
];

const SWEDISH_LETTERS: &[(&str, &str)] = &[
    ("C", "ce"),
    ("H", "hå"),
    ("K", "kå"),
    ("N", "en"),
    ("R", "er"),
    ("W", "dubbel-ve"),
    ("X", "ex"),
    ("Y", "y"),
];

fn letter_name<'a>(table: &[(&str, &'static str)], letter: &'a str) -> &'a str {
    table
        .iter()
        .find(|(l, _)| *l == letter)
        .map_or(letter, |(_, name)| *name)
}

/// Text sent to the speech engine for one letter.
pub fn phonetic_text(letter: &str, locale: Locale) -> String {
    match locale {
        Locale::En => format!("Letter {letter}."),
        Locale::Sv => format!("Bokstaven {}.", letter_name(SWEDISH_LETTERS, letter)),
        Locale::El => format!(", {}.", letter_name(GREEK_LETTERS, letter)),
    }
}

#[derive(Debug, Clone)]
pub struct NbackJob {
    pub output_dir: PathBuf,
    pub locales: Vec<Locale>,
    /// Only the first letter, always regenerated.
    pub test: bool,
    pub force: bool,
}

impl NbackJob {
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: config.paths.nback_output.clone(),
            locales: config.nback.languages.clone(),
            test: false,
            force: false,
        }
    }
}

pub async fn run(config: &Config, job: &NbackJob, history: &History) -> Result<RunStats> {
    let letters: &[String] = if job.test {
        &config.nback.letters[..config.nback.letters.len().min(1)]
    } else {
        &config.nback.letters
    };

    let kind = config.nback.engine;
    let factory = EngineFactory::load(config, [kind])?;
    let transcoder = Transcoder::new(&config.ffmpeg);
    let mut total = RunStats::default();

    for &locale in &job.locales {
        let lang_dir = job.output_dir.join(locale.tag());
        fs::create_dir_all(&lang_dir).map_err(|e| GenError::io(&lang_dir, e))?;

        let engine = factory.build(kind, locale)?;
        let filter = config
            .nback
            .trim_offsets
            .get(&locale)
            .map(|&offset| carrier_trim_filter(offset));
        info!("Processing language: {locale} (engine: {})", engine.name());

        let mut stats = RunStats::default();
        for letter in letters {
            let file = format!("{letter}.wav");
            let output = lang_dir.join(&file);

            if !job.force && !job.test && already_generated(&output) {
                stats.existing += 1;
                continue;
            }

            let text = phonetic_text(letter, locale);
            info!("[{locale}] Generating {file} -> Text: {text}");
            let mut record = GenerationRecord::now("nback", locale.tag(), &file, &text, engine.name());

            match synthesize_to_wav(&engine, &transcoder, &text, &output, filter.as_deref()).await {
                Ok(rendered) => {
                    record.status = "generated".into();
                    record.synth_ms = rendered.synth_ms as i64;
                    record.convert_ms = rendered.convert_ms as i64;
                    record.audio_duration_s = rendered.duration_s;
                    stats.generated += 1;
                }
                Err(e) => {
                    error!("Error generating {letter} in {locale}: {e}");
                    record.status = "failed".into();
                    record.error = Some(e.to_string());
                    stats.failed += 1;
                }
            }
            history.save(&record);
        }

        info!("[{locale}] {stats}");
        total.merge(stats);
    }

    Ok(total)
}
