//! matb-voicegen: batch voice-prompt generation for MATB training audio.

mod batch;
mod comms;
mod config;
mod convert;
mod credentials;
mod error;
mod ffmpeg;
mod history;
mod locale;
mod nback;
mod speech;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::batch::RunStats;
use crate::history::History;
use crate::locale::Locale;
use crate::speech::EngineKind;

#[derive(Parser, Debug)]
#[command(name = "matb-voicegen", about = "Generate localized MATB voice prompts")]
struct Args {
    /// Path to config YAML
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Radio-communication prompts from legacy scenario file names
    Comms {
        /// Directory of legacy `<TYPE>_<RADIO>_<FREQ>.wav` files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Base directory; one sub-directory per locale is created
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Locales to generate (repeatable); defaults to config
        #[arg(short, long = "lang", value_enum)]
        langs: Vec<Locale>,

        /// Override the speech engine for a locale, e.g. `sv=elevenlabs`
        #[arg(long = "engine", value_parser = parse_engine_override)]
        engines: Vec<(Locale, EngineKind)>,

        /// Print utterances and write transcripts without synthesizing
        #[arg(long)]
        dry_run: bool,

        /// Regenerate files that already exist
        #[arg(long)]
        force: bool,
    },

    /// N-back letter prompts
    Nback {
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long = "lang", value_enum)]
        langs: Vec<Locale>,

        /// Generate only one letter per language for testing
        #[arg(long)]
        test: bool,

        /// Force regeneration of all files even if they exist
        #[arg(long)]
        force: bool,
    },

    /// Convert a directory of .wav files to .m4a
    Convert {
        dir: Option<PathBuf>,

        /// AAC bitrate
        #[arg(long)]
        bitrate: Option<String>,
    },

    /// Print a Markdown report of generation history
    Report {
        /// YYYY-MM-DD or "today"
        #[arg(long, default_value = "today")]
        date: String,
    },
}

fn parse_engine_override(s: &str) -> Result<(Locale, EngineKind), String> {
    let (locale, kind) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LOCALE=ENGINE, got '{s}'"))?;
    let locale: Locale = locale.parse()?;
    let kind = <EngineKind as clap::ValueEnum>::from_str(kind.trim(), true)?;
    Ok((locale, kind))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug,reqwest=info,hyper=info,hyper_util=info")
    } else {
        EnvFilter::new("info,reqwest=warn,hyper=warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = config::Config::load(args.config.as_deref());
    let history = History::from_config(&config.history);

    let result: error::Result<Option<RunStats>> = match args.command {
        Command::Comms {
            input,
            output,
            langs,
            engines,
            dry_run,
            force,
        } => {
            let mut job = comms::batch::CommsJob::from_config(&config);
            if let Some(input) = input {
                job.input_dir = input;
            }
            if let Some(output) = output {
                job.output_base = output;
            }
            if !langs.is_empty() {
                job.locales = langs;
            }
            job.engines.extend(engines);
            job.dry_run = dry_run;
            job.force = force;
            comms::batch::run(&config, &job, &history).await.map(Some)
        }
        Command::Nback {
            output,
            langs,
            test,
            force,
        } => {
            let mut job = nback::NbackJob::from_config(&config);
            if let Some(output) = output {
                job.output_dir = output;
            }
            if !langs.is_empty() {
                job.locales = langs;
            }
            job.test = test;
            job.force = force;
            nback::run(&config, &job, &history).await.map(Some)
        }
        Command::Convert { dir, bitrate } => {
            let dir = dir.unwrap_or_else(|| config.paths.convert_dir.clone());
            let bitrate = bitrate.unwrap_or_else(|| config.ffmpeg.m4a_bitrate.clone());
            let transcoder = ffmpeg::Transcoder::new(&config.ffmpeg);
            convert::convert_dir(&transcoder, &dir, &bitrate).await.map(Some)
        }
        Command::Report { date } => {
            println!("{}", history.report(&date));
            Ok(None)
        }
    };

    match result {
        Ok(Some(stats)) => info!("Done: {stats}"),
        Ok(None) => {}
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_engine_overrides() {
        assert_eq!(
            parse_engine_override("sv=elevenlabs"),
            Ok((Locale::Sv, EngineKind::ElevenLabs))
        );
        assert_eq!(
            parse_engine_override("EN=OpenAI"),
            Ok((Locale::En, EngineKind::OpenAi))
        );
        assert!(parse_engine_override("sv").is_err());
        assert!(parse_engine_override("de=say").is_err());
        assert!(parse_engine_override("sv=polly").is_err());
    }

    #[test]
    fn cli_accepts_comms_flags() {
        let args = Args::try_parse_from([
            "matb-voicegen",
            "-v",
            "comms",
            "--lang",
            "el",
            "--lang",
            "sv",
            "--engine",
            "sv=elevenlabs",
            "--dry-run",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Command::Comms {
                langs,
                engines,
                dry_run,
                force,
                ..
            } => {
                assert_eq!(langs, [Locale::El, Locale::Sv]);
                assert_eq!(engines, [(Locale::Sv, EngineKind::ElevenLabs)]);
                assert!(dry_run);
                assert!(!force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_accepts_nback_test_mode() {
        let args = Args::try_parse_from(["matb-voicegen", "nback", "--test"]).unwrap();
        assert!(matches!(args.command, Command::Nback { test: true, force: false, .. }));
    }
}
