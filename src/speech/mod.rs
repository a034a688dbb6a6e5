//! Speech synthesis backends.
//!
//! - `openai`: OpenAI `/v1/audio/speech` (MP3 out)
//! - `elevenlabs`: ElevenLabs text-to-speech with per-voice prosody (MP3 out)
//! - `say`: macOS `say` command (AIFF out)
//!
//! Each engine writes an intermediate audio file next to the final output;
//! the caller transcodes it and removes it.

pub mod elevenlabs;
pub mod openai;
pub mod say;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::Config;
use crate::credentials::load_api_key;
use crate::error::{GenError, Result};
use crate::locale::Locale;

pub use elevenlabs::ElevenLabsSpeech;
pub use openai::OpenAiSpeech;
pub use say::SaySpeech;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[value(name = "openai")]
    OpenAi,
    #[value(name = "elevenlabs")]
    ElevenLabs,
    Say,
}

pub enum SpeechEngine {
    OpenAi(OpenAiSpeech),
    ElevenLabs(ElevenLabsSpeech),
    Say(SaySpeech),
}

impl SpeechEngine {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi(_) => "openai",
            Self::ElevenLabs(_) => "elevenlabs",
            Self::Say(_) => "say",
        }
    }

    /// Extension of the intermediate file this engine produces.
    pub fn intermediate_extension(&self) -> &'static str {
        match self {
            Self::OpenAi(_) | Self::ElevenLabs(_) => "mp3",
            Self::Say(_) => "aiff",
        }
    }

    /// Synthesize `text` into `<output stem>.<intermediate ext>` and return
    /// that path.
    pub async fn synthesize(&self, text: &str, output: &Path) -> Result<PathBuf> {
        let path = output.with_extension(self.intermediate_extension());
        match self {
            Self::OpenAi(engine) => {
                let audio = engine.synthesize(text).await?;
                write_audio(&path, &audio).await?;
            }
            Self::ElevenLabs(engine) => {
                let audio = engine.synthesize(text).await?;
                write_audio(&path, &audio).await?;
            }
            Self::Say(engine) => engine.synthesize(text, &path).await?,
        }
        Ok(path)
    }
}

async fn write_audio(path: &Path, audio: &[u8]) -> Result<()> {
    tokio::fs::write(path, audio)
        .await
        .map_err(|e| GenError::io(path, e))
}

/// Builds per-locale engines, loading only the credentials the requested
/// engine kinds need.
pub struct EngineFactory<'a> {
    config: &'a Config,
    openai_key: Option<String>,
    elevenlabs_key: Option<String>,
}

impl<'a> EngineFactory<'a> {
    pub fn load(config: &'a Config, kinds: impl IntoIterator<Item = EngineKind>) -> Result<Self> {
        let kinds: BTreeSet<EngineKind> = kinds.into_iter().collect();

        let openai_key = if kinds.contains(&EngineKind::OpenAi) {
            Some(load_api_key(
                &config.paths.openai_key_file,
                &config.paths.openai_key_env,
            )?)
        } else {
            None
        };
        let elevenlabs_key = if kinds.contains(&EngineKind::ElevenLabs) {
            Some(load_api_key(
                &config.paths.elevenlabs_key_file,
                &config.paths.elevenlabs_key_env,
            )?)
        } else {
            None
        };

        Ok(Self {
            config,
            openai_key,
            elevenlabs_key,
        })
    }

    pub fn build(&self, kind: EngineKind, locale: Locale) -> Result<SpeechEngine> {
        match kind {
            EngineKind::OpenAi => {
                let key = self.key(
                    &self.openai_key,
                    &self.config.paths.openai_key_file,
                    &self.config.paths.openai_key_env,
                )?;
                Ok(SpeechEngine::OpenAi(OpenAiSpeech::new(&self.config.openai, key)?))
            }
            EngineKind::ElevenLabs => {
                let key = self.key(
                    &self.elevenlabs_key,
                    &self.config.paths.elevenlabs_key_file,
                    &self.config.paths.elevenlabs_key_env,
                )?;
                let profile = self
                    .config
                    .elevenlabs
                    .voices
                    .get(&locale)
                    .cloned()
                    .ok_or(GenError::NoVoice {
                        engine: "elevenlabs",
                        locale,
                    })?;
                Ok(SpeechEngine::ElevenLabs(ElevenLabsSpeech::new(
                    &self.config.elevenlabs,
                    key,
                    profile,
                )?))
            }
            EngineKind::Say => {
                let voice = self
                    .config
                    .say
                    .voices
                    .get(&locale)
                    .cloned()
                    .ok_or(GenError::NoVoice {
                        engine: "say",
                        locale,
                    })?;
                Ok(SpeechEngine::Say(SaySpeech::new(&self.config.say.binary, &voice)))
            }
        }
    }

    fn key(&self, key: &Option<String>, path: &Path, env_var: &str) -> Result<String> {
        key.clone().ok_or_else(|| GenError::MissingCredential {
            path: path.to_path_buf(),
            env_var: env_var.to_string(),
        })
    }
}
