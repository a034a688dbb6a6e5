//! Configuration management for matb-voicegen.
//!
//! Loads config from a YAML file in standard locations. Every section has
//! defaults matching the asset layout of the MATB web app, so running with no
//! config file at all from the project root works.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::locale::Locale;
use crate::speech::EngineKind;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub legacy_dir: PathBuf,
    pub comms_output: PathBuf,
    pub nback_output: PathBuf,
    pub convert_dir: PathBuf,
    pub openai_key_file: PathBuf,
    pub elevenlabs_key_file: PathBuf,
    /// Environment variables consulted when a key file is absent.
    pub openai_key_env: String,
    pub elevenlabs_key_env: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            legacy_dir: "src/assets/sounds/legacy".into(),
            comms_output: "src/assets/sounds".into(),
            nback_output: "src/assets/nback-sounds".into(),
            convert_dir: "src/assets/sounds/en".into(),
            openai_key_file: "API KEY/api key".into(),
            elevenlabs_key_file: "API KEY/elevenlabs_key".into(),
            openai_key_env: "OPENAI_API_KEY".into(),
            elevenlabs_key_env: "ELEVENLABS_API_KEY".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommsConfig {
    pub languages: Vec<Locale>,
    pub own_callout: String,
    pub other_callouts: Vec<String>,
    pub engines: BTreeMap<Locale, EngineKind>,
    pub transcript: bool,
}

impl Default for CommsConfig {
    fn default() -> Self {
        Self {
            languages: Locale::ALL.to_vec(),
            own_callout: "ESA504".into(),
            other_callouts: vec![
                "A 33395".into(),
                "Citrus 211".into(),
                "AC5171".into(),
                "SK 580".into(),
            ],
            engines: BTreeMap::from([
                (Locale::En, EngineKind::OpenAi),
                (Locale::El, EngineKind::Say),
                (Locale::Sv, EngineKind::Say),
            ]),
            transcript: true,
        }
    }
}

impl CommsConfig {
    pub fn engine_for(&self, locale: Locale) -> EngineKind {
        self.engines.get(&locale).copied().unwrap_or(EngineKind::Say)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NbackConfig {
    pub languages: Vec<Locale>,
    pub letters: Vec<String>,
    pub engine: EngineKind,
    /// Seconds cut after leading silence to drop the carrier phrase.
    pub trim_offsets: BTreeMap<Locale, f64>,
}

impl Default for NbackConfig {
    fn default() -> Self {
        Self {
            languages: Locale::ALL.to_vec(),
            letters: ["C", "H", "K", "N", "R", "W", "X", "Y"]
                .into_iter()
                .map(String::from)
                .collect(),
            engine: EngineKind::ElevenLabs,
            trim_offsets: BTreeMap::from([(Locale::En, 0.36), (Locale::Sv, 0.58)]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub voice: String,
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            model: "tts-1-hd".into(),
            voice: "nova".into(),
            timeout_secs: 60,
        }
    }
}

/// ElevenLabs voice id plus the prosody settings sent with every request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VoiceProfile {
    pub voice_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    #[serde(default = "default_speaker_boost")]
    pub use_speaker_boost: bool,
    #[serde(default)]
    pub speed: Option<f32>,
}

fn default_speaker_boost() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElevenLabsConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub voices: BTreeMap<Locale, VoiceProfile>,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".into(),
            model: "eleven_multilingual_v2".into(),
            timeout_secs: 60,
            voices: BTreeMap::from([
                (
                    Locale::En,
                    VoiceProfile {
                        voice_id: "nPczCjzI2devNBz1zQrb".into(), // Brian
                        stability: 0.8,
                        similarity_boost: 1.0,
                        style: 0.4,
                        use_speaker_boost: true,
                        speed: None,
                    },
                ),
                (
                    Locale::El,
                    VoiceProfile {
                        voice_id: "CsiIKWiAQRGMe7qh9P9q".into(), // Iordanis
                        stability: 0.9,
                        similarity_boost: 1.0,
                        style: 0.4,
                        use_speaker_boost: true,
                        speed: None,
                    },
                ),
                (
                    Locale::Sv,
                    VoiceProfile {
                        voice_id: "oJEeOXECH9V31Oci9WHK".into(), // Peter
                        stability: 1.0,
                        similarity_boost: 0.5,
                        style: 0.4,
                        use_speaker_boost: true,
                        speed: Some(0.7),
                    },
                ),
            ]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SayConfig {
    pub binary: String,
    pub voices: BTreeMap<Locale, String>,
}

impl Default for SayConfig {
    fn default() -> Self {
        Self {
            binary: "say".into(),
            voices: BTreeMap::from([
                (Locale::El, "Melina".into()),
                (Locale::Sv, "Alva".into()),
            ]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FfmpegConfig {
    pub binary: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub m4a_bitrate: String,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            binary: "ffmpeg".into(),
            sample_rate: 44100,
            channels: 1,
            m4a_bitrate: "192k".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    /// Defaults to `~/.matb-voicegen-history`.
    pub dir: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub comms: CommsConfig,
    pub nback: NbackConfig,
    pub openai: OpenAiConfig,
    pub elevenlabs: ElevenLabsConfig,
    pub say: SayConfig,
    pub ffmpeg: FfmpegConfig,
    pub history: HistoryConfig,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./matb-voicegen.yaml
    /// 2. ~/.config/matb-voicegen/config.yaml
    /// 3. /etc/matb-voicegen/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("matb-voicegen.yaml")),
                dirs::home_dir().map(|h| h.join(".config/matb-voicegen/config.yaml")),
                Some(PathBuf::from("/etc/matb-voicegen/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match serde_yml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_section_defaults() {
        let yaml = r#"
comms:
  own_callout: "ESA777"
  engines:
    sv: elevenlabs
ffmpeg:
  sample_rate: 48000
"#;
        let config: Config = serde_yml::from_str(yaml).unwrap();

        assert_eq!(config.comms.own_callout, "ESA777");
        assert_eq!(config.comms.other_callouts.len(), 4);
        assert_eq!(config.comms.engine_for(Locale::Sv), EngineKind::ElevenLabs);
        // Unlisted locales fall back to the local OS voice.
        assert_eq!(config.comms.engine_for(Locale::En), EngineKind::Say);
        assert_eq!(config.ffmpeg.sample_rate, 48000);
        assert_eq!(config.ffmpeg.channels, 1);
        assert_eq!(config.openai.model, "tts-1-hd");
    }

    #[test]
    fn voice_profile_defaults_speaker_boost() {
        let yaml = r#"
elevenlabs:
  voices:
    en:
      voice_id: abc
      stability: 0.5
      similarity_boost: 0.75
      style: 0.0
"#;
        let config: Config = serde_yml::from_str(yaml).unwrap();
        let profile = &config.elevenlabs.voices[&Locale::En];

        assert!(profile.use_speaker_boost);
        assert_eq!(profile.speed, None);
        assert!(!config.elevenlabs.voices.contains_key(&Locale::Sv));
    }

    #[test]
    fn defaults_cover_every_locale() {
        let config = Config::default();
        for locale in Locale::ALL {
            assert!(config.elevenlabs.voices.contains_key(&locale));
            assert!(config.comms.engines.contains_key(&locale));
        }
        assert_eq!(config.nback.letters.len(), 8);
        assert!(!config.nback.trim_offsets.contains_key(&Locale::El));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/matb-voicegen.yaml")));
        assert_eq!(config.ffmpeg.binary, "ffmpeg");
    }
}
