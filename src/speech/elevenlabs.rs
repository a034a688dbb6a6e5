//! ElevenLabs text-to-speech client.
//!
//! Every request carries the locale's voice settings; short utterances are
//! unstable without them.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::{ElevenLabsConfig, VoiceProfile};
use crate::error::{GenError, Result};

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

pub struct ElevenLabsSpeech {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    profile: VoiceProfile,
}

impl ElevenLabsSpeech {
    pub fn new(config: &ElevenLabsConfig, api_key: String, profile: VoiceProfile) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            profile,
        })
    }

    fn request<'a>(&'a self, text: &'a str) -> SynthesisRequest<'a> {
        SynthesisRequest {
            text,
            model_id: &self.model,
            voice_settings: VoiceSettings {
                stability: self.profile.stability,
                similarity_boost: self.profile.similarity_boost,
                style: self.profile.style,
                use_speaker_boost: self.profile.use_speaker_boost,
                speed: self.profile.speed,
            },
        }
    }

    /// Returns MP3 bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let t0 = Instant::now();
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, self.profile.voice_id);

        let resp = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&self.request(text))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenError::Provider {
                provider: "elevenlabs",
                status: status.as_u16(),
                body,
            });
        }

        let audio = resp.bytes().await?;
        debug!(
            "ElevenLabs voice {} returned {} bytes in {:.0}ms",
            self.profile.voice_id,
            audio.len(),
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(speed: Option<f32>) -> VoiceProfile {
        VoiceProfile {
            voice_id: "voice".into(),
            stability: 1.0,
            similarity_boost: 0.5,
            style: 0.4,
            use_speaker_boost: true,
            speed,
        }
    }

    #[test]
    fn request_body_carries_prosody() {
        let engine =
            ElevenLabsSpeech::new(&ElevenLabsConfig::default(), "key".into(), profile(Some(0.7)))
                .unwrap();
        let body = serde_json::to_value(engine.request("Bokstaven ce.")).unwrap();

        assert_eq!(body["text"], "Bokstaven ce.");
        assert_eq!(body["model_id"], "eleven_multilingual_v2");
        assert_eq!(body["voice_settings"]["stability"], 1.0);
        assert_eq!(body["voice_settings"]["similarity_boost"], 0.5);
        assert_eq!(body["voice_settings"]["use_speaker_boost"], true);
        assert!((body["voice_settings"]["speed"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn speed_is_omitted_when_unset() {
        let engine =
            ElevenLabsSpeech::new(&ElevenLabsConfig::default(), "key".into(), profile(None))
                .unwrap();
        let body = serde_json::to_value(engine.request(", Κάππα.")).unwrap();

        assert!(body["voice_settings"].get("speed").is_none());
    }
}
