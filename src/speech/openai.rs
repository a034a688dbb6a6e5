//! OpenAI speech endpoint client.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::config::OpenAiConfig;
use crate::error::{GenError, Result};

pub struct OpenAiSpeech {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    voice: String,
}

impl OpenAiSpeech {
    pub fn new(config: &OpenAiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/v1/audio/speech", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            voice: config.voice.clone(),
        })
    }

    /// Returns MP3 bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let t0 = Instant::now();
        let body = json!({
            "model": self.model,
            "voice": self.voice,
            "input": text,
            "response_format": "mp3",
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenError::Provider {
                provider: "openai",
                status: status.as_u16(),
                body,
            });
        }

        let audio = resp.bytes().await?;
        debug!(
            "OpenAI returned {} bytes in {:.0}ms",
            audio.len(),
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(audio.to_vec())
    }
}
