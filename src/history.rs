//! Generation history and daily reporting.
//!
//! Every synthesis attempt is appended as one JSON line to
//! `~/.matb-voicegen-history/YYYY-MM-DD.jsonl`.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::HistoryConfig;

/// One synthesis attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub timestamp: String,
    pub task: String,
    pub locale: String,
    pub file: String,
    pub text: String,
    pub engine: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub synth_ms: i64,
    pub convert_ms: i64,
    #[serde(default)]
    pub audio_duration_s: Option<f64>,
}

impl GenerationRecord {
    pub fn now(task: &str, locale: &str, file: &str, text: &str, engine: &str) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            task: task.into(),
            locale: locale.into(),
            file: file.into(),
            text: text.into(),
            engine: engine.into(),
            status: String::new(),
            error: None,
            synth_ms: 0,
            convert_ms: 0,
            audio_duration_s: None,
        }
    }
}

/// Append-only JSONL log, one file per day.
pub struct History {
    dir: Option<PathBuf>,
}

impl History {
    pub fn from_config(config: &HistoryConfig) -> Self {
        if !config.enabled {
            return Self { dir: None };
        }
        let dir = config.dir.clone().or_else(|| {
            dirs::home_dir().map(|h| h.join(".matb-voicegen-history"))
        });
        Self { dir }
    }

    pub fn disabled() -> Self {
        Self { dir: None }
    }

    fn file_for(&self, date: &str) -> Option<PathBuf> {
        let date = if date == "today" {
            Local::now().format("%Y-%m-%d").to_string()
        } else {
            date.to_string()
        };
        self.dir.as_ref().map(|d| d.join(format!("{date}.jsonl")))
    }

    pub fn save(&self, record: &GenerationRecord) {
        let Some(path) = self.file_for("today") else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                error!("Failed to create history dir: {e}");
                return;
            }
        }

        match fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(mut file) => match serde_json::to_string(record) {
                Ok(json) => {
                    if let Err(e) = writeln!(file, "{json}") {
                        error!("Failed to write history record: {e}");
                    }
                }
                Err(e) => error!("Failed to serialize record: {e}"),
            },
            Err(e) => error!("Failed to open history file: {e}"),
        }
    }

    pub fn load(&self, date: &str) -> Vec<GenerationRecord> {
        let Some(path) = self.file_for(date) else {
            return Vec::new();
        };
        let Ok(file) = fs::File::open(&path) else {
            return Vec::new();
        };

        std::io::BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(&line) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("Skipping malformed history line: {e}");
                    None
                }
            })
            .collect()
    }

    /// Markdown summary of one day's generation attempts.
    pub fn report(&self, date: &str) -> String {
        let records = self.load(date);
        let display_date = if date == "today" {
            Local::now().format("%Y-%m-%d").to_string()
        } else {
            date.to_string()
        };

        if records.is_empty() {
            return format!("# matb-voicegen Report - {display_date}\n\nNo audio generated.");
        }

        let ok: Vec<&GenerationRecord> =
            records.iter().filter(|r| r.status == "generated").collect();
        let failed: Vec<&GenerationRecord> =
            records.iter().filter(|r| r.status != "generated").collect();

        let avg = |values: Vec<i64>| -> f64 {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<i64>() as f64 / values.len() as f64
            }
        };
        let avg_synth = avg(ok.iter().map(|r| r.synth_ms).collect());
        let avg_convert = avg(ok.iter().map(|r| r.convert_ms).collect());
        let total_audio: f64 = ok.iter().filter_map(|r| r.audio_duration_s).sum();

        let mut per_locale: BTreeMap<(&str, &str), (usize, usize)> = BTreeMap::new();
        for r in &records {
            let entry = per_locale.entry((r.task.as_str(), r.locale.as_str())).or_default();
            if r.status == "generated" {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }

        let mut lines = vec![
            format!("# matb-voicegen Report - {display_date}"),
            String::new(),
            "## Summary".to_string(),
            format!("- **Attempts**: {}", records.len()),
            format!("- **Generated**: {}", ok.len()),
            format!("- **Failed**: {}", failed.len()),
            format!("- **Total audio**: {total_audio:.1}s"),
            format!("- **Average synthesis**: {avg_synth:.0}ms"),
            format!("- **Average conversion**: {avg_convert:.0}ms"),
            String::new(),
            "## By Locale".to_string(),
            String::new(),
            "| Task | Locale | Generated | Failed |".to_string(),
            "|------|--------|-----------|--------|".to_string(),
        ];
        for ((task, locale), (generated, failures)) in &per_locale {
            lines.push(format!("| {task} | {locale} | {generated} | {failures} |"));
        }

        if !failed.is_empty() {
            lines.extend([String::new(), "## Failures".to_string(), String::new()]);
            for r in &failed {
                lines.push(format!(
                    "- `{}` ({}/{}): {}",
                    r.file,
                    r.task,
                    r.locale,
                    r.error.as_deref().unwrap_or("unknown error")
                ));
            }
        }

        lines.join("\n")
    }
}
