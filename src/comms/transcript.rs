//! Plain-text listing of what each generated file says.

use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::info;

use crate::error::{GenError, Result};
use crate::locale::Locale;

pub const TRANSCRIPT_FILE: &str = "transcript.txt";

pub struct Transcript {
    locale: Locale,
    entries: Vec<(String, String)>,
}

impl Transcript {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, file: &str, utterance: &str) {
        self.entries.push((file.to_string(), utterance.to_string()));
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "# {} utterances, generated {}\n",
            self.locale,
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        for (file, utterance) in &self.entries {
            out.push_str(&format!("{file}: {utterance}\n"));
        }
        out
    }

    /// Write `transcript.txt` into `dir`, replacing any previous one.
    pub fn write(&self, dir: &Path) -> Result<()> {
        let path = dir.join(TRANSCRIPT_FILE);
        fs::write(&path, self.render()).map_err(|e| GenError::io(&path, e))?;
        info!("[{}] Wrote {} transcript lines to {}", self.locale, self.entries.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_one_line_per_file() {
        let mut transcript = Transcript::new(Locale::Sv);
        transcript.push("OWN_COM1_118-300.wav", "eesah 5 0 4");
        transcript.push("OTHER_NAV2_121-500.wav", "A 3 3");

        let text = transcript.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("# sv utterances, generated "));
        assert_eq!(lines[1], "OWN_COM1_118-300.wav: eesah 5 0 4");
        assert_eq!(lines[2], "OTHER_NAV2_121-500.wav: A 3 3");
    }

    #[test]
    fn writes_into_locale_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut transcript = Transcript::new(Locale::En);
        transcript.push("a.wav", "alpha");
        transcript.write(dir.path()).unwrap();

        let written = fs::read_to_string(dir.path().join(TRANSCRIPT_FILE)).unwrap();
        assert!(written.ends_with("a.wav: alpha\n"));
    }
}
