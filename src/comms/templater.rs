//! Scenario token → spoken radio instruction.

use super::callout::{format_callout, CalloutCycle};
use super::lexicon::Lexicon;
use super::token::{FrequencyPair, Origin, RadioDesignator, ScenarioToken};
use crate::locale::Locale;

/// Renders utterances for one locale pass at a time.
///
/// Owns the other-traffic callout cursor; `start_pass` switches locale and
/// restarts the rotation at the first callout.
pub struct UtteranceTemplater {
    lexicon: &'static Lexicon,
    own_callout: String,
    cycle: CalloutCycle,
}

impl UtteranceTemplater {
    pub fn new(locale: Locale, own_callout: &str, other_callouts: &[String]) -> Self {
        Self {
            lexicon: Lexicon::for_locale(locale),
            own_callout: own_callout.to_string(),
            cycle: CalloutCycle::new(other_callouts.to_vec()),
        }
    }

    pub fn locale(&self) -> Locale {
        self.lexicon.locale
    }

    /// Render the utterance for a legacy file name, or `None` if the name is
    /// not a scenario token.
    pub fn render_file(&mut self, file_name: &str) -> Option<String> {
        let token = ScenarioToken::from_file_name(file_name)?;
        Some(self.render(&token))
    }

    pub fn render(&mut self, token: &ScenarioToken) -> String {
        let radio = self.radio_phrase(&token.radio);
        let callout = self.next_callout(token.origin);
        let callout = format_callout(&callout, self.lexicon);
        let (main, secondary) = self.frequency_phrase(&token.frequency);
        self.lexicon.render(&callout, &radio, &main, &secondary)
    }

    /// Begin a locale pass: select its lexicon and rewind the rotation.
    pub fn start_pass(&mut self, locale: Locale) {
        self.lexicon = Lexicon::for_locale(locale);
        self.cycle.reset();
    }

    fn next_callout(&mut self, origin: Origin) -> String {
        match origin {
            Origin::Own => self.own_callout.clone(),
            // An empty rotation list degrades to the own-ship callout.
            Origin::Other => self
                .cycle
                .next_callout()
                .unwrap_or(self.own_callout.as_str())
                .to_string(),
        }
    }

    fn radio_phrase(&self, radio: &RadioDesignator) -> String {
        let name = self.lexicon.radio_name(&radio.kind);
        let index = match radio.index.len() {
            0 => return name.to_string(),
            1 => self.lexicon.spell_digits(&radio.index),
            _ => radio.index.clone(),
        };
        format!("{name} {index}")
    }

    fn frequency_phrase(&self, frequency: &FrequencyPair) -> (String, String) {
        (
            self.lexicon.spell_digits(&frequency.main),
            self.lexicon.spell_digits(&frequency.secondary),
        )
    }
}
