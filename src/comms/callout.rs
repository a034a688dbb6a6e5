//! Aircraft callouts: the round-robin cursor and phonetic formatting.

use std::sync::LazyLock;

use regex::Regex;

use super::lexicon::Lexicon;

static RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+|\d+").expect("valid regex"));

/// Fixed-order repeating sequence of other-traffic callouts.
#[derive(Debug, Clone)]
pub struct CalloutCycle {
    callouts: Vec<String>,
    cursor: usize,
}

impl CalloutCycle {
    pub fn new(callouts: Vec<String>) -> Self {
        Self {
            callouts,
            cursor: 0,
        }
    }

    /// Next callout, wrapping after the last. `None` only if the list is empty.
    pub fn next_callout(&mut self) -> Option<&str> {
        if self.callouts.is_empty() {
            return None;
        }
        let idx = self.cursor;
        self.cursor = (self.cursor + 1) % self.callouts.len();
        Some(&self.callouts[idx])
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Spell a callout for speech: digit runs become digit words, letter runs go
/// through the locale's phonetic table.
pub fn format_callout(callout: &str, lexicon: &Lexicon) -> String {
    RUNS.find_iter(callout)
        .map(|m| {
            let part = m.as_str();
            if part.as_bytes()[0].is_ascii_digit() {
                lexicon.spell_digits(part)
            } else {
                lexicon.phonetic(part).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    fn cycle() -> CalloutCycle {
        CalloutCycle::new(vec!["A 33395".into(), "Citrus 211".into(), "SK 580".into()])
    }

    #[test]
    fn visits_in_order_and_wraps() {
        let mut cycle = cycle();
        let seen: Vec<String> = (0..5)
            .map(|_| cycle.next_callout().unwrap().to_string())
            .collect();
        assert_eq!(
            seen,
            ["A 33395", "Citrus 211", "SK 580", "A 33395", "Citrus 211"]
        );
    }

    #[test]
    fn reset_returns_to_first_entry() {
        let mut cycle = cycle();
        cycle.next_callout();
        cycle.next_callout();
        cycle.reset();
        assert_eq!(cycle.next_callout(), Some("A 33395"));
    }

    #[test]
    fn empty_cycle_yields_nothing() {
        let mut cycle = CalloutCycle::new(Vec::new());
        assert_eq!(cycle.next_callout(), None);
    }

    #[test]
    fn formats_own_ship_callout_per_locale() {
        let en = Lexicon::for_locale(Locale::En);
        let el = Lexicon::for_locale(Locale::El);
        assert_eq!(format_callout("ESA504", en), "eesah fife zero fower");
        assert_eq!(format_callout("ESA504", el), "Ίσα 5 0 4");
    }

    #[test]
    fn splits_mixed_runs_without_separators() {
        let el = Lexicon::for_locale(Locale::El);
        assert_eq!(format_callout("AC5171", el), "Έι Σι 5 1 7 1");

        let sv = Lexicon::for_locale(Locale::Sv);
        assert_eq!(format_callout("Citrus 211", sv), "Citrus 2 1 1");
    }
}
