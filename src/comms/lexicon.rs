//! Per-locale word tables for radio prompts.
//!
//! Each locale owns exactly one `Lexicon`: digit words, phonetic
//! substitutions for callsign fragments, radio names and the sentence
//! template. Entries are literal lookups kept in step with previously
//! recorded audio; they are not derived from any general rule.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::locale::Locale;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(callout|radio|main|secondary)\}").expect("valid regex")
});

/// Digits spoken as symbols; the neural voices read them natively.
const LITERAL_DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Sentence template placeholders: `{callout}`, `{radio}`, `{main}`, `{secondary}`.
pub struct Lexicon {
    pub locale: Locale,
    digits: [&'static str; 10],
    phonetics: &'static [(&'static str, &'static str)],
    comm: &'static str,
    nav: &'static str,
    template: &'static str,
}

static EN: Lexicon = Lexicon {
    locale: Locale::En,
    // ICAO radiotelephony pronunciations
    digits: [
        "zero", "one", "two", "tree", "fower", "fife", "six", "seven", "eight", "niner",
    ],
    phonetics: &[("ESA", "eesah")],
    comm: "Comm",
    nav: "Nav",
    template: "{callout}, {callout}, turn your {radio} radio, to frequency, {main}, point, {secondary}",
};

static EL: Lexicon = Lexicon {
    locale: Locale::El,
    digits: LITERAL_DIGITS,
    phonetics: &[
        ("ESA", "Ίσα"),
        ("Citrus", "Σίτρους"),
        ("AC", "Έι Σι"),
        ("SK", "Ές Κά"),
        ("A", "Άλφα"),
    ],
    comm: "Κομ",
    nav: "Ναβ",
    template: "{callout}, {callout}, ρυθμίστε το ραδιόφωνο {radio}, στη συχνότητα, {main}, κόμμα, {secondary}",
};

static SV: Lexicon = Lexicon {
    locale: Locale::Sv,
    digits: LITERAL_DIGITS,
    phonetics: &[("ESA", "eesah")],
    comm: "Comm",
    nav: "Nav",
    template: "{callout}, {callout}, ställ in din {radio}-radio, på frekvens, {main}, punkt, {secondary}",
};

impl Lexicon {
    pub fn for_locale(locale: Locale) -> &'static Lexicon {
        match locale {
            Locale::En => &EN,
            Locale::El => &EL,
            Locale::Sv => &SV,
        }
    }

    /// Word for a single character; non-digits pass through unchanged.
    pub fn digit_word(&self, c: char) -> String {
        match c.to_digit(10) {
            Some(d) => self.digits[d as usize].to_string(),
            None => c.to_string(),
        }
    }

    /// Spell a digit group word by word, dropping `-` and `.` separators.
    pub fn spell_digits(&self, group: &str) -> String {
        group
            .chars()
            .filter(|c| *c != '-' && *c != '.')
            .map(|c| self.digit_word(c))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Phonetic spelling of a callsign fragment, or the fragment itself.
    pub fn phonetic<'a>(&self, fragment: &'a str) -> &'a str {
        self.phonetics
            .iter()
            .find(|(from, _)| *from == fragment)
            .map_or(fragment, |(_, to)| *to)
    }

    /// Spoken name for a radio type prefix. Unknown prefixes pass through.
    pub fn radio_name<'a>(&self, prefix: &'a str) -> &'a str {
        match prefix {
            "COM" => self.comm,
            "NAV" => self.nav,
            other => other,
        }
    }

    /// Fill the template in one pass; substituted text is never rescanned.
    pub fn render(&self, callout: &str, radio: &str, main: &str, secondary: &str) -> String {
        PLACEHOLDER
            .replace_all(self.template, |caps: &Captures| match &caps[1] {
                "callout" => callout,
                "radio" => radio,
                "main" => main,
                _ => secondary,
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_uses_radiotelephony_digits() {
        let en = Lexicon::for_locale(Locale::En);
        assert_eq!(en.spell_digits("349"), "tree fower niner");
    }

    #[test]
    fn spelled_group_has_one_word_per_digit_in_order() {
        for locale in Locale::ALL {
            let lexicon = Lexicon::for_locale(locale);
            let digits = "9081726354";
            let spelled = lexicon.spell_digits(digits);
            let words: Vec<&str> = spelled.split(' ').collect();
            assert_eq!(words.len(), digits.len(), "{locale}");
            for (word, c) in words.iter().zip(digits.chars()) {
                assert_eq!(*word, lexicon.digit_word(c), "{locale}");
            }
        }
    }

    #[test]
    fn greek_and_swedish_speak_digits_as_symbols() {
        for locale in [Locale::El, Locale::Sv] {
            let lexicon = Lexicon::for_locale(locale);
            assert_eq!(lexicon.spell_digits("118"), "1 1 8", "{locale}");
            assert_eq!(lexicon.digit_word('0'), "0", "{locale}");
        }
    }

    #[test]
    fn punctuation_is_stripped_and_letters_pass_through() {
        let sv = Lexicon::for_locale(Locale::Sv);
        assert_eq!(sv.spell_digits("12.5"), "1 2 5");
        assert_eq!(sv.spell_digits("1x"), "1 x");

        let en = Lexicon::for_locale(Locale::En);
        assert_eq!(en.spell_digits("12.5"), "one two fife");
        assert_eq!(en.spell_digits("1x"), "one x");
    }

    #[test]
    fn placeholders_inside_substituted_text_are_left_alone() {
        let en = Lexicon::for_locale(Locale::En);
        let text = en.render("X{main}", "Comm {secondary}", "one", "two");
        assert_eq!(
            text,
            "X{main}, X{main}, turn your Comm {secondary} radio, to frequency, one, point, two"
        );
    }

    #[test]
    fn single_letter_prefix_differs_between_locales() {
        assert_eq!(Lexicon::for_locale(Locale::El).phonetic("A"), "Άλφα");
        assert_eq!(Lexicon::for_locale(Locale::En).phonetic("A"), "A");
        assert_eq!(Lexicon::for_locale(Locale::Sv).phonetic("A"), "A");
    }

    #[test]
    fn radio_names_map_known_prefixes_only() {
        let el = Lexicon::for_locale(Locale::El);
        assert_eq!(el.radio_name("COM"), "Κομ");
        assert_eq!(el.radio_name("NAV"), "Ναβ");
        assert_eq!(el.radio_name("ADF"), "ADF");
    }
}
