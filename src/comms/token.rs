//! Scenario tokens encoded in legacy file names.
//!
//! `<TYPE>_<RADIO><NUM>_<MAINFREQ>-<SECFREQ>.wav`, e.g. `OWN_COM1_118-300.wav`.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("valid regex"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Addressed to the trainee's own aircraft.
    Own,
    /// Addressed to other traffic.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioDesignator {
    /// Alphabetic part, e.g. `COM`.
    pub kind: String,
    /// Numeric part, e.g. `1`. Empty when the designator has no digits.
    pub index: String,
}

impl RadioDesignator {
    fn parse(field: &str) -> Self {
        let kind = LETTERS.find_iter(field).map(|m| m.as_str()).collect();
        let index = DIGITS.find_iter(field).map(|m| m.as_str()).collect();
        Self { kind, index }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyPair {
    pub main: String,
    pub secondary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioToken {
    pub origin: Origin,
    pub radio: RadioDesignator,
    pub frequency: FrequencyPair,
}

impl ScenarioToken {
    /// Parse a file stem. Returns `None` unless it has exactly three
    /// underscore-separated fields and a two-part hyphenated frequency.
    pub fn parse(stem: &str) -> Option<Self> {
        let fields: Vec<&str> = stem.split('_').collect();
        let [origin, radio, frequency] = fields.as_slice() else {
            return None;
        };

        let groups: Vec<&str> = frequency.split('-').collect();
        let [main, secondary] = groups.as_slice() else {
            return None;
        };

        let origin = if *origin == "OWN" {
            Origin::Own
        } else {
            Origin::Other
        };

        Some(Self {
            origin,
            radio: RadioDesignator::parse(radio),
            frequency: FrequencyPair {
                main: (*main).to_string(),
                secondary: (*secondary).to_string(),
            },
        })
    }

    /// Parse a file name, ignoring its extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = Path::new(name).file_stem()?.to_str()?;
        Self::parse(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_own_ship_token() {
        let token = ScenarioToken::from_file_name("OWN_COM1_118-300.wav").unwrap();
        assert_eq!(token.origin, Origin::Own);
        assert_eq!(token.radio.kind, "COM");
        assert_eq!(token.radio.index, "1");
        assert_eq!(token.frequency.main, "118");
        assert_eq!(token.frequency.secondary, "300");
    }

    #[test]
    fn any_other_origin_is_other_traffic() {
        let token = ScenarioToken::parse("OTHER_NAV2_121.5-500").unwrap();
        assert_eq!(token.origin, Origin::Other);
        assert_eq!(token.frequency.main, "121.5");

        let token = ScenarioToken::parse("own_NAV2_121-500").unwrap();
        assert_eq!(token.origin, Origin::Other);
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        assert_eq!(ScenarioToken::from_file_name("BADNAME.wav"), None);
        assert_eq!(ScenarioToken::parse("OWN_COM1"), None);
        assert_eq!(ScenarioToken::parse("OWN_COM1_118-300_extra"), None);
        assert_eq!(ScenarioToken::parse(""), None);
    }

    #[test]
    fn frequency_without_two_groups_is_rejected() {
        assert_eq!(ScenarioToken::parse("OWN_COM1_118300"), None);
        assert_eq!(ScenarioToken::parse("OWN_COM1_118-300-5"), None);
    }

    #[test]
    fn designator_concatenates_runs() {
        let token = ScenarioToken::parse("OWN_COM12_118-300").unwrap();
        assert_eq!(token.radio.index, "12");

        let token = ScenarioToken::parse("OWN_XPDR_118-300").unwrap();
        assert_eq!(token.radio.kind, "XPDR");
        assert_eq!(token.radio.index, "");
    }
}
