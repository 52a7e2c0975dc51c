use std::fmt;

use serde::{Deserialize, Serialize};

/// UI language. Japanese is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Jp,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Jp, Locale::En];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Jp => "jp",
            Locale::En => "en",
        }
    }

    /// Strict parse of a stored or requested flag: only `"jp"` and `"en"`.
    pub fn parse(value: &str) -> Option<Locale> {
        match value {
            "jp" => Some(Locale::Jp),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Locale from the persisted flag; absent or unknown values fall back to
    /// Japanese.
    pub fn from_stored(value: Option<&str>) -> Locale {
        value.and_then(Locale::parse).unwrap_or_default()
    }

    /// Choose between a Japanese and an English string.
    pub fn pick<'a>(self, jp: &'a str, en: &'a str) -> &'a str {
        match self {
            Locale::Jp => jp,
            Locale::En => en,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_round_trip() {
        for l in Locale::ALL {
            assert_eq!(Locale::from_stored(Some(l.as_str())), l);
        }
    }

    #[test]
    fn bad_stored_values_fall_back_to_jp() {
        assert_eq!(Locale::from_stored(None), Locale::Jp);
        assert_eq!(Locale::from_stored(Some("")), Locale::Jp);
        assert_eq!(Locale::from_stored(Some("EN")), Locale::Jp);
        assert_eq!(Locale::from_stored(Some("ja")), Locale::Jp);
    }

    #[test]
    fn pick_follows_locale() {
        assert_eq!(Locale::Jp.pick("代表作", "Works"), "代表作");
        assert_eq!(Locale::En.pick("代表作", "Works"), "Works");
    }
}
