//! Locale-keyed static content tables.
//!
//! The tables are authored in `content/portfolio.json` and bundled into the
//! binary. They are read-only after load.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locale::Locale;

/// The bundled content document.
pub const BUNDLED_CATALOG: &str = include_str!("../../content/portfolio.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{locale} catalog has a work item without an id")]
    EmptyWorkId { locale: Locale },
    #[error("{locale} catalog repeats work id `{id}`")]
    DuplicateWorkId { locale: Locale, id: String },
}

/// A string authored in both languages, shown according to the locale.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SectionPair {
    pub jp: String,
    pub en: String,
}

impl SectionPair {
    pub fn get(&self, locale: Locale) -> &str {
        locale.pick(&self.jp, &self.en)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkLink {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkItem {
    pub id: String,
    pub name: String,
    pub jp_label: String,
    pub en_label: String,
    pub preview_image: Option<String>,
    pub preview_alt: Option<String>,
    pub outcome: String,
    pub role: String,
    pub summary: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub links: Vec<WorkLink>,
    pub url_label: String,
    pub url: String,
}

impl WorkItem {
    pub fn label(&self, locale: Locale) -> &str {
        locale.pick(&self.jp_label, &self.en_label)
    }

    /// Explicit links, or the single primary link when none are listed.
    pub fn display_links(&self) -> Vec<WorkLink> {
        if self.links.is_empty() {
            vec![WorkLink {
                label: self.url_label.clone(),
                url: self.url.clone(),
            }]
        } else {
            self.links.clone()
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SkillGroup {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NavCopy {
    pub works: String,
    pub about: String,
    pub contact: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HeroCta {
    pub linkedin: String,
    pub email: String,
    pub works: String,
    pub resume: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HeroCopy {
    pub overline: String,
    pub display: SectionPair,
    pub sub: SectionPair,
    pub meta: SectionPair,
    pub coe: SectionPair,
    pub orb_caption: String,
    pub cta: HeroCta,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SectionTitles {
    pub works: SectionPair,
    pub craft: SectionPair,
    pub skills: SectionPair,
    pub about: SectionPair,
    pub contact: SectionPair,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AboutCopy {
    pub paragraph: SectionPair,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContactCopy {
    pub headline: SectionPair,
    pub subline: String,
    #[serde(default)]
    pub small_meta: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FooterCopy {
    pub copyright: String,
    pub github: String,
    pub linkedin: String,
    pub contact: String,
}

/// Short interface strings that are not part of any section body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UiText {
    pub all: String,
    pub outcome: String,
    pub role: String,
    pub close: String,
    pub no_match: String,
    pub skill_hint: String,
    pub copied: String,
    pub copy_email: String,
}

/// Every string the page shows in one locale.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PortfolioCopy {
    pub nav: NavCopy,
    pub hero: HeroCopy,
    pub section_titles: SectionTitles,
    #[serde(default)]
    pub works: Vec<WorkItem>,
    #[serde(default)]
    pub craft: Vec<SectionPair>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    pub about: AboutCopy,
    pub contact: ContactCopy,
    pub footer: FooterCopy,
    pub ui: UiText,
}

impl PortfolioCopy {
    /// Static copy addressed by a dotted key, as used by `data-i18n`
    /// attributes in the page. Pairs resolve through `locale`.
    pub fn text(&self, key: &str, locale: Locale) -> Option<&str> {
        let s = match key {
            "nav.works" => &self.nav.works,
            "nav.about" => &self.nav.about,
            "nav.contact" => &self.nav.contact,
            "hero.overline" => &self.hero.overline,
            "hero.display" => return Some(self.hero.display.get(locale)),
            "hero.sub" => return Some(self.hero.sub.get(locale)),
            "hero.meta" => return Some(self.hero.meta.get(locale)),
            "hero.coe" => return Some(self.hero.coe.get(locale)),
            "hero.orb_caption" => &self.hero.orb_caption,
            "hero.cta.linkedin" => &self.hero.cta.linkedin,
            "hero.cta.email" => &self.hero.cta.email,
            "hero.cta.works" => &self.hero.cta.works,
            "hero.cta.resume" => &self.hero.cta.resume,
            "section.works" => return Some(self.section_titles.works.get(locale)),
            "section.craft" => return Some(self.section_titles.craft.get(locale)),
            "section.skills" => return Some(self.section_titles.skills.get(locale)),
            "section.about" => return Some(self.section_titles.about.get(locale)),
            "section.contact" => return Some(self.section_titles.contact.get(locale)),
            "about.paragraph" => return Some(self.about.paragraph.get(locale)),
            "contact.headline" => return Some(self.contact.headline.get(locale)),
            "contact.subline" => &self.contact.subline,
            "footer.copyright" => &self.footer.copyright,
            "footer.github" => &self.footer.github,
            "footer.linkedin" => &self.footer.linkedin,
            "footer.contact" => &self.footer.contact,
            _ => return None,
        };
        Some(s.as_str())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub jp: PortfolioCopy,
    pub en: PortfolioCopy,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn copy(&self, locale: Locale) -> &PortfolioCopy {
        match locale {
            Locale::Jp => &self.jp,
            Locale::En => &self.en,
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for locale in Locale::ALL {
            let mut seen = HashSet::new();
            for work in &self.copy(locale).works {
                if work.id.trim().is_empty() {
                    return Err(CatalogError::EmptyWorkId { locale });
                }
                if !seen.insert(work.id.as_str()) {
                    return Err(CatalogError::DuplicateWorkId {
                        locale,
                        id: work.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads() {
        let catalog = Catalog::bundled().expect("bundled catalog");
        assert_eq!(catalog.jp.works.len(), catalog.en.works.len());
        assert!(!catalog.en.skills.is_empty());
        assert_eq!(catalog.copy(Locale::En).nav.works, "Works");
    }

    #[test]
    fn display_links_fall_back_to_primary_url() {
        let work = WorkItem {
            url_label: "Site".into(),
            url: "https://example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            work.display_links(),
            vec![WorkLink {
                label: "Site".into(),
                url: "https://example.com".into()
            }]
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut catalog = Catalog::bundled().expect("bundled catalog");
        let first = catalog.en.works[0].clone();
        catalog.en.works.push(first);
        let text = serde_json::to_string(&catalog).expect("serialize");
        match Catalog::from_json(&text) {
            Err(CatalogError::DuplicateWorkId { locale, .. }) => assert_eq!(locale, Locale::En),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_ids_are_rejected() {
        let mut catalog = Catalog::bundled().expect("bundled catalog");
        catalog.en.works[0].id = "  ".into();
        let text = serde_json::to_string(&catalog).expect("serialize");
        match Catalog::from_json(&text) {
            Err(CatalogError::EmptyWorkId { locale }) => assert_eq!(locale, Locale::En),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn text_keys_resolve_per_locale() {
        let catalog = Catalog::bundled().expect("bundled catalog");
        let en = catalog.copy(Locale::En);
        assert_eq!(en.text("nav.about", Locale::En), Some("About"));
        assert_eq!(en.text("section.works", Locale::En), Some("Selected Works"));
        assert_eq!(en.text("section.works", Locale::Jp), Some("代表作"));
        assert_eq!(en.text("nav.unknown", Locale::En), None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Catalog::from_json("{\"jp\": 1}"),
            Err(CatalogError::Parse(_))
        ));
    }
}
