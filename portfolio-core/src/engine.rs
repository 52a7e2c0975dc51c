//! The controller that owns every piece of interactive page state.
//!
//! The host UI layer feeds [`Event`]s (and scroll samples) in, renders from
//! the derived getters, and carries out the returned [`Effect`]s.

use log::debug;

use crate::catalog::{Catalog, PortfolioCopy, WorkItem};
use crate::constants::{COPY_ACK_MS, HEADER_COMPACT_THRESHOLD, SECTION_PROBE_RATIO};
use crate::locale::Locale;
use crate::scroll::{
    NavHighlight, ScrollMetrics, ScrollState, ScrollTracker, SectionId, SectionLayout,
};
use crate::selection::SelectionStore;
use crate::works;

/// Tunables with the page's defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub probe_ratio: f64,
    pub compact_threshold: f64,
    pub copy_ack_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            probe_ratio: SECTION_PROBE_RATIO,
            compact_threshold: HEADER_COMPACT_THRESHOLD,
            copy_ack_ms: COPY_ACK_MS,
        }
    }
}

/// Where a tag was clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickSurface {
    /// Chip row above the work list.
    FilterChip,
    /// Stack chip on a work card.
    WorkCard,
    /// Stack chip inside the case drawer.
    Drawer,
    SkillList,
    SkillSphere,
}

impl PickSurface {
    /// Value of the `data-surface` attribute carried by rendered chips.
    pub fn as_attr(self) -> &'static str {
        match self {
            PickSurface::FilterChip => "filter",
            PickSurface::WorkCard => "card",
            PickSurface::Drawer => "drawer",
            PickSurface::SkillList => "skills",
            PickSurface::SkillSphere => "sphere",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        [
            PickSurface::FilterChip,
            PickSurface::WorkCard,
            PickSurface::Drawer,
            PickSurface::SkillList,
            PickSurface::SkillSphere,
        ]
        .into_iter()
        .find(|s| s.as_attr() == value)
    }

    fn scrolls_to_works(self) -> bool {
        matches!(self, PickSurface::SkillList | PickSurface::SkillSphere)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    TagPicked { tag: String, surface: PickSurface },
    AllChipClicked,
    LocaleChanged(Locale),
    SkillGroupHovered(Option<usize>),
    SphereSkillHovered(Option<String>),
    DrawerOpened(String),
    DrawerClosed,
    /// `KeyboardEvent.key`.
    KeyPressed(String),
    EmailCopied,
    EmailCopyFailed,
    CopyAckExpired(u32),
}

/// Work the host has to carry out after an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    ScrollIntoView(SectionId),
    PersistLocale(Locale),
    /// Send `Event::CopyAckExpired(generation)` after `after_ms`.
    ScheduleCopyAckReset { generation: u32, after_ms: u32 },
}

#[derive(Debug)]
pub struct PortfolioEngine {
    catalog: Catalog,
    config: EngineConfig,
    locale: Locale,
    selection: SelectionStore,
    scroll: ScrollTracker,
    drawer_work_id: Option<String>,
    hovered_group: Option<usize>,
    hovered_skill: Option<String>,
    copy_ack: Option<u32>,
    copy_generation: u32,
}

impl PortfolioEngine {
    pub fn new(catalog: Catalog, locale: Locale) -> Self {
        Self::with_config(catalog, locale, EngineConfig::default())
    }

    pub fn with_config(catalog: Catalog, locale: Locale, config: EngineConfig) -> Self {
        Self {
            catalog,
            config,
            locale,
            selection: SelectionStore::new(),
            scroll: ScrollTracker::with_params(config.probe_ratio, config.compact_threshold),
            drawer_work_id: None,
            hovered_group: None,
            hovered_skill: None,
            copy_ack: None,
            copy_generation: 0,
        }
    }

    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::TagPicked { tag, surface } => {
                self.selection.select(&tag);
                if surface.scrolls_to_works() {
                    effects.push(Effect::ScrollIntoView(SectionId::Works));
                }
            }
            Event::AllChipClicked => self.selection.clear(),
            Event::LocaleChanged(locale) => {
                if locale != self.locale {
                    debug!("locale: {} -> {}", self.locale, locale);
                    self.locale = locale;
                    effects.push(Effect::PersistLocale(locale));
                }
            }
            Event::SkillGroupHovered(index) => self.hovered_group = index,
            Event::SphereSkillHovered(skill) => self.hovered_skill = skill,
            Event::DrawerOpened(id) => self.drawer_work_id = Some(id),
            Event::DrawerClosed => self.drawer_work_id = None,
            Event::KeyPressed(key) => {
                if key == "Escape" && self.drawer_work_id.take().is_some() {
                    debug!("drawer closed by keyboard");
                }
            }
            Event::EmailCopied => {
                self.copy_generation = self.copy_generation.wrapping_add(1);
                self.copy_ack = Some(self.copy_generation);
                effects.push(Effect::ScheduleCopyAckReset {
                    generation: self.copy_generation,
                    after_ms: self.config.copy_ack_ms,
                });
            }
            Event::EmailCopyFailed => self.copy_ack = None,
            Event::CopyAckExpired(generation) => {
                if self.copy_ack == Some(generation) {
                    self.copy_ack = None;
                }
            }
        }
        effects
    }

    /// Feed one scroll sample; all three scroll fields update together.
    pub fn scroll<L>(&mut self, metrics: &ScrollMetrics, layout: &L) -> ScrollState
    where
        L: SectionLayout + ?Sized,
    {
        self.scroll.sample(metrics, layout)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn copy(&self) -> &PortfolioCopy {
        self.catalog.copy(self.locale)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn is_highlighted(&self, label: &str) -> bool {
        self.selection.is_highlighted(label)
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    pub fn nav_highlight(&self) -> NavHighlight {
        NavHighlight::from_section(self.scroll.state().active_section)
    }

    pub fn filtered_works(&self) -> Vec<&WorkItem> {
        works::filter_works(&self.copy().works, self.selected())
    }

    pub fn available_stacks(&self) -> Vec<&str> {
        works::available_stacks(&self.copy().works)
    }

    pub fn sphere_skills(&self) -> Vec<&str> {
        works::sphere_skills(&self.copy().skills)
    }

    pub fn drawer_work(&self) -> Option<&WorkItem> {
        let id = self.drawer_work_id.as_deref()?;
        works::find_work(&self.copy().works, id)
    }

    /// Hovered sphere node, else the selection, else the hint.
    pub fn sphere_caption(&self) -> &str {
        self.hovered_skill
            .as_deref()
            .or(self.selected())
            .unwrap_or(self.copy().ui.skill_hint.as_str())
    }

    /// True while another group is hovered.
    pub fn skill_group_dimmed(&self, index: usize) -> bool {
        self.hovered_group.is_some_and(|active| active != index)
    }

    pub fn email_copied(&self) -> bool {
        self.copy_ack.is_some()
    }

    pub fn copy_button_label(&self) -> &str {
        let ui = &self.copy().ui;
        if self.email_copied() {
            &ui.copied
        } else {
            &ui.copy_email
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PortfolioEngine {
        PortfolioEngine::new(Catalog::bundled().expect("bundled catalog"), Locale::En)
    }

    fn pick(tag: &str, surface: PickSurface) -> Event {
        Event::TagPicked {
            tag: tag.to_string(),
            surface,
        }
    }

    #[test]
    fn only_skill_surfaces_scroll_to_works() {
        let mut e = engine();
        assert!(e.dispatch(pick("AWS", PickSurface::FilterChip)).is_empty());
        assert!(e.dispatch(pick("AWS", PickSurface::WorkCard)).is_empty());
        assert!(e.dispatch(pick("AWS", PickSurface::Drawer)).is_empty());
        assert_eq!(
            e.dispatch(pick("AWS", PickSurface::SkillList)),
            vec![Effect::ScrollIntoView(SectionId::Works)]
        );
        assert_eq!(
            e.dispatch(pick("AWS", PickSurface::SkillSphere)),
            vec![Effect::ScrollIntoView(SectionId::Works)]
        );
    }

    #[test]
    fn surfaces_round_trip_through_attributes() {
        for s in [PickSurface::FilterChip, PickSurface::SkillSphere, PickSurface::Drawer] {
            assert_eq!(PickSurface::from_attr(s.as_attr()), Some(s));
        }
        assert_eq!(PickSurface::from_attr("nav"), None);
    }

    #[test]
    fn all_chip_clears() {
        let mut e = engine();
        e.dispatch(pick("Nginx", PickSurface::FilterChip));
        assert_eq!(e.selected(), Some("Nginx"));
        e.dispatch(Event::AllChipClicked);
        assert_eq!(e.selected(), None);
    }

    #[test]
    fn blank_tag_shows_every_work() {
        let mut e = engine();
        e.dispatch(pick("React", PickSurface::FilterChip));
        e.dispatch(pick("", PickSurface::FilterChip));
        assert_eq!(e.selected(), None);
        assert_eq!(e.filtered_works().len(), e.copy().works.len());
    }

    #[test]
    fn locale_change_persists_once_and_keeps_selection() {
        let mut e = engine();
        e.dispatch(pick("React", PickSurface::FilterChip));
        assert_eq!(
            e.dispatch(Event::LocaleChanged(Locale::Jp)),
            vec![Effect::PersistLocale(Locale::Jp)]
        );
        assert!(e.dispatch(Event::LocaleChanged(Locale::Jp)).is_empty());
        assert_eq!(e.selected(), Some("React"));
        assert_eq!(e.copy().nav.works, "代表作");
    }

    #[test]
    fn escape_closes_open_drawer() {
        let mut e = engine();
        e.dispatch(Event::KeyPressed("Escape".into()));
        assert!(e.drawer_work().is_none());

        let id = e.copy().works[0].id.clone();
        e.dispatch(Event::DrawerOpened(id.clone()));
        assert_eq!(e.drawer_work().map(|w| w.id.as_str()), Some(id.as_str()));
        e.dispatch(Event::KeyPressed("Enter".into()));
        assert!(e.drawer_work().is_some());
        e.dispatch(Event::KeyPressed("Escape".into()));
        assert!(e.drawer_work().is_none());
    }

    #[test]
    fn unknown_drawer_id_shows_nothing() {
        let mut e = engine();
        e.dispatch(Event::DrawerOpened("missing".into()));
        assert!(e.drawer_work().is_none());
    }

    #[test]
    fn sphere_caption_prefers_hover_then_selection() {
        let mut e = engine();
        let hint = e.copy().ui.skill_hint.clone();
        assert_eq!(e.sphere_caption(), hint);
        e.dispatch(pick("Docker", PickSurface::SkillSphere));
        assert_eq!(e.sphere_caption(), "Docker");
        e.dispatch(Event::SphereSkillHovered(Some("Git".into())));
        assert_eq!(e.sphere_caption(), "Git");
        e.dispatch(Event::SphereSkillHovered(None));
        assert_eq!(e.sphere_caption(), "Docker");
    }

    #[test]
    fn hovered_group_dims_the_others() {
        let mut e = engine();
        assert!(!e.skill_group_dimmed(0));
        e.dispatch(Event::SkillGroupHovered(Some(1)));
        assert!(e.skill_group_dimmed(0));
        assert!(!e.skill_group_dimmed(1));
        e.dispatch(Event::SkillGroupHovered(None));
        assert!(!e.skill_group_dimmed(0));
    }

    fn reset_generation(effects: &[Effect]) -> u32 {
        match effects {
            [Effect::ScheduleCopyAckReset { generation, after_ms }] => {
                assert_eq!(*after_ms, COPY_ACK_MS);
                *generation
            }
            other => panic!("expected one reset effect, got {other:?}"),
        }
    }

    #[test]
    fn stale_copy_timer_keeps_newer_ack() {
        let mut e = engine();
        let g1 = reset_generation(&e.dispatch(Event::EmailCopied));
        let g2 = reset_generation(&e.dispatch(Event::EmailCopied));
        assert_ne!(g1, g2);

        e.dispatch(Event::CopyAckExpired(g1));
        assert!(e.email_copied());
        assert_eq!(e.copy_button_label(), e.copy().ui.copied);
        e.dispatch(Event::CopyAckExpired(g2));
        assert!(!e.email_copied());
    }

    #[test]
    fn failed_copy_shows_no_ack() {
        let mut e = engine();
        e.dispatch(Event::EmailCopied);
        e.dispatch(Event::EmailCopyFailed);
        assert!(!e.email_copied());
        assert_eq!(e.copy_button_label(), e.copy().ui.copy_email);
    }
}
