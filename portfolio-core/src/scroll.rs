//! Scroll-position driven page state: which section is in view, whether the
//! header is collapsed, and how far down the page the reader is.

use std::fmt;
use std::str::FromStr;

use crate::constants::{HEADER_COMPACT_THRESHOLD, PROGRESS_RING_RADIUS, SECTION_PROBE_RATIO};

/// Top-level page regions in document order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SectionId {
    #[default]
    Hero,
    Works,
    Craft,
    Skills,
    About,
    Contact,
}

impl SectionId {
    pub const ORDER: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::Works,
        SectionId::Craft,
        SectionId::Skills,
        SectionId::About,
        SectionId::Contact,
    ];

    /// The element id of the section anchor.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Works => "works",
            SectionId::Craft => "craft",
            SectionId::Skills => "skills",
            SectionId::About => "about",
            SectionId::Contact => "contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ORDER
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or(())
    }
}

/// Source of section top offsets (document coordinates, px).
pub trait SectionLayout {
    /// `None` when the section is not present in the document.
    fn section_top(&self, id: SectionId) -> Option<f64>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: SectionId,
    pub top: f64,
}

impl SectionBounds {
    pub fn new(id: SectionId, top: f64) -> Self {
        Self { id, top }
    }
}

impl SectionLayout for [SectionBounds] {
    fn section_top(&self, id: SectionId) -> Option<f64> {
        self.iter().find(|b| b.id == id).map(|b| b.top)
    }
}

impl<L: SectionLayout + ?Sized> SectionLayout for &L {
    fn section_top(&self, id: SectionId) -> Option<f64> {
        (**self).section_top(id)
    }
}

/// One read of the window scroll metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    /// Full scrollable height of the document element.
    pub document_height: f64,
}

/// Everything derived from a scroll sample. Replaced as a whole.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub active_section: SectionId,
    pub header_compact: bool,
    /// Always within `[0, 1]`.
    pub scroll_progress: f64,
}

/// Keeps the previous `scrollY` so header collapse can follow the scroll
/// direction.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    probe_ratio: f64,
    compact_threshold: f64,
    last_scroll_y: f64,
    state: ScrollState,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::with_params(SECTION_PROBE_RATIO, HEADER_COMPACT_THRESHOLD)
    }
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(probe_ratio: f64, compact_threshold: f64) -> Self {
        Self {
            probe_ratio,
            compact_threshold,
            last_scroll_y: 0.0,
            state: ScrollState::default(),
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Recompute the full state from one sample and remember `scroll_y` as
    /// the previous sample.
    pub fn sample<L>(&mut self, metrics: &ScrollMetrics, layout: &L) -> ScrollState
    where
        L: SectionLayout + ?Sized,
    {
        let y = metrics.scroll_y;
        let moving_down = y > self.last_scroll_y;
        let next = ScrollState {
            active_section: active_section(y, metrics.viewport_height, self.probe_ratio, layout),
            header_compact: y > self.compact_threshold && moving_down,
            scroll_progress: scroll_progress(metrics),
        };
        self.last_scroll_y = y;
        self.state = next;
        next
    }
}

/// Last section, in document order, whose top is at or above the probe line.
pub fn active_section<L>(
    scroll_y: f64,
    viewport_height: f64,
    probe_ratio: f64,
    layout: &L,
) -> SectionId
where
    L: SectionLayout + ?Sized,
{
    let probe = scroll_y + viewport_height * probe_ratio;
    SectionId::ORDER
        .into_iter()
        .filter(|id| layout.section_top(*id).is_some_and(|top| probe >= top))
        .last()
        .unwrap_or_default()
}

/// `scrollY / (documentHeight - viewportHeight)` in `[0, 1]`; zero when the
/// page cannot scroll.
pub fn scroll_progress(metrics: &ScrollMetrics) -> f64 {
    let max = metrics.document_height - metrics.viewport_height;
    if max <= 0.0 {
        return 0.0;
    }
    let ratio = metrics.scroll_y / max;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Which header links are highlighted for the active section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavHighlight {
    pub works: bool,
    pub about: bool,
    pub contact: bool,
}

impl NavHighlight {
    pub fn from_section(section: SectionId) -> Self {
        Self {
            works: matches!(
                section,
                SectionId::Works | SectionId::Craft | SectionId::Skills
            ),
            about: section == SectionId::About,
            contact: section == SectionId::Contact,
        }
    }
}

pub fn progress_ring_circumference() -> f64 {
    2.0 * std::f64::consts::PI * PROGRESS_RING_RADIUS
}

/// `stroke-dashoffset` for the back-to-top ring.
pub fn progress_ring_offset(progress: f64) -> f64 {
    progress_ring_circumference() * (1.0 - progress.clamp(0.0, 1.0))
}
