//! Interaction engine for the bilingual portfolio page.
//!
//! Everything here is plain data in, plain data out: the browser runtime in
//! `portfolio-wasm` reads DOM metrics and events, hands them to
//! [`engine::PortfolioEngine`], and writes the derived flags back.

pub mod catalog;
pub mod constants;
pub mod engine;
pub mod locale;
pub mod matcher;
pub mod motion;
pub mod scroll;
pub mod selection;
pub mod works;

pub use catalog::{Catalog, CatalogError, PortfolioCopy, SkillGroup, WorkItem, WorkLink};
pub use engine::{Effect, EngineConfig, Event, PickSurface, PortfolioEngine};
pub use locale::Locale;
pub use matcher::{labels_match, normalize, selection_matches, stack_matches};
pub use scroll::{
    NavHighlight, ScrollMetrics, ScrollState, ScrollTracker, SectionBounds, SectionId,
    SectionLayout,
};
pub use selection::{SelectionStore, SubscriptionId};
