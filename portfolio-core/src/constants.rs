/// Application-wide constants shared by the engine and the browser runtime.
/// Lengths are CSS pixels unless noted otherwise.

/// Fraction of the viewport height added to `scrollY` to form the probe line
/// used for active-section detection.
pub const SECTION_PROBE_RATIO: f64 = 0.35;
/// Scroll offset (px) past which the header may collapse.
pub const HEADER_COMPACT_THRESHOLD: f64 = 72.0;
/// `localStorage` key holding the locale flag.
pub const LOCALE_STORAGE_KEY: &str = "portfolio-locale";
/// Query parameter that overrides the stored locale at startup.
pub const LOCALE_QUERY_PARAM: &str = "lang";
/// How long the "copied" acknowledgement stays visible (ms).
pub const COPY_ACK_MS: u32 = 1300;
/// Radius of the back-to-top progress ring (SVG user units).
pub const PROGRESS_RING_RADIUS: f64 = 17.0;

/// Hero video parallax gains (px per unit of normalized pointer offset).
pub const HERO_PARALLAX_X: f64 = 18.0;
pub const HERO_PARALLAX_Y: f64 = 14.0;
/// Hero video resting scale and the amount it shrinks over the first 70%
/// of a viewport of scroll.
pub const HERO_VIDEO_SCALE_REST: f64 = 1.06;
pub const HERO_VIDEO_SCALE_SHRINK: f64 = 0.04;
pub const HERO_VIDEO_SCROLL_SPAN: f64 = 0.7;
/// Magnetic link pull towards the pointer.
pub const MAGNETIC_GAIN: f64 = 0.16;
/// Orb scroll span as a fraction of the viewport height.
pub const ORB_SCROLL_SPAN: f64 = 0.65;
