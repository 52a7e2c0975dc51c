use std::cell::RefCell;
use std::rc::Rc;

use portfolio_core::motion::{OrbTargets, Spring, SpringConfig};
use portfolio_core::PortfolioEngine;
use web_sys::{Document, HtmlElement, Window};

/// Springs behind one magnetic link.
pub struct Magnetic {
    pub el: HtmlElement,
    pub x: Spring,
    pub y: Spring,
}

impl Magnetic {
    pub fn new(el: HtmlElement) -> Self {
        Self {
            el,
            x: Spring::new(SpringConfig::MAGNETIC, 0.0),
            y: Spring::new(SpringConfig::MAGNETIC, 0.0),
        }
    }
}

/// Eased transforms for the decorative layers.
pub struct MotionState {
    pub video_x: Spring,
    pub video_y: Spring,
    pub video_scale: Spring,
    pub orb_x: Spring,
    pub orb_y: Spring,
    pub orb_rotate_x: Spring,
    pub orb_rotate_y: Spring,
    pub orb_rotate_z: Spring,
    pub orb_scale: Spring,
    /// Latest orb targets; pointer and scroll each update their own half.
    pub orb: OrbTargets,
    pub magnetic: Vec<Magnetic>,
    pub last_frame_ts: Option<f64>,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            video_x: Spring::new(SpringConfig::HERO_VIDEO, 0.0),
            video_y: Spring::new(SpringConfig::HERO_VIDEO, 0.0),
            video_scale: Spring::new(SpringConfig::HERO_VIDEO_SCALE, 1.06),
            orb_x: Spring::new(SpringConfig::ORB_TRANSLATE, 0.0),
            orb_y: Spring::new(SpringConfig::ORB_TRANSLATE, 0.0),
            orb_rotate_x: Spring::new(SpringConfig::ORB_ROTATE, 0.0),
            orb_rotate_y: Spring::new(SpringConfig::ORB_ROTATE, 0.0),
            orb_rotate_z: Spring::new(SpringConfig::ORB_ROTATE, 0.0),
            orb_scale: Spring::new(SpringConfig::ORB_SCALE, 1.0),
            orb: OrbTargets::default(),
            magnetic: Vec::new(),
            last_frame_ts: None,
        }
    }
}

/// Page runtime state stored behind an `Rc<RefCell<_>>` so it can be shared
/// across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub engine: PortfolioEngine,
    pub motion: MotionState,
    pub reduced_motion: bool,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
