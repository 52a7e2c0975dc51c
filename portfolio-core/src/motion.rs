//! Pointer and scroll driven transform targets for the decorative layers
//! (hero video, orb, magnetic links), plus the spring used to ease towards
//! them.
//!
//! Independent of the scroll tracker: each function recomputes from its own
//! inputs.

use crate::constants::{
    HERO_PARALLAX_X, HERO_PARALLAX_Y, HERO_VIDEO_SCALE_REST, HERO_VIDEO_SCALE_SHRINK,
    HERO_VIDEO_SCROLL_SPAN, MAGNETIC_GAIN, ORB_SCROLL_SPAN,
};

/// Client-space rectangle, as returned by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer offset from the rect centre, normalized to `[-0.5, 0.5]` inside
/// the rect. Degenerate rects give the centre.
fn normalized_offset(pointer: (f64, f64), rect: &Rect) -> (f64, f64) {
    let nx = if rect.width > 0.0 {
        (pointer.0 - rect.left) / rect.width - 0.5
    } else {
        0.0
    };
    let ny = if rect.height > 0.0 {
        (pointer.1 - rect.top) / rect.height - 0.5
    } else {
        0.0
    };
    (nx, ny)
}

/// Hero video translation target for a pointer over the hero section.
pub fn hero_parallax(pointer: (f64, f64), rect: &Rect) -> (f64, f64) {
    let (nx, ny) = normalized_offset(pointer, rect);
    (nx * HERO_PARALLAX_X, ny * HERO_PARALLAX_Y)
}

/// Hero video scale target; shrinks slightly over the first part of the page.
pub fn hero_video_scale(scroll_y: f64, viewport_height: f64) -> f64 {
    let span = viewport_height * HERO_VIDEO_SCROLL_SPAN;
    let progress = if span > 0.0 {
        (scroll_y / span).min(1.0)
    } else {
        1.0
    };
    HERO_VIDEO_SCALE_REST - progress * HERO_VIDEO_SCALE_SHRINK
}

/// Pull of a magnetic link towards the pointer.
pub fn magnetic_offset(pointer: (f64, f64), rect: &Rect) -> (f64, f64) {
    let dx = pointer.0 - rect.left - rect.width / 2.0;
    let dy = pointer.1 - rect.top - rect.height / 2.0;
    (dx * MAGNETIC_GAIN, dy * MAGNETIC_GAIN)
}

/// Transform targets for the hero orb.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbTargets {
    pub x: f64,
    pub y: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub scale: f64,
}

impl Default for OrbTargets {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbTargets {
    /// Pointer part, from window client coordinates and window size.
    pub fn with_pointer(mut self, client: (f64, f64), viewport: (f64, f64)) -> Self {
        let nx = if viewport.0 > 0.0 {
            client.0 / viewport.0 - 0.5
        } else {
            0.0
        };
        let ny = if viewport.1 > 0.0 {
            client.1 / viewport.1 - 0.5
        } else {
            0.0
        };
        self.x = (nx * 16.0).clamp(-24.0, 24.0);
        self.y = (ny * 16.0).clamp(-24.0, 24.0);
        self.rotate_y = (nx * 12.0).clamp(-10.0, 10.0);
        self.rotate_x = (-ny * 9.0).clamp(-8.0, 8.0);
        self
    }

    /// Scroll part: a slow roll and a small shrink.
    pub fn with_scroll(mut self, scroll_y: f64, viewport_height: f64) -> Self {
        let span = viewport_height * ORB_SCROLL_SPAN;
        let progress = if span > 0.0 {
            (scroll_y / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.rotate_z = progress * 6.0;
        self.scale = (1.0 - progress * 0.06).clamp(0.93, 1.0);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub const HERO_VIDEO: SpringConfig = SpringConfig::new(70.0, 18.0, 0.8);
    pub const HERO_VIDEO_SCALE: SpringConfig = SpringConfig::new(64.0, 18.0, 0.8);
    pub const MAGNETIC: SpringConfig = SpringConfig::new(180.0, 16.0, 0.5);
    pub const ORB_TRANSLATE: SpringConfig = SpringConfig::new(84.0, 19.0, 0.68);
    pub const ORB_ROTATE: SpringConfig = SpringConfig::new(84.0, 19.0, 0.84);
    pub const ORB_SCALE: SpringConfig = SpringConfig::new(64.0, 16.0, 0.78);

    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }
}

const MAX_STEP_SECS: f64 = 1.0 / 30.0;
const REST_EPSILON: f64 = 1e-3;

/// Damped spring easing a value towards a target, advanced once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to `value` with no residual motion.
    pub fn snap(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        (self.value - self.target).abs() < REST_EPSILON && self.velocity.abs() < REST_EPSILON
    }

    /// Advance by `dt` seconds. Long frames are split so the integration stays
    /// stable after a tab switch.
    pub fn step(&mut self, dt: f64) -> f64 {
        if dt.is_nan() || dt <= 0.0 {
            return self.value;
        }
        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let force = -self.config.stiffness * (self.value - self.target)
                - self.config.damping * self.velocity;
            self.velocity += force / self.config.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if self.is_at_rest() {
            self.snap(self.target);
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 1000.0,
        height: 500.0,
    };

    #[test]
    fn parallax_is_zero_at_centre_and_bounded_at_edges() {
        assert_eq!(hero_parallax((500.0, 250.0), &HERO), (0.0, 0.0));
        assert_eq!(hero_parallax((1000.0, 500.0), &HERO), (9.0, 7.0));
        assert_eq!(hero_parallax((0.0, 0.0), &HERO), (-9.0, -7.0));
    }

    #[test]
    fn degenerate_rect_does_not_divide_by_zero() {
        let (x, y) = hero_parallax((10.0, 10.0), &Rect::default());
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn video_scale_shrinks_then_holds() {
        assert!((hero_video_scale(0.0, 1000.0) - 1.06).abs() < 1e-12);
        assert!((hero_video_scale(350.0, 1000.0) - 1.04).abs() < 1e-12);
        assert!((hero_video_scale(5000.0, 1000.0) - 1.02).abs() < 1e-12);
    }

    #[test]
    fn magnetic_pull_is_proportional() {
        let rect = Rect {
            left: 100.0,
            top: 100.0,
            width: 100.0,
            height: 40.0,
        };
        let (x, y) = magnetic_offset((200.0, 100.0), &rect);
        assert!((x - 8.0).abs() < 1e-12);
        assert!((y + 3.2).abs() < 1e-12);
    }

    #[test]
    fn orb_targets_are_clamped() {
        let t = OrbTargets::default().with_pointer((4000.0, -4000.0), (1000.0, 1000.0));
        assert_eq!(t.x, 24.0);
        assert_eq!(t.y, -24.0);
        assert_eq!(t.rotate_y, 10.0);
        assert_eq!(t.rotate_x, 8.0);
        let t = t.with_scroll(10_000.0, 1000.0);
        assert_eq!(t.rotate_z, 6.0);
        assert!((t.scale - 0.94).abs() < 1e-12);
    }

    #[test]
    fn spring_settles_on_target() {
        let mut s = Spring::new(SpringConfig::HERO_VIDEO, 0.0);
        s.set_target(18.0);
        for _ in 0..600 {
            s.step(1.0 / 60.0);
        }
        assert!(s.is_at_rest());
        assert_eq!(s.value(), 18.0);
    }

    #[test]
    fn spring_ignores_non_positive_steps() {
        let mut s = Spring::new(SpringConfig::MAGNETIC, 3.0);
        s.set_target(10.0);
        assert_eq!(s.step(0.0), 3.0);
        assert_eq!(s.step(f64::NAN), 3.0);
    }
}
