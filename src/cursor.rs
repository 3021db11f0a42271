//! Cursor halo: a ring and dot that trail the pointer.
//!
//! The in-scene stand-in for a custom cursor. The dot eases toward the
//! pointer quickly, the ring lags behind it, and both disappear while the
//! pointer is outside the surface.

use glam::Vec2;

use crate::field::PointSprite;
use crate::pointer::PointerState;

const RING_RADIUS: f32 = 20.0;
const DOT_RADIUS: f32 = 4.0;
/// Fraction of the remaining distance covered per frame.
const RING_EASE: f32 = 0.35;
const DOT_EASE: f32 = 0.7;

const ACCENT: [f32; 4] = [0.0, 217.0 / 255.0, 1.0, 1.0];

/// Smoothed two-part cursor follower.
#[derive(Debug, Clone)]
pub struct CursorHalo {
    ring: Vec2,
    dot: Vec2,
    visible: bool,
}

impl CursorHalo {
    /// Create a hidden halo at the origin.
    pub fn new() -> Self {
        Self {
            ring: Vec2::ZERO,
            dot: Vec2::ZERO,
            visible: false,
        }
    }

    /// Whether the halo is currently drawn.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Ease both parts toward the pointer. Call once per simulation step.
    pub fn update(&mut self, pointer: &PointerState) {
        if !pointer.is_active() {
            self.visible = false;
            return;
        }

        let target = pointer.position();
        if !self.visible {
            // First appearance: snap instead of sweeping in from stale
            // coordinates.
            self.ring = target;
            self.dot = target;
            self.visible = true;
            return;
        }

        self.ring += (target - self.ring) * RING_EASE;
        self.dot += (target - self.dot) * DOT_EASE;
    }

    /// Append the halo's sprites, if visible.
    pub fn sprites(&self, out: &mut Vec<PointSprite>) {
        if !self.visible {
            return;
        }
        // Ring rendered as a soft wide glow, dot as a solid core.
        out.push(PointSprite {
            position: self.ring,
            radius: 0.0,
            glow: RING_RADIUS,
            color: [ACCENT[0], ACCENT[1], ACCENT[2], 0.5],
        });
        out.push(PointSprite {
            position: self.dot,
            radius: DOT_RADIUS,
            glow: DOT_RADIUS,
            color: ACCENT,
        });
    }
}

impl Default for CursorHalo {
    fn default() -> Self {
        Self::new()
    }
}
