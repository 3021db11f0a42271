//! Pointer tracking for field interaction.
//!
//! `PointerState` is the one piece of state shared between the event loop
//! and the simulation: the cursor position in surface-local pixels plus an
//! active flag (pointer inside the surface). Event handlers write it, the
//! per-frame step only reads it. Both coordinates are stored in a single
//! assignment so a step never observes a half-updated position.

use glam::Vec2;
use winit::event::WindowEvent;

/// Current cursor position and whether the pointer is inside the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    position: Vec2,
    active: bool,
}

impl PointerState {
    /// Create an inactive pointer at the origin.
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            active: false,
        }
    }

    /// Create an active pointer at the given surface position.
    ///
    /// Mostly useful for tests and headless stepping.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            active: true,
        }
    }

    /// Create an inactive pointer.
    pub fn inactive() -> Self {
        Self::new()
    }

    /// Cursor position in surface pixels.
    ///
    /// Only meaningful while [`is_active`](PointerState::is_active) is true.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the pointer is currently inside the surface.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.position = Vec2::new(position.x as f32, position.y as f32);
                self.active = true;
            }
            WindowEvent::CursorEntered { .. } => {
                self.active = true;
            }
            WindowEvent::CursorLeft { .. } => {
                self.active = false;
            }
            _ => {}
        }
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_starts_inactive() {
        let pointer = PointerState::new();
        assert!(!pointer.is_active());
    }

    #[test]
    fn test_cursor_moved_activates_and_updates_both_coordinates() {
        let mut pointer = PointerState::new();
        pointer.handle_event(&WindowEvent::CursorMoved {
            device_id: winit::event::DeviceId::dummy(),
            position: PhysicalPosition::new(120.0, 45.0),
        });

        assert!(pointer.is_active());
        assert_eq!(pointer.position(), Vec2::new(120.0, 45.0));
    }

    #[test]
    fn test_cursor_left_deactivates_but_keeps_position() {
        let mut pointer = PointerState::at(80.0, 60.0);
        pointer.handle_event(&WindowEvent::CursorLeft {
            device_id: winit::event::DeviceId::dummy(),
        });

        assert!(!pointer.is_active());
        assert_eq!(pointer.position(), Vec2::new(80.0, 60.0));
    }
}
