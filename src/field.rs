//! The field abstraction shared by the two simulations.
//!
//! A field owns a fixed-size set of points, steps them once per frame, and
//! hands the renderer flat lists of sprites and line segments. Simulation
//! state never touches the GPU; everything here is plain CPU data.

use glam::Vec2;

use crate::pointer::PointerState;

/// Minimum distance used before dividing by a pointer-to-point distance.
///
/// Coincident points would otherwise produce a non-finite force direction.
pub(crate) const MIN_DISTANCE: f32 = 1e-4;

/// A render-ready point: position, core radius, glow radius, RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSprite {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Radius of the solid core in pixels.
    pub radius: f32,
    /// Radius of the glow halo in pixels. At least `radius`.
    pub glow: f32,
    /// RGBA color (0.0-1.0).
    pub color: [f32; 4],
}

/// A render-ready connection line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// First endpoint in surface pixels.
    pub a: Vec2,
    /// Second endpoint in surface pixels.
    pub b: Vec2,
    /// RGBA color with the distance-faded opacity in the alpha channel.
    pub color: [f32; 4],
}

/// Opacity of a connection line between two points `distance` apart.
///
/// Strictly decreasing in distance: `scale` at distance zero, fading
/// linearly to zero at `threshold` and staying zero beyond it, so the
/// fade is continuous at the boundary.
pub fn connection_alpha(distance: f32, threshold: f32, scale: f32) -> f32 {
    if distance >= threshold {
        0.0
    } else {
        (1.0 - distance / threshold) * scale
    }
}

/// A cursor-reactive 2D point field.
///
/// Implementations own their point set and a `running` flag. [`step`] is a
/// no-op while stopped, which is how the host suspends a field without
/// dropping its state.
///
/// [`step`]: Field::step
pub trait Field {
    /// Advance the simulation one frame.
    ///
    /// Frame-rate assumptions are baked into the constants; callers step at
    /// a fixed 60 Hz rather than passing an elapsed time.
    fn step(&mut self, pointer: &PointerState);

    /// React to a surface size change.
    fn resize(&mut self, width: f32, height: f32);

    /// Current surface size in pixels.
    fn bounds(&self) -> Vec2;

    /// Whether [`step`](Field::step) currently does work.
    fn is_running(&self) -> bool;

    /// Resume stepping.
    fn start(&mut self);

    /// Suspend stepping. Point state is retained.
    fn stop(&mut self);

    /// Append one sprite per point to `out`.
    fn sprites(&self, out: &mut Vec<PointSprite>);

    /// Append connection segments for every pair of points closer than the
    /// connection threshold. O(n²) over the point set.
    fn connections(&self, out: &mut Vec<Segment>);
}
