//! Pan and zoom over the logical canvas.
//!
//! A world point `w` is shown at screen point `w * zoom + pan`.

use modelgraph_core::geometry::{Bounds, Point, Size};

use crate::config::LayoutConfig;

const DEFAULT_MIN_ZOOM: f32 = 0.1;
const DEFAULT_MAX_ZOOM: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pan: Point,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
    }
}

impl Viewport {
    /// Identity viewport with zoom bounded to `[min_zoom, max_zoom]`.
    ///
    /// Swapped bounds are put back in order.
    pub fn new(min_zoom: f32, max_zoom: f32) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        Self {
            pan: Point::default(),
            zoom: 1.0_f32.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.min_zoom(), config.max_zoom())
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn to_screen(&self, world: Point) -> Point {
        world.scale(self.zoom).add_point(self.pan)
    }

    pub fn to_world(&self, screen: Point) -> Point {
        screen.sub_point(self.pan).scale(1.0 / self.zoom)
    }

    /// Sets the zoom, clamped to the bounds, keeping the world origin fixed.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = self.clamp(zoom);
    }

    /// Multiplies the zoom by `factor` while the world point under the screen
    /// point `anchor` stays under it.
    pub fn zoom_at(&mut self, anchor: Point, factor: f32) {
        let world = self.to_world(anchor);
        self.zoom = self.clamp(self.zoom * factor);
        self.pan = anchor.sub_point(world.scale(self.zoom));
    }

    /// Unbounded drag translation in screen units.
    pub fn pan_by(&mut self, delta: Point) {
        self.pan = self.pan.add_point(delta);
    }

    /// Zooms so `canvas` fits inside `screen` and centres it.
    pub fn fit(&mut self, canvas: Bounds, screen: Size) {
        if canvas.width() > 0.0 && canvas.height() > 0.0 {
            let zoom = (screen.width() / canvas.width()).min(screen.height() / canvas.height());
            self.zoom = self.clamp(zoom);
        }
        let screen_center = Point::new(screen.width() / 2.0, screen.height() / 2.0);
        self.pan = screen_center.sub_point(canvas.center().scale(self.zoom));
    }

    /// Back to zoom 1 with no pan.
    pub fn reset(&mut self) {
        *self = Self::new(self.min_zoom, self.max_zoom);
    }

    fn clamp(&self, zoom: f32) -> f32 {
        if zoom.is_finite() {
            zoom.clamp(self.min_zoom, self.max_zoom)
        } else {
            self.zoom
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut viewport = Viewport::default();
        viewport.pan_by(Point::new(35.0, -20.0));
        let anchor = Point::new(400.0, 300.0);
        let before = viewport.to_world(anchor);

        viewport.zoom_at(anchor, 1.5);
        viewport.zoom_at(anchor, 1.25);

        let after = viewport.to_world(anchor);
        assert_approx_eq!(f32, before.x(), after.x(), epsilon = 1e-3);
        assert_approx_eq!(f32, before.y(), after.y(), epsilon = 1e-3);
        assert_approx_eq!(f32, viewport.zoom(), 1.875);
    }

    #[test]
    fn test_zoom_clamped_to_bounds() {
        let mut viewport = Viewport::default();

        viewport.zoom_at(Point::new(10.0, 10.0), 100.0);
        assert_approx_eq!(f32, viewport.zoom(), 4.0);

        viewport.zoom_at(Point::new(10.0, 10.0), 0.0001);
        assert_approx_eq!(f32, viewport.zoom(), 0.1);

        viewport.set_zoom(f32::NAN);
        assert_approx_eq!(f32, viewport.zoom(), 0.1);
    }

    #[test]
    fn test_pan_is_unbounded() {
        let mut viewport = Viewport::default();

        viewport.pan_by(Point::new(-1.0e6, 2.0e6));

        assert_eq!(viewport.pan(), Point::new(-1.0e6, 2.0e6));
        assert_eq!(viewport.to_screen(Point::new(0.0, 0.0)), Point::new(-1.0e6, 2.0e6));
    }

    #[test]
    fn test_fit_centres_canvas() {
        let mut viewport = Viewport::default();
        let canvas = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(2000.0, 1000.0));

        viewport.fit(canvas, Size::new(1000.0, 800.0));

        assert_approx_eq!(f32, viewport.zoom(), 0.5);
        let center = viewport.to_screen(canvas.center());
        assert_approx_eq!(f32, center.x(), 500.0);
        assert_approx_eq!(f32, center.y(), 400.0);
    }

    #[test]
    fn test_swapped_bounds_reordered() {
        let viewport = Viewport::new(3.0, 0.5);

        assert_approx_eq!(f32, viewport.min_zoom(), 0.5);
        assert_approx_eq!(f32, viewport.max_zoom(), 3.0);
        assert_approx_eq!(f32, viewport.zoom(), 1.0);
    }
}
