//! Basic geometric types used by the layout engine.
//!
//! Positions are box centres: a node placed at `Point(x, y)` with `Size(w, h)`
//! covers `[x - w/2, x + w/2] × [y - h/2, y + h/2]`.

/// A point in the logical canvas coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the Euclidean distance from the origin
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds, and the size
    /// is distributed equally in all directions around that center.
    pub fn to_bounds(self, size: Size) -> Bounds {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;

        Bounds {
            min_x: self.x - half_width,
            min_y: self.y - half_height,
            max_x: self.x + half_width,
            max_y: self.y + half_height,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from the top-left corner and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns `true` if the point lies inside or on the edge of the bounds
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Overlap extent along each axis.
    ///
    /// Both components are positive only when the two rectangles share
    /// interior area; touching edges give zero.
    pub fn overlap(self, other: Bounds) -> (f32, f32) {
        let x = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let y = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        (x, y)
    }

    /// Returns `true` if the two rectangles share interior area
    pub fn intersects(self, other: Bounds) -> bool {
        let (x, y) = self.overlap(other);
        x > 0.0 && y > 0.0
    }

    /// Merges two bounds to create a larger bounds that contains both
    pub fn merge(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_to_bounds_is_centered() {
        let bounds = Point::new(100.0, 50.0).to_bounds(Size::new(40.0, 20.0));

        assert_approx_eq!(f32, bounds.min_x(), 80.0);
        assert_approx_eq!(f32, bounds.max_x(), 120.0);
        assert_approx_eq!(f32, bounds.min_y(), 40.0);
        assert_approx_eq!(f32, bounds.max_y(), 60.0);
        assert_eq!(bounds.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_overlap_of_intersecting_bounds() {
        let a = Point::new(0.0, 0.0).to_bounds(Size::new(10.0, 10.0));
        let b = Point::new(6.0, 8.0).to_bounds(Size::new(10.0, 10.0));

        let (x, y) = a.overlap(b);
        assert_approx_eq!(f32, x, 4.0);
        assert_approx_eq!(f32, y, 2.0);
        assert!(a.intersects(b));
    }

    #[test]
    fn test_touching_bounds_do_not_intersect() {
        let a = Point::new(0.0, 0.0).to_bounds(Size::new(10.0, 10.0));
        let b = Point::new(10.0, 0.0).to_bounds(Size::new(10.0, 10.0));

        assert!(!a.intersects(b));
    }

    #[test]
    fn test_merge_and_contains() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_top_left(Point::new(20.0, 5.0), Size::new(5.0, 30.0));
        let merged = a.merge(&b);

        assert_approx_eq!(f32, merged.width(), 25.0);
        assert_approx_eq!(f32, merged.height(), 35.0);
        assert!(merged.contains(Point::new(12.0, 20.0)));
        assert!(!merged.contains(Point::new(-1.0, 0.0)));
    }

    #[test]
    fn test_distance() {
        assert_approx_eq!(f32, Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
