use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QuadtreeError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {}, Y: {}", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// The four children of a split node, in insertion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    pub const fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }
}

/// Axis-aligned rectangle. Every edge and corner counts as inside.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub bottom_left: Point,
    pub top_right: Point,
}

impl Rect {
    /// Builds a rectangle without checking the corners.
    pub const fn new(bottom_left: Point, top_right: Point) -> Self {
        Self {
            bottom_left,
            top_right,
        }
    }

    pub fn try_new(bottom_left: Point, top_right: Point) -> Result<Self, QuadtreeError> {
        let rect = Self::new(bottom_left, top_right);
        rect.validate()?;
        Ok(rect)
    }

    pub(crate) fn validate(&self) -> Result<(), QuadtreeError> {
        let (bl, tr) = (self.bottom_left, self.top_right);
        if !bl.is_finite() || !tr.is_finite() {
            return Err(QuadtreeError::NonFiniteBounds {
                x1: bl.x,
                y1: bl.y,
                x2: tr.x,
                y2: tr.y,
            });
        }
        if bl.x > tr.x || bl.y > tr.y {
            return Err(QuadtreeError::InvertedBounds {
                x1: bl.x,
                y1: bl.y,
                x2: tr.x,
                y2: tr.y,
            });
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.top_right.x - self.bottom_left.x
    }

    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_left.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            midpoint(self.bottom_left.x, self.top_right.x),
            midpoint(self.bottom_left.y, self.top_right.y),
        )
    }

    /// False once neither axis has a representable value strictly between
    /// its edges, so splitting would only repeat this rectangle.
    pub fn can_split(&self) -> bool {
        let (bl, tr, mid) = (self.bottom_left, self.top_right, self.center());
        (bl.x < mid.x && mid.x < tr.x) || (bl.y < mid.y && mid.y < tr.y)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bottom_left.x <= point.x
            && point.x <= self.top_right.x
            && self.bottom_left.y <= point.y
            && point.y <= self.top_right.y
    }

    /// One quarter of the rectangle, split at the midpoint of each axis.
    pub fn quadrant(&self, quadrant: Quadrant) -> Rect {
        let (bl, tr, mid) = (self.bottom_left, self.top_right, self.center());
        match quadrant {
            Quadrant::NorthWest => Rect::new(Point::new(bl.x, mid.y), Point::new(mid.x, tr.y)),
            Quadrant::NorthEast => Rect::new(mid, tr),
            Quadrant::SouthWest => Rect::new(bl, mid),
            Quadrant::SouthEast => Rect::new(Point::new(mid.x, bl.y), Point::new(tr.x, mid.y)),
        }
    }

    /// The two lines a subdivision draws across this rectangle.
    pub fn split_lines(&self) -> Boundary {
        let (bl, tr, mid) = (self.bottom_left, self.top_right, self.center());
        Boundary {
            vertical: Segment::new(Point::new(mid.x, bl.y), Point::new(mid.x, tr.y)),
            horizontal: Segment::new(Point::new(bl.x, mid.y), Point::new(tr.x, mid.y)),
        }
    }
}

// Halves are summed so the result stays finite near `f64::MAX`, then held
// inside `[low, high]` because halving subnormals rounds.
fn midpoint(low: f64, high: f64) -> f64 {
    (low / 2.0 + high / 2.0).max(low).min(high)
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// The pair of segments recorded when a node subdivides.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub vertical: Segment,
    pub horizontal: Segment,
}

impl Boundary {
    pub fn segments(&self) -> [Segment; 2] {
        [self.vertical, self.horizontal]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Rect {
        Rect::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0))
    }

    #[test]
    fn contains_is_inclusive() {
        let rect = square();
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(rect.contains(Point::new(0.0, 5.0)));
        assert!(rect.contains(Point::new(2.5, 0.0)));
        assert!(!rect.contains(Point::new(-0.1, 2.0)));
        assert!(!rect.contains(Point::new(2.0, 5.000001)));
        assert!(!rect.contains(Point::new(f64::NAN, 1.0)));
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let rect = Rect::new(Point::new(-2.0, 1.0), Point::new(6.0, 3.0));
        let nw = rect.quadrant(Quadrant::NorthWest);
        let ne = rect.quadrant(Quadrant::NorthEast);
        let sw = rect.quadrant(Quadrant::SouthWest);
        let se = rect.quadrant(Quadrant::SouthEast);

        assert_eq!(nw, Rect::new(Point::new(-2.0, 2.0), Point::new(2.0, 3.0)));
        assert_eq!(ne, Rect::new(Point::new(2.0, 2.0), Point::new(6.0, 3.0)));
        assert_eq!(sw, Rect::new(Point::new(-2.0, 1.0), Point::new(2.0, 2.0)));
        assert_eq!(se, Rect::new(Point::new(2.0, 1.0), Point::new(6.0, 2.0)));

        let area: f64 = [nw, ne, sw, se].iter().map(|r| r.width() * r.height()).sum();
        assert_eq!(area, rect.width() * rect.height());
    }

    #[test]
    fn splits_near_max_stay_finite() {
        let rect = Rect::try_new(Point::new(1e308, 1e308), Point::new(1.7e308, 1.7e308)).unwrap();
        let mid = rect.center();
        assert!(mid.x.is_finite() && mid.y.is_finite());
        assert!(rect.bottom_left.x < mid.x && mid.x < rect.top_right.x);

        for quadrant in Quadrant::ALL {
            let child = rect.quadrant(quadrant);
            assert!(child.validate().is_ok(), "{quadrant:?} = {child:?}");
            assert!(rect.contains(child.bottom_left) && rect.contains(child.top_right));
        }

        let lines = rect.split_lines();
        for segment in lines.segments() {
            assert!(segment.start.x.is_finite() && segment.start.y.is_finite());
            assert!(segment.end.x.is_finite() && segment.end.y.is_finite());
        }

        let wide = Rect::try_new(Point::new(-f64::MAX, -f64::MAX), Point::new(f64::MAX, f64::MAX))
            .unwrap();
        assert_eq!(wide.center(), Point::new(0.0, 0.0));
    }

    #[test]
    fn center_of_subnormal_span_stays_inside() {
        let tiny = f64::from_bits(1);
        let rect = Rect::new(Point::new(tiny, 0.0), Point::new(tiny, 4.0));
        assert_eq!(rect.center(), Point::new(tiny, 2.0));
        for quadrant in Quadrant::ALL {
            assert!(rect.quadrant(quadrant).validate().is_ok());
        }
    }

    #[test]
    fn can_split_until_resolution_runs_out() {
        assert!(Rect::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0)).can_split());
        // One axis is enough.
        assert!(Rect::new(Point::new(1.0, 1.0), Point::new(2.0, 1.0)).can_split());

        let point = Rect::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert!(!point.can_split());

        let next = 1.0 + f64::EPSILON;
        let one_ulp = Rect::new(Point::new(1.0, 1.0), Point::new(next, next));
        assert!(!one_ulp.can_split());
    }

    #[test]
    fn split_lines_cross_at_center() {
        let lines = square().split_lines();
        assert_eq!(
            lines.vertical,
            Segment::new(Point::new(2.5, 0.0), Point::new(2.5, 5.0))
        );
        assert_eq!(
            lines.horizontal,
            Segment::new(Point::new(0.0, 2.5), Point::new(5.0, 2.5))
        );
    }

    #[test]
    fn try_new_rejects_bad_corners() {
        let inverted = Rect::try_new(Point::new(5.0, 0.0), Point::new(0.0, 5.0));
        assert!(matches!(inverted, Err(QuadtreeError::InvertedBounds { .. })));

        let infinite = Rect::try_new(Point::new(0.0, 0.0), Point::new(f64::INFINITY, 5.0));
        assert!(matches!(infinite, Err(QuadtreeError::NonFiniteBounds { .. })));

        // A degenerate rectangle is still a valid one.
        assert!(Rect::try_new(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_ok());
    }

    #[test]
    fn point_display() {
        assert_eq!(Point::new(1.5, -2.0).to_string(), "X: 1.5, Y: -2");
    }

    #[test]
    fn quadrant_order() {
        let indices: Vec<usize> = Quadrant::ALL.iter().map(|q| q.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
