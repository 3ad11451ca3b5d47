/// A plain 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A named anchor point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledPoint {
    pub x: f64,
    pub y: f64,
    pub label: char,
}

impl LabeledPoint {
    pub fn new(x: f64, y: f64, label: char) -> Self {
        LabeledPoint { x, y, label }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A directed line segment in polar form.
///
/// `(x, y)` is the start point. `angle` is kept in degrees and only
/// converted to radians for the trig calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub angle: f64,
    pub length: f64,
    pub x: f64,
    pub y: f64,
}

impl Segment {
    pub fn new(angle: f64, length: f64, x: f64, y: f64) -> Self {
        Segment {
            angle,
            length,
            x,
            y,
        }
    }

    /// Start point of the segment
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// End point of the segment
    pub fn endpoint(&self) -> Point {
        point_at(self, 100.0)
    }
}

/// Computes the point at `percent` of the way along a segment.
///
/// Values outside [0, 100] extrapolate along the same direction.
pub fn point_at(segment: &Segment, percent: f64) -> Point {
    let len = segment.length * percent / 100.0;
    let (sin_a, cos_a) = segment.angle.to_radians().sin_cos();
    Point::new(segment.x + len * cos_a, segment.y + len * sin_a)
}

/// Builds the segment running from `p1` to `p2`.
///
/// Coincident points give a zero-length segment with an angle of exactly 0.
pub fn segment_from_points(p1: Point, p2: Point) -> Segment {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let angle = if dx == 0.0 && dy == 0.0 {
        0.0
    } else {
        dy.atan2(dx).to_degrees()
    };
    Segment::new(angle, p1.distance_to(&p2), p1.x, p1.y)
}
