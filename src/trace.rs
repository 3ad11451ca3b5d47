use crate::geometry::{point_at, Point, Segment};
use clap::ValueEnum;
use std::fmt;

/// How the history of past splines is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TraceMode {
    /// Nothing is recorded
    #[default]
    None,
    /// The probe point of each past spline is recorded
    Point,
    /// Each past spline is recorded whole
    Line,
}

impl TraceMode {
    const LABELS: [&'static str; 3] = ["NONE", "POINT", "LINE"];

    /// Display name shown in the HUD
    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }

    /// Next mode in the NONE → POINT → LINE → NONE cycle
    pub fn next(self) -> Self {
        match self {
            TraceMode::None => TraceMode::Point,
            TraceMode::Point => TraceMode::Line,
            TraceMode::Line => TraceMode::None,
        }
    }
}

impl fmt::Display for TraceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accumulated trail of past splines or points
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    segments: Vec<Segment>,
    points: Vec<Point>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `spline` (or its point at `distance`) according to `mode`
    pub fn record_if_enabled(&mut self, mode: TraceMode, spline: &Segment, distance: f64) {
        match mode {
            TraceMode::Line => self.segments.push(*spline),
            TraceMode::Point => self.points.push(point_at(spline, distance)),
            TraceMode::None => {}
        }
    }

    /// Empties both buffers
    pub fn clear(&mut self) {
        self.segments.clear();
        self.points.clear();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mode_cycle() {
        let mut mode = TraceMode::default();
        assert_eq!(mode, TraceMode::None);
        mode = mode.next();
        assert_eq!(mode, TraceMode::Point);
        mode = mode.next();
        assert_eq!(mode, TraceMode::Line);
        mode = mode.next();
        assert_eq!(mode, TraceMode::None);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(TraceMode::None.label(), "NONE");
        assert_eq!(TraceMode::Point.label(), "POINT");
        assert_eq!(TraceMode::Line.to_string(), "LINE");
    }

    #[test]
    fn test_record_line() {
        let mut recorder = TraceRecorder::new();
        let spline = Segment::new(0.0, 10.0, 1.0, 1.0);
        recorder.record_if_enabled(TraceMode::Line, &spline, 30.0);
        recorder.record_if_enabled(TraceMode::Line, &spline, 40.0);
        assert_eq!(recorder.segments(), &[spline, spline]);
        assert!(recorder.points().is_empty());
    }

    #[test]
    fn test_record_point_samples_spline() {
        let mut recorder = TraceRecorder::new();
        let spline = Segment::new(0.0, 10.0, 1.0, 1.0);
        recorder.record_if_enabled(TraceMode::Point, &spline, 30.0);
        assert!(recorder.segments().is_empty());
        assert_eq!(recorder.points().len(), 1);
        assert_abs_diff_eq!(recorder.points()[0].x, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(recorder.points()[0].y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_record_none_is_noop() {
        let mut recorder = TraceRecorder::new();
        recorder.record_if_enabled(TraceMode::None, &Segment::new(0.0, 1.0, 0.0, 0.0), 50.0);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut recorder = TraceRecorder::new();
        let spline = Segment::new(45.0, 2.0, 0.0, 0.0);
        recorder.record_if_enabled(TraceMode::Line, &spline, 10.0);
        recorder.record_if_enabled(TraceMode::Point, &spline, 10.0);
        assert!(!recorder.is_empty());
        recorder.clear();
        assert!(recorder.is_empty());
    }
}
