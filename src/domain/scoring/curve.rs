//! Piecewise-linear scoring curves for derived metrics.

use crate::domain::foundation::Score;

/// Maps a raw ratio onto a 0-100 health score by linear interpolation
/// between control points. Inputs outside the covered range take the
/// nearest end point's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringCurve {
    /// `(raw, score)` pairs, strictly increasing in `raw`.
    points: &'static [(f64, f64)],
}

impl ScoringCurve {
    pub const fn new(points: &'static [(f64, f64)]) -> Self {
        Self { points }
    }

    /// Scores a raw value. Returns `None` for non-finite input or an empty curve.
    pub fn score(&self, raw: f64) -> Option<Score> {
        if !raw.is_finite() {
            return None;
        }
        let (first, last) = (self.points.first()?, self.points.last()?);
        if raw <= first.0 {
            return Score::clamped(first.1);
        }
        if raw >= last.0 {
            return Score::clamped(last.1);
        }

        self.points.windows(2).find_map(|pair| {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if raw >= x0 && raw <= x1 {
                Score::clamped(y0 + (raw - x0) / (x1 - x0) * (y1 - y0))
            } else {
                None
            }
        })
    }
}
