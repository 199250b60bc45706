use glam::Vec3;

/// Non-closed cardinal Catmull-Rom curve through a list of control points.
///
/// End segments use mirrored phantom points (`2·p0 − p1`), so the curve passes
/// through the first and last control point.
#[derive(Clone, Debug)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    tension: f32,
}

impl CatmullRomCurve {
    pub fn new(points: Vec<Vec3>, tension: f32) -> Self {
        Self { points, tension }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn tension(&self) -> f32 {
        self.tension
    }

    /// Point at curve parameter `t` in [0, 1] (clamped).
    pub fn point_at(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }
        let t = t.clamp(0.0, 1.0);
        let p = (n - 1) as f32 * t;
        let mut seg = p.floor() as usize;
        let mut w = p - seg as f32;
        if seg >= n - 1 {
            seg = n - 2;
            w = 1.0;
        }

        let p1 = self.points[seg];
        let p2 = self.points[seg + 1];
        let p0 = if seg > 0 {
            self.points[seg - 1]
        } else {
            2.0 * p1 - p2
        };
        let p3 = if seg + 2 < n {
            self.points[seg + 2]
        } else {
            2.0 * p2 - p1
        };

        let t0 = (p2 - p0) * self.tension;
        let t1 = (p3 - p1) * self.tension;
        let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * t0 - t1;
        let c3 = 2.0 * p1 - 2.0 * p2 + t0 + t1;
        p1 + t0 * w + c2 * (w * w) + c3 * (w * w * w)
    }

    /// Unit tangent at `t` by central difference; falls back to +Y on a
    /// degenerate (zero-length) neighbourhood.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        const DELTA: f32 = 1e-3;
        let a = self.point_at((t - DELTA).max(0.0));
        let b = self.point_at((t + DELTA).min(1.0));
        (b - a).try_normalize().unwrap_or(Vec3::Y)
    }

    /// `divisions + 1` evenly spaced points from start to end.
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }
}
