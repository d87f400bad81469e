use serde::Serialize;

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Cubic in-out easing on [0, 1].
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// First index whose key is >= `x`. `items` must be sorted by key.
pub fn bisect_left<T>(items: &[T], x: f64, key: impl Fn(&T) -> f64) -> usize {
    items.partition_point(|item| key(item) < x)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossPoint {
    pub x: f64,
    pub a: f64,
    pub b: f64,
}

/// A fill piece between two series with a constant sign of `a - b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillSegment {
    pub start: CrossPoint,
    pub end: CrossPoint,
    /// `a` strictly above `b` over the piece (growth when a=births, b=deaths).
    pub a_above: bool,
}

/// Split the area between `a` and `b` into pieces at every sign change.
///
/// A crossing between samples `i-1` and `i` sits at `|d0| / (|d0| + |d1|)` of the
/// way along, with both series meeting at the interpolated value of `a`.
pub fn crossover_segments(xs: &[f64], a: &[f64], b: &[f64]) -> Vec<FillSegment> {
    let n = xs.len().min(a.len()).min(b.len());
    let mut out = Vec::with_capacity(n.saturating_sub(1));
    for i in 1..n {
        let prev = CrossPoint { x: xs[i - 1], a: a[i - 1], b: b[i - 1] };
        let curr = CrossPoint { x: xs[i], a: a[i], b: b[i] };
        let d0 = prev.a - prev.b;
        let d1 = curr.a - curr.b;

        if d0 * d1 < 0.0 {
            let ratio = d0.abs() / (d0.abs() + d1.abs());
            let value = lerp(prev.a, curr.a, ratio);
            let cross = CrossPoint { x: lerp(prev.x, curr.x, ratio), a: value, b: value };
            out.push(FillSegment { start: prev, end: cross, a_above: d0 > 0.0 });
            out.push(FillSegment { start: cross, end: curr, a_above: d1 > 0.0 });
        } else {
            out.push(FillSegment { start: prev, end: curr, a_above: d0 > 0.0 });
        }
    }
    out
}
