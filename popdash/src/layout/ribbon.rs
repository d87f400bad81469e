use serde::Serialize;

/// One slice of a horizontal proportional ribbon (migration and MBTI panels).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RibbonSegment {
    pub label: String,
    pub value: f64,
    /// Share of the total in percent, 0 when the total is 0.
    pub percent: f64,
    pub x: f64,
    pub width: f64,
}

/// Lay `values` end to end across `width` starting at `x0`, each proportional to its share.
pub fn ribbon_segments(labels: &[&str], values: &[f64], width: f64, x0: f64) -> Vec<RibbonSegment> {
    let total: f64 = values.iter().sum();
    let share = |v: f64| if total > 0.0 { v / total } else { 0.0 };

    let mut cumulative = 0.0;
    labels
        .iter()
        .zip(values)
        .map(|(label, &value)| {
            let seg = RibbonSegment {
                label: label.to_string(),
                value,
                percent: share(value) * 100.0,
                x: x0 + share(cumulative) * width,
                width: share(value) * width,
            };
            cumulative += value;
            seg
        })
        .collect()
}
