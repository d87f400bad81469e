use serde::Serialize;

use crate::math::scale::ScaleSet;
use crate::model::records::Category;
use crate::model::selection::Layout;

const CATEGORIES: usize = Category::ORDER.len();

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub year_index: usize,
    pub year: String,
    pub category: Category,
    pub value: f64,
    pub rect: Rect,
}

/// Per year, `[baseline, cumulative_top]` for child, adult, elder in that order.
pub type StackedGeometry = Vec<[[f64; 2]; CATEGORIES]>;

pub fn stack(values: &[[f64; CATEGORIES]]) -> StackedGeometry {
    values
        .iter()
        .map(|triple| {
            let mut out = [[0.0; 2]; CATEGORIES];
            let mut cumulative = 0.0;
            for (slot, v) in out.iter_mut().zip(triple) {
                let base = cumulative;
                cumulative += v;
                *slot = [base, cumulative];
            }
            out
        })
        .collect()
}

/// Rectangles for every (category, year), ordered category by category.
pub fn layout_bars(layout: Layout, years: &[String], values: &[[f64; CATEGORIES]], scales: &ScaleSet) -> Vec<Bar> {
    let stacked = stack(values);
    let bandwidth = scales.x.bandwidth();
    let slot = bandwidth / CATEGORIES as f64;
    let y = &scales.y_left;
    let zero = y.map(0.0);

    let mut bars = Vec::with_capacity(years.len() * CATEGORIES);
    for category in Category::ORDER {
        let k = category.index();
        for (i, year) in years.iter().enumerate() {
            let x0 = scales.x.position_at(i);
            let value = values[i][k];
            let rect = match layout {
                Layout::Stacked => {
                    let [base, top] = stacked[i][k];
                    Rect { x: x0, y: y.map(top), width: bandwidth, height: y.map(base) - y.map(top) }
                }
                Layout::Grouped => Rect {
                    x: x0 + slot * k as f64,
                    y: y.map(value),
                    width: slot,
                    height: zero - y.map(value),
                },
            };
            bars.push(Bar { year_index: i, year: year.clone(), category, value, rect });
        }
    }
    bars
}
