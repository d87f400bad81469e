use std::fmt::Write;

use v_htmlescape::escape;

use crate::chart::ChartFrame;
use crate::config::Margins;
use crate::math::scale::category_color;
use crate::model::records::Category;

/// Final-state SVG of a frame: bars, ratio lines and the two legends.
pub fn render_svg(frame: &ChartFrame, margins: &Margins) -> String {
    let mut out = String::new();
    let total_w = frame.width + margins.left + margins.right;
    let total_h = frame.height + margins.top + margins.bottom;

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" font-size="12">"#,
        total_w, total_h
    );
    let _ = writeln!(out, r#"  <g transform="translate({},{})">"#, margins.left, margins.top);

    for category in Category::ORDER {
        let _ = writeln!(out, r#"    <g class="layer" fill="{}">"#, category_color(category));
        for bar in frame.bars.iter().filter(|b| b.category == category) {
            let r = &bar.rect;
            let _ = writeln!(
                out,
                r#"      <rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}"><title>{} {} {}</title></rect>"#,
                r.x,
                r.y,
                r.width,
                r.height.max(0.0),
                escape(&bar.year),
                category.label(),
                bar.value
            );
        }
        let _ = writeln!(out, "    </g>");
    }

    for line in &frame.overlay {
        if line.points.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            r#"    <path d="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            line.path_d(),
            line.color
        );
    }

    // Legends sit in the right margin.
    let lx = frame.width + 40.0;
    for (i, line) in frame.overlay.iter().enumerate() {
        let y = 60.0 + i as f64 * 15.0;
        let label = if i == 0 { "男性" } else { "女性" };
        let _ = writeln!(
            out,
            r#"    <line x1="{lx}" y1="{y}" x2="{}" y2="{y}" stroke="{}" stroke-width="2"/><text x="{}" y="{y}">{label}</text>"#,
            lx + 20.0,
            line.color,
            lx + 24.0
        );
    }
    for category in Category::ORDER {
        let y = 200.0 + category.index() as f64 * 20.0;
        let _ = writeln!(
            out,
            r#"    <rect x="{lx}" y="{y}" width="12" height="12" fill="{}"/><text x="{}" y="{}">{}</text>"#,
            category_color(category),
            lx + 24.0,
            y + 9.0,
            category.label()
        );
    }

    let _ = writeln!(out, "  </g>");
    let _ = writeln!(out, "</svg>");
    out
}
