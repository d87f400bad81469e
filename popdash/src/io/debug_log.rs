use anyhow::Context;

use crate::chart::ChartFrame;

/// Dump a rendered frame as text: header fields, one line per bar, then the overlay lines.
pub fn write_frame_debug_log(
    out_dir: impl AsRef<std::path::Path>,
    run_id: &str,
    frame: &ChartFrame,
) -> anyhow::Result<std::path::PathBuf> {
    use std::io::Write;

    std::fs::create_dir_all(out_dir.as_ref()).context("create logs dir failed")?;
    let path = out_dir.as_ref().join(format!("ageshow_{}.txt", run_id));
    let mut f = std::fs::File::create(&path)
        .with_context(|| format!("create debug log file failed (path={:?})", path))?;

    writeln!(f, "run_id={}", run_id)?;
    writeln!(f, "province={}", frame.province)?;
    writeln!(f, "layout={}", frame.layout.as_str())?;
    writeln!(f, "width={:.3}", frame.width)?;
    writeln!(f, "height={:.3}", frame.height)?;
    writeln!(f, "y_left_max={:.3}", frame.scales.y_left.upper())?;
    writeln!(f, "bandwidth={:.3}", frame.scales.x.bandwidth())?;
    writeln!(f, "transition_ms={:.3}", frame.transition.duration_ms())?;
    writeln!(f)?;
    writeln!(f, "year,category,value,x,y,width,height")?;

    for bar in &frame.bars {
        let r = &bar.rect;
        writeln!(
            f,
            "{},{},{:.3},{:.3},{:.3},{:.3},{:.3}",
            bar.year,
            bar.category.key(),
            bar.value,
            r.x,
            r.y,
            r.width,
            r.height
        )?;
    }

    writeln!(f)?;
    writeln!(f, "year,x,male_y,female_y")?;
    let [male, female] = &frame.overlay;
    anyhow::ensure!(male.points.len() == female.points.len(), "overlay length mismatch");
    for (m, w) in male.points.iter().zip(female.points.iter()) {
        anyhow::ensure!(m.year == w.year, "overlay year mismatch");
        writeln!(f, "{},{:.3},{:.3},{:.3}", m.year, m.x, m.y, w.y)?;
    }

    Ok(path)
}
