use popdash::io::sources::load_sources;
use popdash::{AgeChart, ChartConfig, DashboardEvent, Layout, UpdateOutcome};

fn main() -> anyhow::Result<()> {
    // Bundled sample tables; point at a real data dir for the full panel.
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");
    let cfg = ChartConfig::default();
    let data = load_sources(dir, &cfg)?;
    let mut chart = AgeChart::from_panel_data(data, cfg)?;

    let events = [
        DashboardEvent::ProvinceSelected { province: Some("上海市".to_string()) },
        DashboardEvent::LayoutSelected { layout: Layout::Grouped },
        DashboardEvent::ProvinceSelected { province: Some("全国".to_string()) },
    ];

    for event in events {
        match chart.dispatch(event) {
            UpdateOutcome::Rendered(frame) => {
                println!("# {} {}", frame.province, frame.layout.as_str());
                println!("year,category,value,x,y,width,height");
                for bar in &frame.bars {
                    let r = &bar.rect;
                    println!(
                        "{},{},{:.4},{:.1},{:.1},{:.1},{:.1}",
                        bar.year,
                        bar.category.key(),
                        bar.value,
                        r.x,
                        r.y,
                        r.width,
                        r.height
                    );
                }
            }
            other => println!("# skipped: {:?}", other),
        }
    }

    Ok(())
}
