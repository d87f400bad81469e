use popdash::io::debug_log::write_frame_debug_log;
use popdash::model::records::{GenderRecord, PopulationRecord};
use popdash::{AgeChart, ChartConfig};

fn pop(province: &str, year: &str, v: [f64; 3]) -> PopulationRecord {
    PopulationRecord { province: province.into(), year: year.into(), child: v[0], adult: v[1], elder: v[2] }
}

fn gender(region: &str, year: &str, male: u64, female: u64) -> GenderRecord {
    GenderRecord { region: region.into(), year: year.into(), male, female }
}

#[test]
fn frame_debug_log_snapshot_small() {
    let population = vec![
        pop("北京市", "2019", [200.0, 700.0, 100.0]),
        pop("北京市", "2020", [250.0, 600.0, 150.0]),
        pop("上海市", "2020", [400.0, 1200.0, 400.0]),
    ];
    let genders = vec![
        gender("北京市", "2019", 512, 488),
        gender("北京市", "2020", 500, 500),
    ];

    // 420 x 200 plot area after margins and controls.
    let cfg = ChartConfig { container_width: 580.0, container_height: 267.0, ..ChartConfig::default() };
    let mut chart = AgeChart::new(population, genders, cfg).expect("chart config invalid");
    let outcome = chart.update();
    let frame = outcome.frame().expect("frame rendered");

    let tmp = tempfile::tempdir().expect("tempdir");
    let run_id = "TEST-SMALL";
    let path = write_frame_debug_log(tmp.path(), run_id, frame).expect("write debug log");

    let s = std::fs::read_to_string(path).expect("read debug log");
    insta::assert_snapshot!(s);
}
