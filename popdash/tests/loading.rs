use std::fs;
use std::path::Path;

use popdash::io::national::read_national;
use popdash::io::sources::{
    load_sources, ADULT_CSV, CHILD_CSV, ELDER_CSV, MALE_FEMALE_CSV, NATIONAL_CSV, TOTAL_CSV,
};
use popdash::io::svg::render_svg;
use popdash::io::table::{normalize_region, normalize_year, WideTable};
use popdash::model::records::PopulationRecord;
use popdash::{AgeChart, ChartConfig, Layout, NationalStackedPolicy, TableError};

fn assets() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
}

fn write_tables(dir: &Path) {
    fs::write(dir.join(CHILD_CSV), "地区,2020年\n北京市,0.2\n").unwrap();
    fs::write(dir.join(ADULT_CSV), "地区,2020年\n北京市,0.7\n").unwrap();
    fs::write(dir.join(ELDER_CSV), "地区,2020年\n北京市,0.1\n").unwrap();
    fs::write(dir.join(TOTAL_CSV), "地区,2020\n北京市,1000\n").unwrap();
    fs::write(dir.join(MALE_FEMALE_CSV), "地区,2020\n北京市,105\n").unwrap();
}

#[test]
fn region_and_year_labels_normalize() {
    assert_eq!(normalize_region("北京市"), "北京");
    assert_eq!(normalize_region("广西壮族自治区"), "广西");
    assert_eq!(normalize_region("新疆维吾尔自治区"), "新疆");
    assert_eq!(normalize_region(" 广东省 "), "广东");
    assert_eq!(normalize_year("2022年"), "2022");
    assert_eq!(normalize_year("2022"), "2022");
}

#[test]
fn wide_table_reads_bom_and_blank_cells() {
    let t = WideTable::from_reader("child", "\u{feff}地区,2020年,2021年\n北京市,0.2,\n".as_bytes()).unwrap();
    assert_eq!(t.region_header, "地区");
    assert_eq!(t.years, vec!["2020", "2021"]);
    assert_eq!(t.row("北京").unwrap().cells, vec![Some(0.2), None]);
}

#[test]
fn wide_table_without_years_is_rejected() {
    let err = WideTable::from_reader("child", "地区\n北京市\n".as_bytes()).unwrap_err();
    assert!(matches!(err, TableError::NoYearColumns));
}

#[test]
fn national_rows_scale_by_total() {
    let rows = read_national("year,child,adult,elder,total\n2020年,0.2,0.7,0.1,1000\n".as_bytes(), "全国").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].province, "全国");
    assert_eq!(rows[0].year, "2020");
    assert!((rows[0].adult - 700.0).abs() < 1e-9);

    assert!(read_national("year,child,adult,elder,total\n2020,0.2,0.7,0.1,-1\n".as_bytes(), "全国").is_err());
}

#[test]
fn sources_join_into_panel_data() {
    let tmp = tempfile::tempdir().unwrap();
    write_tables(tmp.path());

    let data = load_sources(tmp.path(), &ChartConfig::default()).unwrap();
    assert_eq!(data.population.len(), 1);
    assert!((data.population[0].child - 200.0).abs() < 1e-9);
    assert_eq!((data.gender[0].male, data.gender[0].female), (512, 488));
    assert!(data.missing.is_empty() && data.skipped.is_empty());
}

#[test]
fn missing_table_fails_the_whole_load() {
    let tmp = tempfile::tempdir().unwrap();
    write_tables(tmp.path());
    fs::remove_file(tmp.path().join(ELDER_CSV)).unwrap();

    let err = load_sources(tmp.path(), &ChartConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains(ELDER_CSV), "{err:#}");
}

#[test]
fn bundled_assets_include_the_national_aggregate() {
    let cfg = ChartConfig { national_stacked: NationalStackedPolicy::FallbackToGrouped, ..ChartConfig::default() };
    let data = load_sources(assets(), &cfg).unwrap();
    assert!(data.population.iter().any(|r| r.province == "全国"));
    assert!(assets().join(NATIONAL_CSV).exists());

    let mut chart = AgeChart::from_panel_data(data, cfg).unwrap();
    let outcome = chart.dispatch(popdash::DashboardEvent::ProvinceSelected { province: Some("全国".into()) });
    let frame = outcome.frame().expect("national renders grouped");
    assert_eq!(frame.layout, Layout::Grouped);
    assert_eq!(frame.years, vec!["2021", "2022", "2023"]);
}

#[test]
fn config_loads_partial_json_with_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("chart.json");
    fs::write(&path, r#"{"default_province": "上海市", "default_layout": "grouped", "phase_ms": 250}"#).unwrap();

    let cfg = ChartConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.default_province, "上海市");
    assert_eq!(cfg.default_layout, Layout::Grouped);
    assert_eq!(cfg.phase_ms, 250.0);
    assert_eq!(cfg.margins, ChartConfig::default().margins);
}

#[test]
fn config_rejects_bad_values() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("chart.json");
    fs::write(&path, r#"{"ratio_domain": [0.55, 0.45]}"#).unwrap();
    assert!(ChartConfig::from_json_file(&path).is_err());

    assert!("sideways".parse::<Layout>().is_err());
    assert_eq!(" Grouped ".parse::<Layout>().unwrap(), Layout::Grouped);
}

#[test]
fn svg_draws_bars_lines_and_legends() {
    let data = load_sources(assets(), &ChartConfig::default()).unwrap();
    let mut chart = AgeChart::from_panel_data(data, ChartConfig::default()).unwrap();
    let outcome = chart.update();
    let frame = outcome.frame().unwrap();

    let svg = render_svg(frame, &chart.config().margins);
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<title>").count(), frame.bars.len());
    assert_eq!(svg.matches("<path ").count(), 2);
    for label in ["男性", "女性", "儿童", "成年", "老年"] {
        assert!(svg.contains(label), "missing legend {label}");
    }
}

#[test]
fn duplicate_region_keys_are_rejected() {
    let err = WideTable::from_reader("child", "地区,2020\n北京,0.2\n北京市,0.3\n".as_bytes()).unwrap_err();
    match err {
        TableError::DuplicateRegion { key, first, second } => {
            assert_eq!((key.as_str(), first.as_str(), second.as_str()), ("北京", "北京", "北京市"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn national_rows_are_not_added_twice() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    fs::write(dir.join(CHILD_CSV), "地区,2020\n北京市,0.2\n全国,0.2\n").unwrap();
    fs::write(dir.join(ADULT_CSV), "地区,2020\n北京市,0.7\n全国,0.7\n").unwrap();
    fs::write(dir.join(ELDER_CSV), "地区,2020\n北京市,0.1\n全国,0.1\n").unwrap();
    fs::write(dir.join(TOTAL_CSV), "地区,2020\n北京市,1000\n全国,140000\n").unwrap();
    fs::write(dir.join(MALE_FEMALE_CSV), "地区,2020\n北京市,105\n").unwrap();
    fs::write(dir.join(NATIONAL_CSV), "year,child,adult,elder,total\n2020,0.2,0.7,0.1,140000\n2021,0.2,0.7,0.1,140000\n").unwrap();

    let cfg = ChartConfig { national_label: " 全国 ".into(), ..ChartConfig::default() };
    let data = load_sources(dir, &cfg).unwrap();
    let national: Vec<&PopulationRecord> = data.population.iter().filter(|r| r.province == "全国").collect();
    assert_eq!(national.len(), 1);
    assert_eq!(data.population.len(), 2);
}

#[test]
fn svg_escapes_text_content() {
    let population = vec![PopulationRecord {
        province: "北京市".into(),
        year: "2020<&>".into(),
        child: 200.0,
        adult: 700.0,
        elder: 100.0,
    }];
    let mut chart = AgeChart::new(population, Vec::new(), ChartConfig::default()).unwrap();
    let outcome = chart.update();
    let svg = render_svg(outcome.frame().unwrap(), &chart.config().margins);
    assert!(svg.contains("2020&lt;&amp;&gt;"), "{svg}");
    assert!(!svg.contains("2020<&>"));
}
