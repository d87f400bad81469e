use popdash::io::merge::{
    merge_age_tables, merge_by_index, merge_by_key, merge_gender, AgeTables, AgeValueKind, JoinStrategy, SkipReason,
};
use popdash::io::table::WideTable;
use popdash::DataJoinError;

fn table(name: &str, csv: &str) -> WideTable {
    WideTable::from_reader(name, csv.as_bytes()).expect("parse table")
}

fn tables<'a>(child: &'a WideTable, adult: &'a WideTable, elder: &'a WideTable, total: &'a WideTable) -> AgeTables<'a> {
    AgeTables { child, adult, elder, total: Some(total), kind: AgeValueKind::Proportion }
}

#[test]
fn keyed_join_scales_proportions_by_total() {
    let child = table("child", "地区,2020年\n北京市,0.2\n上海市,0.1\n");
    // Different row order and suffix-less labels still join on the key.
    let adult = table("adult", "地区,2020年\n上海,0.7\n北京,0.7\n");
    let elder = table("elder", "地区,2020年\n北京市,0.1\n上海市,0.2\n");
    let total = table("total", "地区,2020\n上海市,2000\n北京市,1000\n");

    let report = merge_by_key(&tables(&child, &adult, &elder, &total)).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.records.len(), 2);

    let bj = &report.records[0];
    assert_eq!((bj.province.as_str(), bj.year.as_str()), ("北京市", "2020"));
    assert!((bj.child - 200.0).abs() < 1e-9);
    assert!((bj.adult - 700.0).abs() < 1e-9);
    assert!((bj.elder - 100.0).abs() < 1e-9);

    let sh = &report.records[1];
    assert!((sh.adult - 1400.0).abs() < 1e-9);
}

#[test]
fn positional_join_rejects_row_count_mismatch() {
    let child = table("child", "地区,2020\n北京市,0.2\n上海市,0.1\n");
    let adult = table("adult", "地区,2020\n北京市,0.7\n");
    let elder = table("elder", "地区,2020\n北京市,0.1\n上海市,0.2\n");
    let total = table("total", "地区,2020\n北京市,1000\n上海市,2000\n");

    let err = merge_by_index(&tables(&child, &adult, &elder, &total)).unwrap_err();
    assert_eq!(err, DataJoinError::RowCountMismatch { table: "adult".into(), expected: 2, actual: 1 });
}

#[test]
fn positional_join_rejects_reordered_rows() {
    let child = table("child", "地区,2020\n北京市,0.2\n上海市,0.1\n");
    let adult = table("adult", "地区,2020\n上海市,0.7\n北京市,0.7\n");
    let elder = table("elder", "地区,2020\n北京市,0.1\n上海市,0.2\n");
    let total = table("total", "地区,2020\n北京市,1000\n上海市,2000\n");

    let err = merge_by_index(&tables(&child, &adult, &elder, &total)).unwrap_err();
    assert!(matches!(err, DataJoinError::RegionMismatch { row: 0, .. }), "{err:?}");
}

#[test]
fn keyed_join_reports_missing_region_and_year() {
    let child = table("child", "地区,2020,2021\n北京市,0.2,0.2\n");
    let adult = table("adult", "地区,2020,2021\n上海市,0.7,0.7\n");
    let elder = table("elder", "地区,2020,2021\n北京市,0.1,0.1\n");
    let total = table("total", "地区,2020,2021\n北京市,1000,1000\n");
    let err = merge_by_key(&tables(&child, &adult, &elder, &total)).unwrap_err();
    assert_eq!(err, DataJoinError::MissingRegion { table: "adult".into(), region: "北京市".into() });

    let short_total = table("total", "地区,2020\n北京市,1000\n");
    let adult = table("adult", "地区,2020,2021\n北京市,0.7,0.7\n");
    let err = merge_by_key(&tables(&child, &adult, &elder, &short_total)).unwrap_err();
    assert_eq!(err, DataJoinError::MissingYear { table: "total".into(), year: "2021".into() });
}

#[test]
fn proportions_need_a_total_table() {
    let t = table("child", "地区,2020\n北京市,0.2\n");
    let tables = AgeTables { child: &t, adult: &t, elder: &t, total: None, kind: AgeValueKind::Proportion };
    let err = merge_age_tables(&tables, JoinStrategy::Keyed).unwrap_err();
    assert_eq!(err, DataJoinError::MissingTable("total".into()));
}

#[test]
fn missing_cells_drop_the_record_and_are_reported() {
    let child = table("child", "地区,2020,2021\n北京市,,0.2\n");
    let adult = table("adult", "地区,2020,2021\n北京市,0.7,n/a\n");
    let elder = table("elder", "地区,2020,2021\n北京市,0.1,0.1\n");
    let total = table("total", "地区,2020,2021\n北京市,1000,1000\n");

    let report = merge_by_key(&tables(&child, &adult, &elder, &total)).unwrap();
    assert!(report.records.is_empty());
    let missing: Vec<(&str, &str)> = report.missing.iter().map(|m| (m.table.as_str(), m.year.as_str())).collect();
    assert_eq!(missing, vec![("child", "2020"), ("adult", "2021")]);
}

#[test]
fn absolute_values_pass_through() {
    let child = table("child", "地区,2020\n北京市,200\n");
    let adult = table("adult", "地区,2020\n北京市,700\n");
    let elder = table("elder", "地区,2020\n北京市,100\n");
    let tables = AgeTables { child: &child, adult: &adult, elder: &elder, total: None, kind: AgeValueKind::Absolute };

    let report = merge_age_tables(&tables, JoinStrategy::Positional).unwrap();
    assert_eq!(report.records[0].values(), [200.0, 700.0, 100.0]);
}

#[test]
fn gender_merge_splits_and_skips() {
    let total = table("allpeople", "地区,2020,2021\n北京市,1000,-5\n上海市,2000,2000\n广东省,500,500\n");
    let ratio = table("malefemale", "地区,2020,2021\n北京市,105,104\n上海市,100,\n");

    let report = merge_gender(&total, &ratio);
    assert_eq!(report.records.len(), 2);
    assert_eq!((report.records[0].male, report.records[0].female), (512, 488));
    assert_eq!((report.records[1].male, report.records[1].female), (1000, 1000));

    let reasons: Vec<(&str, &str, SkipReason)> =
        report.skipped.iter().map(|s| (s.region.as_str(), s.year.as_str(), s.reason)).collect();
    assert_eq!(
        reasons,
        vec![
            ("北京市", "2021", SkipReason::InvalidTotal),
            ("上海市", "2021", SkipReason::MissingRatio),
            ("广东省", "2020", SkipReason::NoRatioRow),
            ("广东省", "2021", SkipReason::NoRatioRow),
        ]
    );
}

#[test]
fn extra_year_in_a_secondary_table_is_a_mismatch() {
    let child = table("child", "地区,2020\n北京市,0.2\n");
    let adult = table("adult", "地区,2020,2021\n北京市,0.7,0.7\n");
    let elder = table("elder", "地区,2020\n北京市,0.1\n");
    let total = table("total", "地区,2020\n北京市,1000\n");

    let err = merge_by_key(&tables(&child, &adult, &elder, &total)).unwrap_err();
    assert_eq!(err, DataJoinError::YearSetMismatch { table: "adult".into(), extra: vec!["2021".into()] });
}
