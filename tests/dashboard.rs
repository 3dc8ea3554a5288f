use crime_dashboard::charts::ChartSpec;
use crime_dashboard::views::{SearchOutcome, SearchQuery, NO_DATA_MESSAGE, NO_SELECTION_TITLE};
use crime_dashboard::{Dashboard, DashboardConfig, DashboardError};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;

const BOROUGHS: [&str; 3] = ["Barnet", "Camden", "Hackney"];
const CATEGORIES: [(&str, &str); 3] = [
    ("Arson and Criminal Damage", "Arson"),
    ("Drug Offences", "Trafficking of Drugs"),
    ("Theft", "Shoplifting"),
];
const YEARS: [i32; 2] = [2018, 2019];

/// Deterministic, non-trivial count for a cell.
fn cell(b: usize, c: usize, year: i32, month: u32) -> u64 {
    ((b as u64 + 1) * 7 + (c as u64 + 2) * 3 + (year as u64 % 10) + month as u64) % 23
}

fn write_fixture(dir: &tempfile::TempDir) -> PathBuf {
    let mut csv = String::from("BoroughName,MajorText,MinorText");
    for year in YEARS {
        for month in 1..=12 {
            write!(csv, ",{}{:02}", year, month).unwrap();
        }
    }
    csv.push('\n');

    for (b, borough) in BOROUGHS.iter().enumerate() {
        for (c, (major, minor)) in CATEGORIES.iter().enumerate() {
            write!(csv, "{},{},{}", borough, major, minor).unwrap();
            for year in YEARS {
                for month in 1..=12 {
                    write!(csv, ",{}", cell(b, c, year, month)).unwrap();
                }
            }
            csv.push('\n');
        }
    }

    let path = dir.path().join("crime.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn load() -> Dashboard {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir);
    Dashboard::load(&path, &DashboardConfig::default()).unwrap()
}

#[test]
fn long_table_has_one_record_per_cell() {
    let dashboard = load();
    let long = &dashboard.tables().long;
    assert_eq!(long.len(), 24 * BOROUGHS.len() * CATEGORIES.len());

    let keys: HashSet<_> = long
        .iter()
        .map(|r| (r.date, r.borough.clone(), r.category.clone()))
        .collect();
    assert_eq!(keys.len(), long.len());
}

#[test]
fn yearly_sums_match_long_table() {
    let dashboard = load();
    let tables = dashboard.tables();

    for y in &tables.yearly {
        let expected: u64 = tables
            .long
            .iter()
            .filter(|r| r.date.year == y.year && r.borough == y.borough && r.category == y.category)
            .map(|r| r.count)
            .sum();
        assert_eq!(y.count, expected);
    }
    assert_eq!(tables.yearly.len(), YEARS.len() * BOROUGHS.len() * CATEGORIES.len());
}

#[test]
fn borough_year_sums_match_yearly_table() {
    let dashboard = load();
    let tables = dashboard.tables();

    for by in &tables.borough_years {
        let expected: u64 = tables
            .yearly
            .iter()
            .filter(|r| r.year == by.year && r.borough == by.borough)
            .map(|r| r.count)
            .sum();
        assert_eq!(by.count, expected);
    }
    assert_eq!(tables.borough_years.len(), YEARS.len() * BOROUGHS.len());
}

#[test]
fn catalog_reflects_normalized_names() {
    let dashboard = load();
    let catalog = dashboard.catalog();
    assert_eq!(catalog.boroughs, vec!["BARNET", "CAMDEN", "HACKNEY"]);
    assert_eq!(
        catalog.categories,
        vec!["arson", "shoplifting", "trafficking of drugs"]
    );
    assert_eq!(catalog.default_year, 2018);
}

#[test]
fn time_series_without_selection_is_placeholder() {
    let dashboard = load();
    let spec = dashboard.time_series(&[], Some("arson"));
    assert_eq!(spec, ChartSpec::placeholder(NO_SELECTION_TITLE));
    let spec = dashboard.time_series(&["BARNET".to_string()], None);
    assert!(spec.is_placeholder());
}

#[test]
fn time_series_covers_every_month() {
    let dashboard = load();
    let spec = dashboard.time_series(
        &["BARNET".to_string(), "CAMDEN".to_string()],
        Some("arson"),
    );
    let ChartSpec::Line(line) = spec else {
        panic!("expected line chart");
    };
    assert_eq!(line.series.len(), 2);
    assert!(line.series.iter().all(|s| s.points.len() == 24));
    assert!(line.log_y);
}

#[test]
fn search_without_filters_returns_all_rows() {
    let dashboard = load();
    let outcome = dashboard.search(&SearchQuery::default());
    let table = outcome.table().unwrap();
    assert_eq!(table.len(), 24 * BOROUGHS.len() * CATEGORIES.len());
    assert_eq!(table.page(0).len(), 10);
}

#[test]
fn search_by_year_and_category() {
    let dashboard = load();
    let query = SearchQuery {
        year: Some(2019),
        category: Some("trafficking of drugs".into()),
        ..Default::default()
    };
    let outcome = dashboard.search(&query);
    let table = outcome.table().unwrap();
    assert_eq!(table.len(), 12 * BOROUGHS.len());
    assert!(table
        .rows
        .iter()
        .all(|r| r.year.starts_with("2019") && r.category == "trafficking of drugs"));
}

#[test]
fn search_with_no_match_reports_no_data() {
    let dashboard = load();
    let query = SearchQuery {
        borough: Some("Westminster".into()),
        ..Default::default()
    };
    assert_eq!(
        dashboard.search(&query),
        SearchOutcome::NoData {
            message: NO_DATA_MESSAGE
        }
    );
}

#[test]
fn comparison_is_descending() {
    let dashboard = load();
    let ChartSpec::Bar(bar) = dashboard.comparison(2019) else {
        panic!("expected bar chart");
    };
    assert_eq!(bar.bars.len(), BOROUGHS.len());
    assert!(bar.bars.windows(2).all(|w| w[0].value >= w[1].value));
}

#[test]
fn proportion_for_missing_year_is_labelled_placeholder() {
    let dashboard = load();
    let spec = dashboard.proportion(2005, 0);
    assert_eq!(
        spec,
        ChartSpec::placeholder("No data available for BARNET in 2005")
    );
}

#[test]
fn proportion_has_one_slice_per_category() {
    let dashboard = load();
    let ChartSpec::Pie(pie) = dashboard.proportion(2019, 2) else {
        panic!("expected pie chart");
    };
    assert_eq!(pie.title, "Crime Distribution in HACKNEY for 2019");
    assert_eq!(pie.slices.len(), CATEGORIES.len());
}

#[test]
fn missing_csv_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let result = Dashboard::load(&dir.path().join("missing.csv"), &DashboardConfig::default());
    assert!(matches!(result, Err(DashboardError::Load(_))));
}

#[test]
fn bad_date_header_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
        &path,
        "BoroughName,MajorText,MinorText,2019-01\nBarnet,Theft,Shoplifting,1\n",
    )
    .unwrap();
    assert!(Dashboard::load(&path, &DashboardConfig::default()).is_err());
}
