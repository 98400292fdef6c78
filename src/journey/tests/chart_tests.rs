use super::*;
use crate::journey::series::FollowerRecord;
use tempfile::tempdir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

#[test]
fn test_y_axis_upper_bound() {
    assert_eq!(y_axis_upper_bound(200), 300);
    assert_eq!(y_axis_upper_bound(101), 152);
    assert_eq!(y_axis_upper_bound(1), 2);
    assert_eq!(y_axis_upper_bound(0), 1);
}

#[test]
fn test_date_range_pads_single_day() {
    let series = TimeSeries::from_records(vec![FollowerRecord::new(day(16), 1, 2, 3)]);
    let range = date_range(&series.points()).unwrap();
    assert_eq!(range, day(15)..day(17));
}

#[test]
fn test_network_line_is_date_ordered() {
    let series = TimeSeries::from_records(vec![
        FollowerRecord::new(day(16), 100, 50, 200),
        FollowerRecord::new(day(14), 90, 52, 180),
        FollowerRecord::new(day(15), 95, 51, 190),
    ]);

    let line = network_line(&series.points(), Network::Instagram);

    assert_eq!(line, vec![(day(14), 180), (day(15), 190), (day(16), 200)]);
    assert_eq!(line.last(), Some(&(day(16), 200)));
}

#[test]
fn test_empty_series_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journey.png");

    let err = render_chart(&TimeSeries::new(), &path, &ChartSettings::default()).unwrap_err();

    assert!(err.to_string().contains("Nothing to plot"));
    assert!(!path.exists());
}

#[test]
fn test_writes_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("charts").join("journey.png");
    let series = TimeSeries::from_records(vec![
        FollowerRecord::new(day(14), 90, 52, 180),
        FollowerRecord::new(day(15), 95, 51, 190),
        FollowerRecord::new(day(16), 100, 50, 200),
    ]);
    let settings = ChartSettings {
        width: 400,
        height: 300,
    };

    render_chart(&series, &path, &settings).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}
