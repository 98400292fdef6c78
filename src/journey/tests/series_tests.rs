use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_record_weekday_is_iso() {
    // 2026-10-12 is a Monday, 2026-10-18 a Sunday
    assert_eq!(FollowerRecord::new(date(2026, 10, 12), 0, 0, 0).weekday, 1);
    assert_eq!(FollowerRecord::new(date(2026, 10, 16), 0, 0, 0).weekday, 5);
    assert_eq!(FollowerRecord::new(date(2026, 10, 18), 0, 0, 0).weekday, 7);
}

#[test]
fn test_same_day_records_are_kept() {
    let mut series = TimeSeries::new();
    series.push(FollowerRecord::new(date(2026, 10, 16), 1, 2, 3));
    series.push(FollowerRecord::new(date(2026, 10, 16), 4, 5, 6));

    assert_eq!(series.len(), 2);
    assert_eq!(series.records()[1].twitter, 4);
}

#[test]
fn test_points_melt_each_record_into_three_rows() {
    let series = TimeSeries::from_records(vec![
        FollowerRecord::new(date(2026, 10, 15), 100, 50, 200),
        FollowerRecord::new(date(2026, 10, 16), 101, 49, 210),
    ]);

    let points = series.points();

    assert_eq!(points.len(), 6);
    assert_eq!(
        points[0],
        NetworkPoint {
            date: date(2026, 10, 15),
            network: Network::Twitter,
            count: 100
        }
    );
    assert_eq!(points[2].network, Network::Instagram);
    assert_eq!(points[2].count, 200);
    assert_eq!(points[4].date, date(2026, 10, 16));
    assert_eq!(points[4].count, 49);
}

#[test]
fn test_max_count_spans_all_networks() {
    let series = TimeSeries::from_records(vec![
        FollowerRecord::new(date(2026, 10, 15), 100, 50, 200),
        FollowerRecord::new(date(2026, 10, 16), 300, 49, 210),
    ]);
    assert_eq!(series.max_count(), Some(300));
    assert_eq!(TimeSeries::new().max_count(), None);
}

#[test]
fn test_account_ids_by_network() {
    let accounts = AccountIds {
        twitter: "nz_angel".to_string(),
        tumblr: "nz-angel".to_string(),
        instagram: "nz.angel".to_string(),
    };
    assert_eq!(accounts.get(Network::Tumblr), "nz-angel");
    assert_eq!(accounts.get(Network::Instagram), "nz.angel");
}
