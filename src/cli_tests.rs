//! Tests for cli module

use super::*;
use crate::journey::series::TimeSeries;
use crate::journey::AccountIds;
use chrono::NaiveDate;
use std::io::Cursor;
use tempfile::tempdir;

fn journey_with_rows() -> Journey {
    let day = |d| NaiveDate::from_ymd_opt(2026, 10, d).unwrap();
    Journey {
        accounts: AccountIds {
            twitter: "nz_angel".to_string(),
            tumblr: "nz-angel".to_string(),
            instagram: "nz.angel".to_string(),
        },
        series: TimeSeries::from_records(vec![
            FollowerRecord::new(day(15), 99, 51, 190),
            FollowerRecord::new(day(16), 100, 50, 200),
        ]),
    }
}

#[test]
fn test_no_subcommand_means_record() {
    let cli = Cli::try_parse_from(["journey"]).unwrap();
    assert_eq!(cli.command, None);
}

#[test]
fn test_parse_record_with_plot_and_globals() {
    let cli =
        Cli::try_parse_from(["journey", "record", "--plot", "--home", "/tmp/j"]).unwrap();
    assert_eq!(cli.command, Some(Command::Record { plot: true }));
    assert_eq!(cli.home, Some(PathBuf::from("/tmp/j")));
}

#[test]
fn test_parse_credentials_set() {
    let cli = Cli::try_parse_from(["journey", "credentials", "set", "tumblr"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Command::Credentials(CredentialsCommand::Set {
            network: "tumblr".to_string()
        }))
    );
}

#[test]
fn test_parse_plot_output() {
    let cli = Cli::try_parse_from(["journey", "plot", "-o", "out.png"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Command::Plot {
            output: Some(PathBuf::from("out.png"))
        })
    );
}

#[test]
fn test_history_table() {
    let mut out = Vec::new();
    write_history(&journey_with_rows(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("date"));
    assert!(lines[2].starts_with("2026-10-16"));
    assert!(lines[2].ends_with("200"));
}

#[test]
fn test_format_record() {
    let record = FollowerRecord::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), 100, 50, 200);
    assert_eq!(
        format_record(&record),
        "2026-10-16  Fri  twitter 100  tumblr 50  instagram 200"
    );
}

#[test]
fn test_set_credentials_prompts_and_saves() {
    let dir = tempdir().unwrap();
    let paths = JourneyPaths::in_dir(dir.path());
    let mut input = Cursor::new("token-123\n17841400000000000\n");
    let mut output = Vec::new();

    set_credentials(&paths, "instagram", &mut input, &mut output).unwrap();

    let store = CredentialStore::load(&paths.credentials).unwrap();
    assert_eq!(store.instagram().access_token, "token-123");
    assert_eq!(store.instagram().page_id, "17841400000000000");
    assert!(String::from_utf8(output).unwrap().contains("Saved Instagram credentials"));
}

#[test]
fn test_set_credentials_unknown_network() {
    let dir = tempdir().unwrap();
    let paths = JourneyPaths::in_dir(dir.path());
    let mut input = Cursor::new("");
    let mut output = Vec::new();

    let err = set_credentials(&paths, "myspace", &mut input, &mut output).unwrap_err();

    assert!(err.to_string().contains("Invalid social media website 'myspace'"));
    assert!(!paths.credentials.exists());
}

#[test]
fn test_show_masks_every_field() {
    let mut store = CredentialStore::default();
    let fields = [
        ("oauth_token".to_string(), "abcdefgh1234".to_string()),
        ("consumer_key".to_string(), "ck".to_string()),
    ]
    .into_iter()
    .collect();
    store.update("tumblr", &fields).unwrap();
    let mut out = Vec::new();

    write_credentials(&store, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("[twitter]\n  consumer_key: (empty)"));
    assert!(text.contains("  oauth_token: ****1234"));
    assert!(text.contains("  consumer_key: ****\n  consumer_secret: (empty)"));
    assert!(!text.contains("abcdefgh"));
    assert!(text.contains("[instagram]\n  access_token: (empty)\n  page_id: (empty)"));
}

#[test]
fn test_history_requires_journey() {
    let dir = tempdir().unwrap();
    let err = require_journey(&JourneyPaths::in_dir(dir.path())).unwrap_err();
    assert!(err.to_string().contains("No journey recorded yet"));
}
