//! The follower time series and the account identifiers it tracks.

use crate::network::Network;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The tracked account on each network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountIds {
    pub twitter: String,
    pub tumblr: String,
    pub instagram: String,
}

impl AccountIds {
    pub fn get(&self, network: Network) -> &str {
        match network {
            Network::Twitter => &self.twitter,
            Network::Tumblr => &self.tumblr,
            Network::Instagram => &self.instagram,
        }
    }
}

/// One day's follower counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerRecord {
    pub date: NaiveDate,
    /// ISO weekday, Monday = 1 through Sunday = 7.
    pub weekday: u8,
    pub twitter: u64,
    pub tumblr: u64,
    pub instagram: u64,
}

impl FollowerRecord {
    pub fn new(date: NaiveDate, twitter: u64, tumblr: u64, instagram: u64) -> Self {
        Self {
            date,
            weekday: iso_weekday(date),
            twitter,
            tumblr,
            instagram,
        }
    }

    pub fn count(&self, network: Network) -> u64 {
        match network {
            Network::Twitter => self.twitter,
            Network::Tumblr => self.tumblr,
            Network::Instagram => self.instagram,
        }
    }
}

pub fn iso_weekday(date: NaiveDate) -> u8 {
    // number_from_monday is 1..=7
    date.weekday().number_from_monday() as u8
}

/// A single `(date, network, count)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkPoint {
    pub date: NaiveDate,
    pub network: Network,
    pub count: u64,
}

/// Records in insertion order. Dates may repeat or go backwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSeries {
    records: Vec<FollowerRecord>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<FollowerRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: FollowerRecord) {
        self.records.push(record);
    }

    /// Removes the most recent record.
    pub fn pop(&mut self) -> Option<FollowerRecord> {
        self.records.pop()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FollowerRecord] {
        &self.records
    }

    /// Long form of the series: one point per network per record, records in
    /// insertion order and networks in `Network::ALL` order within each.
    pub fn points(&self) -> Vec<NetworkPoint> {
        self.records
            .iter()
            .flat_map(|record| {
                Network::ALL.into_iter().map(move |network| NetworkPoint {
                    date: record.date,
                    network,
                    count: record.count(network),
                })
            })
            .collect()
    }

    pub fn max_count(&self) -> Option<u64> {
        self.records
            .iter()
            .flat_map(|r| Network::ALL.map(|n| r.count(n)))
            .max()
    }
}

/// Everything the recorder persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    pub accounts: AccountIds,
    pub series: TimeSeries,
}

impl Journey {
    pub fn new(accounts: AccountIds) -> Self {
        Self {
            accounts,
            series: TimeSeries::new(),
        }
    }
}

#[cfg(test)]
#[path = "tests/series_tests.rs"]
mod tests;
