//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw strings the backend and the UI exchange.

pub mod fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── Ticker ──────────────────────────────────────────────────────────────────

/// A stock symbol, trimmed and upper-cased (e.g. `"AAPL"`).
///
/// Never empty: blank user input has no `Ticker` representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Normalize raw user input. Returns `None` for empty or all-whitespace text.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::parse(s).ok_or_else(|| "ticker must not be blank".to_string())
    }
}

impl Serialize for Ticker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Ticker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ticker::parse(&s).ok_or_else(|| serde::de::Error::custom("blank ticker"))
    }
}

// ─── Interval ────────────────────────────────────────────────────────────────

/// Intraday bucket size of a quote time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1min")]
    Minute1,
    #[default]
    #[serde(rename = "5min")]
    Minute5,
    #[serde(rename = "15min")]
    Minute15,
    #[serde(rename = "30min")]
    Minute30,
    #[serde(rename = "60min")]
    Minute60,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1min",
            Self::Minute5 => "5min",
            Self::Minute15 => "15min",
            Self::Minute30 => "30min",
            Self::Minute60 => "60min",
        }
    }

    /// Key under which the provider nests the series, e.g. `"Time Series (5min)"`.
    pub fn series_key(&self) -> String {
        format!("Time Series ({})", self.as_str())
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1min" => Ok(Self::Minute1),
            "5min" => Ok(Self::Minute5),
            "15min" => Ok(Self::Minute15),
            "30min" => Ok(Self::Minute30),
            "60min" => Ok(Self::Minute60),
            other => Err(format!("unknown interval: {other}")),
        }
    }
}
