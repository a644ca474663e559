//! Market configuration: the company table and the global date window.
//!
//! The original tool hard-coded both; here they form an explicit config
//! structure handed to the loader at construction, serializable as TOML so
//! the CLI can point at an alternative market file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One listed company: display name plus exchange ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub ticker: String,
}

/// The full market configuration handed to the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub companies: Vec<Company>,
}

impl MarketConfig {
    /// Load a market config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read market file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a market config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse market TOML: {e}"))
    }

    /// Serialize the config to TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("serialize market config: {e}"))
    }

    /// Find the ticker for a company display name.
    pub fn ticker_for(&self, name: &str) -> Option<&str> {
        self.companies
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.ticker.as_str())
    }

    /// Company display names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.companies.iter().map(|c| c.name.as_str()).collect()
    }

    /// The ten Tokyo-listed majors over April 2023 – April 2025.
    pub fn default_tokyo() -> Self {
        let companies = [
            ("SONY", "6758.T"),
            ("TOYOTA", "7203.T"),
            ("HONDA", "7267.T"),
            ("MITSUBISHI CORP", "8058.T"),
            ("NISSAN MOTOR CORP", "7201.T"),
            ("NIPPON STEEL CORP", "5401.T"),
            ("HITACHI", "6501.T"),
            ("NINTENDO", "7974.T"),
            ("FUJITSU", "6702.T"),
            ("JAPAN AIRLINES", "9201.T"),
        ]
        .into_iter()
        .map(|(name, ticker)| Company {
            name: name.into(),
            ticker: ticker.into(),
        })
        .collect();

        Self {
            start: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 4, 27).unwrap(),
            companies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tokyo_has_ten_companies() {
        let cfg = MarketConfig::default_tokyo();
        assert_eq!(cfg.companies.len(), 10);
        assert_eq!(cfg.ticker_for("SONY"), Some("6758.T"));
        assert_eq!(cfg.ticker_for("JAPAN AIRLINES"), Some("9201.T"));
        assert_eq!(cfg.ticker_for("APPLE"), None);
    }

    #[test]
    fn default_window_matches_fixed_range() {
        let cfg = MarketConfig::default_tokyo();
        assert_eq!(cfg.start, NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
        assert_eq!(cfg.end, NaiveDate::from_ymd_opt(2025, 4, 27).unwrap());
    }

    #[test]
    fn names_preserve_table_order() {
        let cfg = MarketConfig::default_tokyo();
        let names = cfg.names();
        assert_eq!(names.first(), Some(&"SONY"));
        assert_eq!(names.last(), Some(&"JAPAN AIRLINES"));
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = MarketConfig::default_tokyo();
        let toml_str = cfg.to_toml().unwrap();
        let parsed = MarketConfig::from_toml(&toml_str).unwrap();
        assert_eq!(cfg, parsed);
    }
}
