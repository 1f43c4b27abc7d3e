//! # Settings Module
//!
//! ## Purpose
//! Holds the tunable parameters of formula and equation parsing and persists them as JSON,
//! so that the same reaction text is always interpreted with the same rules.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "balance_tolerance": 1e-6,
//!   "arrows": ["<=>", "->", "=>", "→", "⟶"],
//!   "strip_phase_marks": true
//! }
//! ```
//!
//! ## Usage
//! ```rust
//! use ChemEq::settings::StoichConfig;
//!
//! let config = StoichConfig::load("stoich_config.json").unwrap();
//! assert!(config.validate().is_ok());
//! ```
use crate::Stoichiometry::stoich_errors::StoichError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters of formula and equation parsing.
///
/// # Fields
/// * `balance_tolerance` - max absolute difference of atom counts for an element to be considered balanced
/// * `arrows` - tokens separating reactants from products; at a given position the longest token wins
/// * `strip_phase_marks` - remove trailing (g), (l), (s), (aq)... annotations from formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoichConfig {
    pub balance_tolerance: f64,
    pub arrows: Vec<String>,
    pub strip_phase_marks: bool,
}

impl Default for StoichConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: 1e-6,
            arrows: ["<=>", "->", "=>", "→", "⟶"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strip_phase_marks: true,
        }
    }
}

impl StoichConfig {
    /// Loads configuration from a JSON file. Missing file means default configuration,
    /// missing fields are filled with defaults.
    pub fn load(config_file: &str) -> Result<StoichConfig, StoichError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: StoichConfig = serde_json::from_str(&content)?;
            config.validate()?;
            info!("configuration loaded from {}", config_file);
            Ok(config)
        } else {
            warn!(
                "configuration file {} not found, using defaults",
                config_file
            );
            Ok(StoichConfig::default())
        }
    }

    /// Saves configuration as pretty printed JSON
    pub fn save(&self, config_file: &str) -> Result<(), StoichError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), StoichError> {
        if !self.balance_tolerance.is_finite() || self.balance_tolerance < 0.0 {
            return Err(StoichError::format(
                "balance_tolerance",
                format!("must be finite and non-negative, got {}", self.balance_tolerance),
            ));
        }
        if self.arrows.is_empty() {
            return Err(StoichError::format("arrows", "at least one arrow token is required"));
        }
        if let Some(bad) = self
            .arrows
            .iter()
            .find(|a| a.trim().is_empty() || a.contains('+'))
        {
            return Err(StoichError::format(
                "arrows",
                format!("invalid arrow token '{}'", bad),
            ));
        }
        Ok(())
    }
}
