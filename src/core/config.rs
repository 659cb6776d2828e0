//! Configuration management with layered hierarchy

use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::units::TimeUnit;
use crate::kpi::{AnalysisMode, FormulaFamily, KpiOptions, Locale, NumberFormat, Precision};

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".rkt.yaml";

const DEFAULT_REPORT_TITLE: &str = "Reliability and Maintenance KPI Analysis";

/// RKT configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Unit for displayed durations
    pub display_unit: Option<TimeUnit>,

    /// Default analysis mode
    pub mode: Option<AnalysisMode>,

    /// Formula family for repairable KPIs
    pub family: Option<FormulaFamily>,

    /// Track preventive maintenance time
    pub preventive_maintenance: Option<bool>,

    /// Number formatting convention
    pub locale: Option<Locale>,

    /// Decimal places per metric kind
    pub precision: Option<Precision>,

    /// Heading used by `rkt report`
    pub report_title: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/rkt/config.yaml)
        if let Some(global) = Self::global_config_path().and_then(|p| Self::load_file(&p)) {
            config.merge(global);
        }

        // 3. Local config (./.rkt.yaml)
        if let Some(local) = Self::load_file(Path::new(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Read one config file. Missing files are silently skipped; unreadable
    /// or malformed ones are skipped with a warning.
    pub fn load_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config file");
                return None;
            }
        };

        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rkt")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Apply `RKT_*` overrides read through `lookup`
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(unit) = lookup("RKT_UNIT") {
            match unit.parse::<TimeUnit>() {
                Ok(u) => self.display_unit = Some(u),
                Err(e) => tracing::warn!(error = %e, "ignoring RKT_UNIT"),
            }
        }
        if let Some(locale) = lookup("RKT_LOCALE") {
            match Locale::from_str(&locale, true) {
                Ok(l) => self.locale = Some(l),
                Err(e) => tracing::warn!(error = %e, "ignoring RKT_LOCALE"),
            }
        }
        if let Some(family) = lookup("RKT_FAMILY") {
            match FormulaFamily::from_str(&family, true) {
                Ok(f) => self.family = Some(f),
                Err(e) => tracing::warn!(error = %e, "ignoring RKT_FAMILY"),
            }
        }
        if let Some(mode) = lookup("RKT_MODE") {
            match AnalysisMode::from_str(&mode, true) {
                Ok(m) => self.mode = Some(m),
                Err(e) => tracing::warn!(error = %e, "ignoring RKT_MODE"),
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.display_unit.is_some() {
            self.display_unit = other.display_unit;
        }
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        if other.family.is_some() {
            self.family = other.family;
        }
        if other.preventive_maintenance.is_some() {
            self.preventive_maintenance = other.preventive_maintenance;
        }
        if other.locale.is_some() {
            self.locale = other.locale;
        }
        if other.precision.is_some() {
            self.precision = other.precision;
        }
        if other.report_title.is_some() {
            self.report_title = other.report_title;
        }
    }

    pub fn display_unit(&self) -> TimeUnit {
        self.display_unit.unwrap_or_default()
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode.unwrap_or_default()
    }

    pub fn options(&self) -> KpiOptions {
        KpiOptions::new(
            self.family.unwrap_or_default(),
            self.preventive_maintenance.unwrap_or(false),
        )
    }

    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new(
            self.locale.unwrap_or_default(),
            self.precision.unwrap_or_default(),
        )
    }

    pub fn report_title(&self) -> String {
        self.report_title
            .clone()
            .unwrap_or_else(|| DEFAULT_REPORT_TITLE.to_string())
    }
}
