use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Business-hours and scheduling configuration for the salon.
///
/// Loaded once at startup; defaults describe the salon's actual schedule
/// (09:00-18:00, Sunday through Thursday, 30-minute slot grid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalonConfig {
    /// Opening hour, 24-hour clock
    pub open_hour: u32,
    /// Closing hour, 24-hour clock; no service may run past it
    pub close_hour: u32,
    /// Slot granularity in minutes
    pub slot_minutes: u32,
    /// Weekday indices the salon is open, 0 = Sunday
    pub working_days: Vec<u32>,
}

impl Default for SalonConfig {
    fn default() -> Self {
        Self {
            open_hour: 9,
            close_hour: 18,
            slot_minutes: 30,
            working_days: vec![0, 1, 2, 3, 4],
        }
    }
}

impl SalonConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SalonConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        info!(
            "Loaded config from {}: {:02}:00-{:02}:00, {} working days",
            path.display(),
            config.open_hour,
            config.close_hour,
            config.working_days.len()
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.open_hour >= self.close_hour || self.close_hour > 24 {
            anyhow::bail!(
                "Invalid business hours: {:02}:00-{:02}:00",
                self.open_hour,
                self.close_hour
            );
        }
        if self.slot_minutes == 0 || self.slot_minutes > 60 {
            anyhow::bail!("Invalid slot granularity: {} minutes", self.slot_minutes);
        }
        if self.working_days.iter().any(|d| *d > 6) {
            anyhow::bail!("Working day index out of range (0-6 expected)");
        }
        Ok(())
    }

    /// Closing time in minutes since midnight
    pub fn closing_minutes(&self) -> u32 {
        self.close_hour * 60
    }

    /// Opening time in minutes since midnight
    pub fn opening_minutes(&self) -> u32 {
        self.open_hour * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_describe_salon_schedule() {
        let config = SalonConfig::default();
        assert_eq!(config.open_hour, 9);
        assert_eq!(config.close_hour, 18);
        assert_eq!(config.slot_minutes, 30);
        assert_eq!(config.working_days, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SalonConfig::load(dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, SalonConfig::default());
    }

    #[test]
    fn loads_overrides_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salon.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "open_hour: 10\nclose_hour: 20").unwrap();

        let config = SalonConfig::load(&path).unwrap();
        assert_eq!(config.open_hour, 10);
        assert_eq!(config.close_hour, 20);
        // Unspecified fields keep their defaults
        assert_eq!(config.slot_minutes, 30);
    }

    #[test]
    fn rejects_inverted_hours() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salon.yaml");
        std::fs::write(&path, "open_hour: 18\nclose_hour: 9").unwrap();
        assert!(SalonConfig::load(&path).is_err());
    }
}
