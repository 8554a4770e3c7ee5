//! Detector configuration
//!
//! Holds every tunable rule parameter. Defaults reproduce the stock rule set:
//! 500 km/h travel speed, 300 s rapid window, odd hours 00:00-05:59,
//! 10000 high-value threshold, 1.5 IQR multiplier, more than 2 failed
//! authentications, and a single trusted device, `iPhone 13`.

use chrono::TimeDelta;
use rust_decimal::Decimal;

/// Device trusted when no allowlist is supplied
pub const DEFAULT_TRUSTED_DEVICE: &str = "iPhone 13";

/// Parameters for all eight detectors
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Maximum plausible travel speed between consecutive card uses
    pub travel_threshold_km_per_hour: f64,

    /// Span within which three card uses count as rapid
    pub rapid_window: TimeDelta,

    /// First hour of day (inclusive) considered unusual
    pub odd_hours_start: u32,

    /// Last hour of day (inclusive) considered unusual
    pub odd_hours_end: u32,

    /// Amounts strictly above this are high-value
    pub high_value_threshold: Decimal,

    /// Multiplier applied to the IQR when building outlier fences
    pub iqr_multiplier: Decimal,

    /// Failed authentication counts strictly above this are flagged
    pub failed_auth_threshold: u32,

    /// Devices that are never flagged as suspicious
    pub trusted_devices: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            travel_threshold_km_per_hour: 500.0,
            rapid_window: TimeDelta::seconds(300),
            odd_hours_start: 0,
            odd_hours_end: 5,
            high_value_threshold: Decimal::from(10_000),
            iqr_multiplier: Decimal::new(15, 1),
            failed_auth_threshold: 2,
            trusted_devices: vec![DEFAULT_TRUSTED_DEVICE.to_string()],
        }
    }
}

impl DetectorConfig {
    /// Replace values no rule can work with by their defaults
    ///
    /// Each replacement is reported with a warning. A zero failed-auth
    /// threshold is valid (any failure is flagged) and is kept.
    pub fn validated(self) -> Self {
        let default = Self::default();
        let mut config = self;

        if !config.travel_threshold_km_per_hour.is_finite()
            || config.travel_threshold_km_per_hour <= 0.0
        {
            log::warn!(
                "Invalid travel threshold ({} km/h), using default ({} km/h)",
                config.travel_threshold_km_per_hour,
                default.travel_threshold_km_per_hour
            );
            config.travel_threshold_km_per_hour = default.travel_threshold_km_per_hour;
        }

        if config.rapid_window <= TimeDelta::zero() {
            log::warn!(
                "Invalid rapid window ({}s), using default ({}s)",
                config.rapid_window.num_seconds(),
                default.rapid_window.num_seconds()
            );
            config.rapid_window = default.rapid_window;
        }

        if config.odd_hours_start > 23
            || config.odd_hours_end > 23
            || config.odd_hours_start > config.odd_hours_end
        {
            log::warn!(
                "Invalid odd hours window ({}-{}), using default ({}-{})",
                config.odd_hours_start,
                config.odd_hours_end,
                default.odd_hours_start,
                default.odd_hours_end
            );
            config.odd_hours_start = default.odd_hours_start;
            config.odd_hours_end = default.odd_hours_end;
        }

        if config.high_value_threshold.is_sign_negative() {
            log::warn!(
                "Invalid high-value threshold ({}), using default ({})",
                config.high_value_threshold,
                default.high_value_threshold
            );
            config.high_value_threshold = default.high_value_threshold;
        }

        if config.iqr_multiplier.is_sign_negative() {
            log::warn!(
                "Invalid IQR multiplier ({}), using default ({})",
                config.iqr_multiplier,
                default.iqr_multiplier
            );
            config.iqr_multiplier = default.iqr_multiplier;
        }

        if config.trusted_devices.is_empty() {
            log::warn!(
                "Empty trusted device list, using default ({})",
                default.trusted_devices.join(", ")
            );
            config.trusted_devices = default.trusted_devices;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.travel_threshold_km_per_hour, 500.0);
        assert_eq!(config.rapid_window, TimeDelta::seconds(300));
        assert_eq!((config.odd_hours_start, config.odd_hours_end), (0, 5));
        assert_eq!(config.high_value_threshold, Decimal::from(10_000));
        assert_eq!(config.failed_auth_threshold, 2);
        assert_eq!(config.trusted_devices, vec!["iPhone 13".to_string()]);
    }

    #[test]
    fn test_validated_keeps_valid_values() {
        let config = DetectorConfig {
            travel_threshold_km_per_hour: 900.0,
            rapid_window: TimeDelta::seconds(60),
            odd_hours_start: 1,
            odd_hours_end: 4,
            high_value_threshold: Decimal::from(500),
            iqr_multiplier: Decimal::from(3),
            failed_auth_threshold: 0,
            trusted_devices: vec!["Pixel 8".to_string()],
        };

        assert_eq!(config.clone().validated(), config);
    }

    #[test]
    fn test_validated_falls_back_on_invalid_values() {
        let config = DetectorConfig {
            travel_threshold_km_per_hour: f64::NAN,
            rapid_window: TimeDelta::zero(),
            odd_hours_start: 6,
            odd_hours_end: 2,
            high_value_threshold: Decimal::from(-1),
            iqr_multiplier: Decimal::from(-2),
            failed_auth_threshold: 2,
            trusted_devices: Vec::new(),
        }
        .validated();

        assert_eq!(config, DetectorConfig::default());
    }

    #[test]
    fn test_empty_trusted_devices_restore_default_list() {
        let config = DetectorConfig {
            trusted_devices: Vec::new(),
            high_value_threshold: Decimal::from(500),
            ..DetectorConfig::default()
        }
        .validated();

        assert_eq!(config.trusted_devices, vec!["iPhone 13".to_string()]);
        assert_eq!(config.high_value_threshold, Decimal::from(500));
    }
}
