//! Fraud detectors
//!
//! One module per rule. Each detector reads the whole transaction set and
//! returns the ids it flags; none depends on another's output.

pub mod amount_outlier;
pub mod failed_auth;
pub mod high_value;
pub mod new_country;
pub mod odd_hours;
pub mod rapid_transactions;
pub mod suspicious_device;
pub mod travel_speed;

pub use amount_outlier::AmountOutlierDetector;
pub use failed_auth::FailedAuthDetector;
pub use high_value::HighValueDetector;
pub use new_country::NewCountryDetector;
pub use odd_hours::OddHoursDetector;
pub use rapid_transactions::RapidTransactionsDetector;
pub use suspicious_device::SuspiciousDeviceDetector;
pub use travel_speed::TravelSpeedDetector;
