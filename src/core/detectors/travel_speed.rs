//! Impossible travel speed detector
//!
//! Flags the later of two consecutive card uses when covering the distance
//! between them would need a speed above the threshold.

use crate::core::geo::great_circle_km;
use crate::core::grouping::TransactionSet;
use crate::core::traits::Detector;
use crate::types::{Findings, FraudReason};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelSpeedDetector {
    threshold_km_per_hour: f64,
}

impl TravelSpeedDetector {
    pub fn new(threshold_km_per_hour: f64) -> Self {
        Self {
            threshold_km_per_hour,
        }
    }
}

impl Default for TravelSpeedDetector {
    fn default() -> Self {
        Self::new(500.0)
    }
}

impl Detector for TravelSpeedDetector {
    fn name(&self) -> &'static str {
        "travel-speed"
    }

    fn reason(&self) -> FraudReason {
        FraudReason::UnrealisticTravel
    }

    fn detect(&self, transactions: &TransactionSet) -> Findings {
        let mut findings = Findings::new();

        for group in transactions.card_groups() {
            let ordered = group.ordered();
            for pair in ordered.windows(2) {
                let (earlier, later) = (pair[0], pair[1]);
                let elapsed = later.timestamp - earlier.timestamp;
                let elapsed_hours = elapsed.num_milliseconds() as f64 / MILLIS_PER_HOUR;

                // Equal or out-of-order timestamps give no usable speed
                if elapsed_hours <= 0.0 {
                    continue;
                }

                let distance = great_circle_km(
                    earlier.latitude,
                    earlier.longitude,
                    later.latitude,
                    later.longitude,
                );
                if distance / elapsed_hours > self.threshold_km_per_hour {
                    findings.insert(later.transaction_id.clone(), self.reason());
                }
            }
        }

        findings
    }
}
