//! Waterfall output types.

use serde::{Deserialize, Serialize};

/// What a single payout in the waterfall represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutKind {
    /// Liquidation preference paid to a preferred class.
    Preference,
    /// Pro-rata residual paid to participating preferred.
    Participation,
    /// Pro-rata residual paid to a class that converted to common.
    Conversion,
    /// Residual paid to common stock and the option pool.
    Common,
}

/// One bar of the waterfall, in payment order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutStep {
    pub label: String,
    pub kind: PayoutKind,
    pub amount: f64,
    /// Proceeds left to distribute after this step.
    pub remaining_after: f64,
}

/// Amount received by one preferred class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPayout {
    pub name: String,
    pub shares: u64,
    /// Paid out of the liquidation preference (zero if converted).
    pub preference: f64,
    /// Paid out of the residual, as participating or as-converted stock.
    pub participation: f64,
    pub converted: bool,
    /// Participation stopped at the class's cap.
    pub capped: bool,
}

impl ClassPayout {
    pub fn total(&self) -> f64 {
        self.preference + self.participation
    }

    pub fn per_share(&self) -> f64 {
        if self.shares == 0 {
            return 0.0;
        }
        self.total() / self.shares as f64
    }
}

/// How one exit's proceeds were split across the cap table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallResult {
    pub scenario: String,
    pub proceeds: f64,
    /// One entry per share class, in cap table order.
    pub classes: Vec<ClassPayout>,
    /// Paid to common stock and the option pool together.
    pub common_payout: f64,
    pub price_per_common_share: f64,
    /// Left over when every residual participant hit its cap.
    pub undistributed: f64,
    pub steps: Vec<PayoutStep>,
}

impl WaterfallResult {
    pub fn class(&self, name: &str) -> Option<&ClassPayout> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn total_preferences(&self) -> f64 {
        self.classes.iter().map(|c| c.preference).sum()
    }

    pub fn total_distributed(&self) -> f64 {
        self.classes.iter().map(ClassPayout::total).sum::<f64>() + self.common_payout
    }

    pub fn converted_classes(&self) -> impl Iterator<Item = &ClassPayout> {
        self.classes.iter().filter(|c| c.converted)
    }
}
