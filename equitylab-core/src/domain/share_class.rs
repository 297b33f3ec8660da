//! One funding round of preferred stock.

use serde::{Deserialize, Serialize};

/// How a preferred class shares in proceeds beyond its liquidation preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Participation {
    /// Takes the preference OR converts to common, whichever pays more.
    #[default]
    NonParticipating,

    /// Takes the preference AND a pro-rata share of the residual.
    ///
    /// `cap` is a total-return multiple of invested capital (preference
    /// included). A capped class may still convert to common.
    Participating {
        #[serde(default)]
        cap: Option<f64>,
    },
}

impl Participation {
    pub fn is_participating(&self) -> bool {
        matches!(self, Self::Participating { .. })
    }

    /// Participation cap multiple, if any.
    pub fn cap(&self) -> Option<f64> {
        match self {
            Self::NonParticipating => None,
            Self::Participating { cap } => *cap,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::NonParticipating => "Non-Participating".into(),
            Self::Participating { cap: None } => "Participating".into(),
            Self::Participating { cap: Some(c) } => format!("Participating (capped at {c}x)"),
        }
    }
}

fn default_multiple() -> f64 {
    1.0
}

/// A class of preferred stock issued in one funding round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareClass {
    pub name: String,
    /// Shares issued (as-converted share count).
    pub shares: u64,
    /// Capital invested in the round (original purchase amount).
    pub invested: f64,
    /// Liquidation preference multiple, e.g. 1.0 for 1x.
    #[serde(default = "default_multiple")]
    pub multiple: f64,
    #[serde(default)]
    pub participation: Participation,
    /// Higher ranks are paid first; equal ranks are pari passu.
    #[serde(default)]
    pub seniority: u32,
}

impl ShareClass {
    /// A 1x non-participating class at seniority 0.
    pub fn new(name: impl Into<String>, shares: u64, invested: f64) -> Self {
        Self {
            name: name.into(),
            shares,
            invested,
            multiple: 1.0,
            participation: Participation::NonParticipating,
            seniority: 0,
        }
    }

    pub fn with_multiple(mut self, multiple: f64) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_seniority(mut self, seniority: u32) -> Self {
        self.seniority = seniority;
        self
    }

    pub fn participating(mut self) -> Self {
        self.participation = Participation::Participating { cap: None };
        self
    }

    pub fn participating_capped(mut self, cap: f64) -> Self {
        self.participation = Participation::Participating { cap: Some(cap) };
        self
    }

    /// Amount owed before junior classes and common: `invested × multiple`.
    pub fn liquidation_preference(&self) -> f64 {
        self.invested * self.multiple
    }

    /// Maximum total payout under a participation cap.
    pub fn cap_amount(&self) -> Option<f64> {
        self.participation.cap().map(|c| c * self.invested)
    }

    /// Preference per as-converted share. Infinite for a class with no shares.
    pub fn preference_per_share(&self) -> f64 {
        if self.shares == 0 {
            return f64::INFINITY;
        }
        self.liquidation_preference() / self.shares as f64
    }

    /// Whether converting to common can ever pay this class more.
    ///
    /// Uncapped participating stock already receives everything common would,
    /// plus its preference, so it never converts.
    pub fn may_convert(&self) -> bool {
        match self.participation {
            Participation::NonParticipating => true,
            Participation::Participating { cap } => cap.is_some(),
        }
    }

    /// One-line description of the liquidation terms, e.g. "Series A: 1x Non-Participating".
    pub fn terms(&self) -> String {
        format!(
            "{}: {}x {}",
            self.name,
            self.multiple,
            self.participation.label()
        )
    }
}
