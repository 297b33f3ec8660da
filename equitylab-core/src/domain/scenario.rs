use serde::{Deserialize, Serialize};

/// A named exit outcome: the total proceeds available to shareholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitScenario {
    pub name: String,
    pub proceeds: f64,
}

impl ExitScenario {
    pub fn new(name: impl Into<String>, proceeds: f64) -> Self {
        Self {
            name: name.into(),
            proceeds,
        }
    }

    /// Same scenario with proceeds scaled by `factor`, named "<name> ×<factor>".
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            name: format!("{} ×{factor}", self.name),
            proceeds: self.proceeds * factor,
        }
    }
}
