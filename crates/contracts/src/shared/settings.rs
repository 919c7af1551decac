use serde::{Deserialize, Serialize};

/// Sales targets used for the achievement ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSettings {
    pub annual: f64,
    pub monthly: f64,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            annual: 60_000_000.0,
            monthly: 6_000_000.0,
        }
    }
}

impl TargetSettings {
    /// Monthly target when a month is selected, annual otherwise.
    pub fn target_for(&self, month: Option<u32>) -> f64 {
        if month.is_some() {
            self.monthly
        } else {
            self.annual
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_for_period() {
        let targets = TargetSettings {
            annual: 1200.0,
            monthly: 100.0,
        };
        assert_eq!(targets.target_for(Some(3)), 100.0);
        assert_eq!(targets.target_for(None), 1200.0);
    }
}
