use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ConfigError;
use crate::validation::validate_prize_table;

/// A single wedge on the wheel.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub label: String,
    pub amount: u64, // currency units, 0 means "Try Again"
    pub weight: f64, // relative probability mass
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Prize {
    pub fn new(id: &str, label: &str, amount: u64, weight: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            amount,
            weight,
            is_active: true,
        }
    }

    pub fn is_winning(&self) -> bool {
        self.amount > 0
    }
}

/// Outcome of one spin
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub amount: u64,
    pub label: String,
    pub can_spin_again: bool,
    pub prize_id: String,
}

impl SpinResult {
    pub fn from_prize(prize: &Prize) -> Self {
        Self {
            amount: prize.amount,
            label: prize.label.clone(),
            can_spin_again: prize.amount == 0,
            prize_id: prize.id.clone(),
        }
    }

    pub fn is_win(&self) -> bool {
        self.amount > 0
    }
}

/// Badge shown next to each prize in the prize pool list
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PrizeTier {
    High,
    Medium,
    Low,
    Retry,
    UltraRare,
}

impl PrizeTier {
    pub fn of(prize: &Prize) -> Self {
        if prize.weight >= 25.0 {
            Self::High
        } else if prize.weight >= 10.0 {
            Self::Medium
        } else if prize.weight >= 5.0 {
            Self::Low
        } else if prize.amount == 0 {
            Self::Retry
        } else {
            Self::UltraRare
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Retry => "Retry",
            Self::UltraRare => "Ultra Rare",
        }
    }
}

/// The validated set of prizes shown on the wheel. Only active prizes are kept,
/// in configuration order, which is also the wedge order.
#[derive(Debug, Clone, PartialEq)]
pub struct PrizeTable {
    prizes: Vec<Prize>,
}

impl PrizeTable {
    pub fn new(prizes: Vec<Prize>) -> Result<Self, ConfigError> {
        validate_prize_table(&prizes)?;
        Ok(Self {
            prizes: prizes.into_iter().filter(|p| p.is_active).collect(),
        })
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    pub fn position(&self, prize_id: &str) -> Option<usize> {
        self.prizes.iter().position(|p| p.id == prize_id)
    }

    pub fn get(&self, index: usize) -> Option<&Prize> {
        self.prizes.get(index)
    }

    pub fn total_weight(&self) -> f64 {
        self.prizes.iter().map(|p| p.weight).sum()
    }
}

pub static REFERENCE_PRIZES: Lazy<Vec<Prize>> = Lazy::new(|| {
    vec![
        Prize::new("1", "PHP 77,000", 77_000, 50.0),
        Prize::new("2", "PHP 176,000", 176_000, 25.0),
        Prize::new("3", "PHP 297,000", 297_000, 12.0),
        Prize::new("4", "PHP 387,000", 387_000, 8.0),
        Prize::new("5", "PHP 419,000", 419_000, 4.0),
        Prize::new("6", "Try Again", 0, 1.0),
    ]
});

pub fn reference_prizes() -> Vec<Prize> {
    REFERENCE_PRIZES.clone()
}
