use std::collections::HashSet;

use validator::{Validate, ValidationError};

use crate::error::ConfigError;
use crate::shared_lucky_draw::Prize;

pub fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(ValidationError::new("invalid_prize_weight"));
    }
    Ok(())
}

pub fn validate_extra_spins(min: u32, max: u32) -> Result<(), ValidationError> {
    if min > max {
        return Err(ValidationError::new("invalid_extra_spin_range"));
    }
    Ok(())
}

/// Checked once when the page's prize configuration is loaded. The selector
/// relies on this: it never sees an empty table or a non-positive total weight.
pub fn validate_prize_table(prizes: &[Prize]) -> Result<(), ConfigError> {
    if prizes.is_empty() {
        return Err(ConfigError::EmptyPrizeTable);
    }

    let mut seen = HashSet::new();
    for prize in prizes {
        prize.validate().map_err(|source| ConfigError::InvalidPrize {
            id: prize.id.clone(),
            source,
        })?;

        if validate_weight(prize.weight).is_err() {
            return Err(ConfigError::InvalidWeight {
                id: prize.id.clone(),
                weight: prize.weight,
            });
        }

        if !seen.insert(prize.id.as_str()) {
            return Err(ConfigError::DuplicatePrizeId(prize.id.clone()));
        }
    }

    if !prizes.iter().any(|p| p.is_active) {
        return Err(ConfigError::NoActivePrizes);
    }

    Ok(())
}
