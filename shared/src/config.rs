use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DRAW_DELAY_MS, MAX_EXTRA_SPINS, MIN_EXTRA_SPINS, SPIN_DURATION_MS, WIN_RECORD_KEY,
};
use crate::error::ConfigError;
use crate::shared_lucky_draw::{reference_prizes, Prize, PrizeTable};
use crate::validation::validate_extra_spins;

/// Page-level configuration. Every field is optional in JSON.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LuckyDrawConfig {
    pub prizes: Vec<Prize>,
    pub draw_delay_ms: u32,
    pub spin_duration_ms: u32,
    pub min_extra_spins: u32,
    pub max_extra_spins: u32,
    pub storage_key: String,
    pub reset_on_load: bool,
}

impl Default for LuckyDrawConfig {
    fn default() -> Self {
        Self {
            prizes: reference_prizes(),
            draw_delay_ms: DRAW_DELAY_MS,
            spin_duration_ms: SPIN_DURATION_MS,
            min_extra_spins: MIN_EXTRA_SPINS,
            max_extra_spins: MAX_EXTRA_SPINS,
            storage_key: WIN_RECORD_KEY.to_string(),
            reset_on_load: true,
        }
    }
}

/// Timing knobs the spin controller needs once the config is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSettings {
    pub draw_delay_ms: u32,
    pub spin_duration_ms: u32,
    pub extra_spins: RangeInclusive<u32>,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            draw_delay_ms: DRAW_DELAY_MS,
            spin_duration_ms: SPIN_DURATION_MS,
            extra_spins: MIN_EXTRA_SPINS..=MAX_EXTRA_SPINS,
        }
    }
}

impl LuckyDrawConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prize_table()?;
        self.spin_settings()?;
        Ok(())
    }

    pub fn prize_table(&self) -> Result<PrizeTable, ConfigError> {
        PrizeTable::new(self.prizes.clone())
    }

    pub fn spin_settings(&self) -> Result<SpinSettings, ConfigError> {
        if validate_extra_spins(self.min_extra_spins, self.max_extra_spins).is_err() {
            return Err(ConfigError::InvalidExtraSpins {
                min: self.min_extra_spins,
                max: self.max_extra_spins,
            });
        }
        if self.spin_duration_ms == 0 {
            return Err(ConfigError::ZeroSpinDuration);
        }
        Ok(SpinSettings {
            draw_delay_ms: self.draw_delay_ms,
            spin_duration_ms: self.spin_duration_ms,
            extra_spins: self.min_extra_spins..=self.max_extra_spins,
        })
    }
}
