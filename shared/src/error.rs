use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("prize table is empty")]
    EmptyPrizeTable,
    #[error("prize table has no active prizes")]
    NoActivePrizes,
    #[error("prize {id} is invalid: {source}")]
    InvalidPrize {
        id: String,
        #[source]
        source: ValidationErrors,
    },
    #[error("prize {id} has weight {weight}, weights must be positive and finite")]
    InvalidWeight { id: String, weight: f64 },
    #[error("prize id {0} is used more than once")]
    DuplicatePrizeId(String),
    #[error("extra spin range {min}..={max} is invalid")]
    InvalidExtraSpins { min: u32, max: u32 },
    #[error("spin duration must be greater than zero")]
    ZeroSpinDuration,
    #[error("invalid lucky draw config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DrawError {
    #[error("no prizes to draw from")]
    EmptyPrizeTable,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RotationError {
    #[error("wheel has no segments")]
    NoSegments,
    #[error("segment {index} is outside a wheel of {count} segments")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("extra spin range {min}..={max} is empty")]
    EmptySpinRange { min: u32, max: u32 },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpinError {
    #[error("a spin is already in progress")]
    AlreadySpinning,
    #[error("the last result is still being shown")]
    ResultPending,
    #[error("the bonus has already been claimed")]
    BonusClaimed,
    #[error("no spin is in progress")]
    NotSpinning,
    #[error("drawn prize {0} is not on the wheel")]
    PrizeNotDisplayed(String),
    #[error(transparent)]
    Draw(#[from] DrawError),
    #[error(transparent)]
    Rotation(#[from] RotationError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("stored win record is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
