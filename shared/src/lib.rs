pub mod config;
pub mod constants;
pub mod draw;
pub mod error;
pub mod notice;
pub mod prize_selector;
pub mod rotation;
pub mod session;
pub mod shared_lucky_draw;
pub mod storage;
pub mod validation;

pub use config::{LuckyDrawConfig, SpinSettings};
pub use error::{ConfigError, DrawError, RotationError, SpinError, StorageError};
pub use session::{LuckyDraw, SessionStats, SpinPhase, SpinPlan};
pub use shared_lucky_draw::{Prize, PrizeTable, PrizeTier, SpinResult};
pub use storage::{InMemoryWinStore, WinRecord, WinStore};
