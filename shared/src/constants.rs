pub const WIN_RECORD_KEY: &str = "wheelWinResult";

pub const DRAW_DELAY_MS: u32 = 2000;
pub const SPIN_DURATION_MS: u32 = 3000;
pub const MIN_EXTRA_SPINS: u32 = 6;
pub const MAX_EXTRA_SPINS: u32 = 10;

// The pointer sits at 12 o'clock; wedge 0 starts there.
pub const POINTER_ANGLE: f64 = -90.0;
pub const FULL_TURN: f64 = 360.0;

pub const CURRENCY_SYMBOL: &str = "₱";
pub const TRY_AGAIN_WHEEL_LABEL: &str = "TRY AGAIN";

pub const WIN_NOTICE_TITLE: &str = "🎉 Congratulations!";
pub const WIN_NOTICE_DESCRIPTION: &str = "Bonus is on its way to your Trading Account!";
pub const WIN_NOTICE_DURATION_MS: u32 = 8000;
pub const RETRY_NOTICE_TITLE: &str = "Try Again! 🎯";
pub const RETRY_NOTICE_DESCRIPTION: &str = "Better luck next time! You can spin again.";
pub const FAILURE_NOTICE_TITLE: &str = "Spin failed";
pub const FAILURE_NOTICE_DESCRIPTION: &str = "Something went wrong. Please try again.";

pub const STATUS_BONUS_CLAIMED: &str = "🏆 Bonus Claimed!";
pub const STATUS_READY: &str = "🎯 Ready to Spin";
