use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::shared_lucky_draw::{Prize, SpinResult};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Text of the transient notification shown after a spin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
    pub duration_ms: Option<u32>,
}

impl Notice {
    pub fn for_result(result: &SpinResult) -> Self {
        if result.is_win() {
            Self {
                title: WIN_NOTICE_TITLE.to_string(),
                description: WIN_NOTICE_DESCRIPTION.to_string(),
                variant: NoticeVariant::Default,
                duration_ms: Some(WIN_NOTICE_DURATION_MS),
            }
        } else {
            Self {
                title: RETRY_NOTICE_TITLE.to_string(),
                description: RETRY_NOTICE_DESCRIPTION.to_string(),
                variant: NoticeVariant::Default,
                duration_ms: None,
            }
        }
    }

    pub fn for_failure(message: Option<&str>) -> Self {
        let description = match message {
            Some(msg) if !msg.trim().is_empty() => msg.to_string(),
            _ => FAILURE_NOTICE_DESCRIPTION.to_string(),
        };
        Self {
            title: FAILURE_NOTICE_TITLE.to_string(),
            description,
            variant: NoticeVariant::Destructive,
            duration_ms: None,
        }
    }
}

/// `77000` -> `₱77,000`
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", CURRENCY_SYMBOL, grouped)
}

/// Text drawn on the wedge itself
pub fn wheel_label(prize: &Prize) -> String {
    if prize.is_winning() {
        format_currency(prize.amount)
    } else {
        TRY_AGAIN_WHEEL_LABEL.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_lucky_draw::REFERENCE_PRIZES;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "₱0");
        assert_eq!(format_currency(999), "₱999");
        assert_eq!(format_currency(77_000), "₱77,000");
        assert_eq!(format_currency(1_234_567), "₱1,234,567");
    }

    #[test]
    fn test_wheel_labels() {
        assert_eq!(wheel_label(&REFERENCE_PRIZES[1]), "₱176,000");
        assert_eq!(wheel_label(&REFERENCE_PRIZES[5]), "TRY AGAIN");
    }

    #[test]
    fn test_notices() {
        let win = Notice::for_result(&SpinResult::from_prize(&REFERENCE_PRIZES[0]));
        assert_eq!(win.title, WIN_NOTICE_TITLE);
        assert_eq!(win.duration_ms, Some(8000));

        let retry = Notice::for_result(&SpinResult::from_prize(&REFERENCE_PRIZES[5]));
        assert_eq!(retry.title, RETRY_NOTICE_TITLE);
        assert_eq!(retry.variant, NoticeVariant::Default);

        let failure = Notice::for_failure(None);
        assert_eq!(failure.description, FAILURE_NOTICE_DESCRIPTION);
        assert_eq!(failure.variant, NoticeVariant::Destructive);
        assert_eq!(Notice::for_failure(Some("timer dropped")).description, "timer dropped");
        assert_eq!(Notice::for_failure(Some("  ")).description, FAILURE_NOTICE_DESCRIPTION);
    }
}
