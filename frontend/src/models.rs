use serde::Serialize;
use shared::notice::{format_currency, wheel_label, Notice};
use shared::prize_selector::win_probabilities;
use shared::rotation::{wedge_arc, RotationPlan, WedgeArc};
use shared::{LuckyDraw, Prize, PrizeTier, SessionStats, SpinPhase, SpinPlan, SpinResult, WinStore};

// Shapes handed to the host page as JSON

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PrizeView {
    pub id: String,
    pub label: String,
    pub wheel_label: String,
    pub amount: u64,
    pub weight: f64,
    pub probability: f64,
    pub tier: &'static str,
    pub wedge: Option<WedgeArc>,
}

impl PrizeView {
    pub fn list(prizes: &[Prize]) -> Vec<PrizeView> {
        let probabilities = win_probabilities(prizes);
        prizes
            .iter()
            .enumerate()
            .map(|(index, prize)| PrizeView {
                id: prize.id.clone(),
                label: prize.label.clone(),
                wheel_label: wheel_label(prize),
                amount: prize.amount,
                weight: prize.weight,
                probability: probabilities.get(index).map(|(_, p)| *p).unwrap_or(0.0),
                tier: PrizeTier::of(prize).label(),
                wedge: wedge_arc(index, prizes.len()).ok(),
            })
            .collect()
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub total_spins: u32,
    pub total_wins: u32,
    pub total_winnings: u64,
    pub formatted_winnings: String,
    pub success_rate: u32,
    pub has_won: bool,
    pub status: &'static str,
}

impl From<SessionStats> for StatsView {
    fn from(stats: SessionStats) -> Self {
        Self {
            total_spins: stats.total_spins,
            total_wins: stats.total_wins,
            total_winnings: stats.total_winnings,
            formatted_winnings: format_currency(stats.total_winnings),
            success_rate: stats.success_rate(),
            has_won: stats.has_won,
            status: stats.status(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SpinView {
    pub result: SpinResult,
    pub segment_index: usize,
    pub rotation: RotationPlan,
    pub notice: Notice,
    pub stats: StatsView,
}

impl SpinView {
    pub fn new(plan: SpinPlan, stats: SessionStats) -> Self {
        Self {
            notice: Notice::for_result(&plan.result),
            result: plan.result,
            segment_index: plan.segment_index,
            rotation: plan.rotation,
            stats: stats.into(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FailureView {
    pub error: String,
    pub notice: Notice,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SettledView {
    pub phase: SpinPhase,
    pub result: Option<SpinResult>,
}

impl SettledView {
    /// Settles a spin in flight. `None` when there was nothing to settle.
    pub fn settle<S: WinStore>(draw: &mut LuckyDraw<S>) -> Option<SettledView> {
        if draw.phase() != SpinPhase::Spinning {
            return None;
        }
        let phase = draw.settle();
        Some(SettledView {
            phase,
            result: draw.last_result().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::shared_lucky_draw::{reference_prizes, REFERENCE_PRIZES};
    use shared::{InMemoryWinStore, LuckyDrawConfig};

    #[test]
    fn test_prize_list_view() {
        let views = PrizeView::list(&reference_prizes());
        assert_eq!(views.len(), 6);
        assert_eq!(views[0].wheel_label, "₱77,000");
        assert_eq!(views[0].tier, "High");
        assert_eq!(views[5].wheel_label, "TRY AGAIN");
        assert_eq!(views[5].tier, "Retry");
        assert!((views[0].probability - 50.0).abs() < 1e-9);
        assert!(views.iter().all(|v| v.wedge.is_some()));
    }

    #[test]
    fn test_stats_view() {
        let view = StatsView::from(SessionStats {
            total_spins: 2,
            total_wins: 1,
            total_winnings: 297_000,
            has_won: true,
        });
        assert_eq!(view.formatted_winnings, "₱297,000");
        assert_eq!(view.success_rate, 50);
        assert_eq!(view.status, "🏆 Bonus Claimed!");
    }

    #[test]
    fn test_settle_once_per_spin() {
        let mut draw =
            LuckyDraw::new(&LuckyDrawConfig::default(), InMemoryWinStore::new()).unwrap();
        assert!(SettledView::settle(&mut draw).is_none());

        let mut rng = StdRng::seed_from_u64(5);
        draw.begin_spin().unwrap();
        let result = SpinResult::from_prize(&REFERENCE_PRIZES[0]);
        draw.resolve_spin(result, &mut rng, Utc::now()).unwrap();

        let view = SettledView::settle(&mut draw).unwrap();
        assert_eq!(view.phase, SpinPhase::ShowingResult);
        assert_eq!(view.result.unwrap().amount, 77_000);

        // A later timer finds nothing left to settle.
        assert!(SettledView::settle(&mut draw).is_none());
        assert_eq!(draw.phase(), SpinPhase::ShowingResult);
    }
}
