use std::future::Future;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{LuckyDrawConfig, SpinSettings};
use crate::constants::{FULL_TURN, STATUS_BONUS_CLAIMED, STATUS_READY};
use crate::draw::draw_prize;
use crate::error::{ConfigError, DrawError, SpinError};
use crate::rotation::{plan_rotation_with_rng, RotationPlan};
use crate::shared_lucky_draw::{Prize, PrizeTable, SpinResult};
use crate::storage::{WinRecord, WinStore};

/// Counters for the current page session
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total_spins: u32,
    pub total_wins: u32,
    pub total_winnings: u64,
    pub has_won: bool,
}

impl SessionStats {
    /// Percentage of spins that won something, rounded.
    pub fn success_rate(&self) -> u32 {
        if self.total_spins == 0 {
            return 0;
        }
        (self.total_wins as f64 / self.total_spins as f64 * 100.0).round() as u32
    }

    pub fn status(&self) -> &'static str {
        if self.has_won {
            STATUS_BONUS_CLAIMED
        } else {
            STATUS_READY
        }
    }
}

/// Completion handler for a resolved spin.
///
/// Every spin counts. A win also bumps the winnings and overwrites the stored
/// win record; "Try Again" touches nothing else. A failed write is logged and
/// the counters are still returned, since persistence is best effort.
pub fn apply_spin_result<S>(
    mut session: SessionStats,
    result: &SpinResult,
    store: &mut S,
    now: DateTime<Utc>,
) -> SessionStats
where
    S: WinStore + ?Sized,
{
    session.total_spins += 1;

    if result.is_win() {
        session.total_wins += 1;
        session.total_winnings += result.amount;
        session.has_won = true;

        if let Err(e) = store.save(&WinRecord::from_result(result, now)) {
            log::warn!("Failed to persist win record for prize {}: {}", result.prize_id, e);
        }
    }

    session
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SpinPhase {
    Idle,
    Spinning,
    ShowingResult,
}

/// Everything a renderer needs to animate one spin
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpinPlan {
    pub result: SpinResult,
    pub segment_index: usize,
    pub rotation: RotationPlan,
}

/// Spin controller for one wheel.
///
/// Allows at most one spin at a time: a new spin is refused while one is in
/// flight, while a win is on screen, and for good once the bonus is claimed.
pub struct LuckyDraw<S> {
    table: PrizeTable,
    settings: SpinSettings,
    phase: SpinPhase,
    session: SessionStats,
    rotation: f64,
    last_result: Option<SpinResult>,
    store: S,
}

impl<S: WinStore> LuckyDraw<S> {
    pub fn new(config: &LuckyDrawConfig, store: S) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(config.prize_table()?, config.spin_settings()?, store))
    }

    pub fn from_parts(table: PrizeTable, settings: SpinSettings, store: S) -> Self {
        Self {
            table,
            settings,
            phase: SpinPhase::Idle,
            session: SessionStats::default(),
            rotation: 0.0,
            last_result: None,
            store,
        }
    }

    pub fn prizes(&self) -> &[Prize] {
        self.table.prizes()
    }

    pub fn table(&self) -> &PrizeTable {
        &self.table
    }

    pub fn settings(&self) -> &SpinSettings {
        &self.settings
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn session(&self) -> SessionStats {
        self.session
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn can_spin(&self) -> bool {
        self.phase == SpinPhase::Idle && !self.session.has_won
    }

    pub fn begin_spin(&mut self) -> Result<(), SpinError> {
        match self.phase {
            SpinPhase::Spinning => return Err(SpinError::AlreadySpinning),
            SpinPhase::ShowingResult => return Err(SpinError::ResultPending),
            SpinPhase::Idle => {}
        }
        if self.session.has_won {
            return Err(SpinError::BonusClaimed);
        }

        self.phase = SpinPhase::Spinning;
        self.last_result = None;
        Ok(())
    }

    /// Places a drawn result on the wheel and runs the completion handler.
    ///
    /// A result whose prize is not on the wheel aborts the spin: the wheel is
    /// left where it was and the controller goes back to idle.
    pub fn resolve_spin<R>(
        &mut self,
        result: SpinResult,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<SpinPlan, SpinError>
    where
        R: Rng + ?Sized,
    {
        if self.phase != SpinPhase::Spinning {
            return Err(SpinError::NotSpinning);
        }

        let Some(segment_index) = self.table.position(&result.prize_id) else {
            log::error!("Selected prize {} not found on the wheel", result.prize_id);
            self.phase = SpinPhase::Idle;
            return Err(SpinError::PrizeNotDisplayed(result.prize_id));
        };

        let landing = match plan_rotation_with_rng(
            segment_index,
            self.table.len(),
            self.settings.extra_spins.clone(),
            rng,
        ) {
            Ok(landing) => landing,
            Err(e) => {
                self.phase = SpinPhase::Idle;
                return Err(e.into());
            }
        };

        // Keep turning forward from wherever the wheel already is.
        let start = self.rotation;
        let base = (start / FULL_TURN).ceil().max(0.0) * FULL_TURN;
        let mut end = base + landing;
        while end <= start {
            end += FULL_TURN;
        }

        self.rotation = end;
        self.session = apply_spin_result(self.session, &result, &mut self.store, now);

        log::info!(
            "🎡 LUCKY DRAW: spin #{} landed on {} ({})",
            self.session.total_spins,
            result.label,
            if result.is_win() { "win" } else { "try again" }
        );

        self.last_result = Some(result.clone());
        Ok(SpinPlan {
            result,
            segment_index,
            rotation: RotationPlan {
                start,
                end,
                duration_ms: self.settings.spin_duration_ms,
            },
        })
    }

    /// The draw itself failed. Nothing was counted; the user can spin again.
    pub fn fail_spin(&mut self, error: &DrawError) {
        log::error!("Spin failed: {}", error);
        if self.phase == SpinPhase::Spinning {
            self.phase = SpinPhase::Idle;
        }
    }

    /// Called once the wheel animation has run its course.
    pub fn settle(&mut self) -> SpinPhase {
        if self.phase == SpinPhase::Spinning {
            self.phase = match &self.last_result {
                Some(result) if result.is_win() => SpinPhase::ShowingResult,
                _ => SpinPhase::Idle,
            };
        }
        self.phase
    }

    /// "Continue" on the result modal: hide it and bring the wheel back to rest.
    pub fn dismiss_result(&mut self) {
        if self.phase == SpinPhase::ShowingResult {
            self.phase = SpinPhase::Idle;
            self.last_result = None;
            self.rotation = 0.0;
        }
    }

    /// Whole spin for callers that own the controller for its duration.
    /// The wheel is not settled here; call [`LuckyDraw::settle`] after the animation.
    pub async fn spin<R, D>(
        &mut self,
        rng: &mut R,
        delay: D,
        now: DateTime<Utc>,
    ) -> Result<SpinPlan, SpinError>
    where
        R: Rng + ?Sized,
        D: Future<Output = ()>,
    {
        self.begin_spin()?;
        match draw_prize(self.table.prizes(), rng, delay).await {
            Ok(result) => self.resolve_spin(result, rng, now),
            Err(e) => {
                self.fail_spin(&e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::rotation::segment_under_pointer;
    use crate::shared_lucky_draw::{reference_prizes, Prize, REFERENCE_PRIZES};
    use crate::storage::InMemoryWinStore;
    use chrono::TimeZone;
    use futures::executor::block_on;
    use futures::future;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn controller() -> LuckyDraw<InMemoryWinStore> {
        LuckyDraw::new(&LuckyDrawConfig::default(), InMemoryWinStore::new()).unwrap()
    }

    fn try_again() -> SpinResult {
        SpinResult::from_prize(&REFERENCE_PRIZES[5])
    }

    fn jackpot() -> SpinResult {
        SpinResult::from_prize(&REFERENCE_PRIZES[4])
    }

    struct BrokenStore;

    impl WinStore for BrokenStore {
        fn save(&mut self, _record: &WinRecord) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }

        fn load(&self) -> Result<Option<WinRecord>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn clear(&mut self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_try_again_is_not_a_win() {
        let mut store = InMemoryWinStore::new();
        let session = apply_spin_result(SessionStats::default(), &try_again(), &mut store, now());

        assert_eq!(session.total_spins, 1);
        assert_eq!(session.total_wins, 0);
        assert_eq!(session.total_winnings, 0);
        assert!(!session.has_won);
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_win_is_counted_and_persisted() {
        let mut store = InMemoryWinStore::new();
        let session = apply_spin_result(SessionStats::default(), &jackpot(), &mut store, now());

        assert_eq!(session.total_spins, 1);
        assert_eq!(session.total_winnings, 419_000);
        assert!(session.has_won);
        assert_eq!(session.status(), STATUS_BONUS_CLAIMED);

        let record = store.load().unwrap().unwrap();
        assert_eq!(record.amount, 419_000);
        assert_eq!(record.label, "PHP 419,000");
        assert_eq!(record.timestamp, now());
    }

    #[test]
    fn test_storage_failure_keeps_counters() {
        let mut store = BrokenStore;
        let session = apply_spin_result(SessionStats::default(), &jackpot(), &mut store, now());
        assert_eq!(session.total_wins, 1);
        assert!(session.has_won);
    }

    #[test]
    fn test_success_rate() {
        let mut session = SessionStats::default();
        assert_eq!(session.success_rate(), 0);
        session.total_spins = 3;
        session.total_wins = 1;
        assert_eq!(session.success_rate(), 33);
        session.total_spins = 1;
        assert_eq!(session.success_rate(), 100);
    }

    #[test]
    fn test_second_spin_is_refused_while_pending() {
        let mut draw = controller();
        draw.begin_spin().unwrap();
        assert_eq!(draw.begin_spin(), Err(SpinError::AlreadySpinning));
        assert!(!draw.can_spin());
        assert_eq!(draw.session().total_spins, 0);
    }

    #[test]
    fn test_try_again_lands_and_returns_to_idle() {
        let mut draw = controller();
        let mut rng = StdRng::seed_from_u64(3);

        draw.begin_spin().unwrap();
        let plan = draw.resolve_spin(try_again(), &mut rng, now()).unwrap();

        assert_eq!(plan.segment_index, 5);
        assert_eq!(plan.rotation.start, 0.0);
        assert_eq!(plan.rotation.duration_ms, 3000);
        assert_eq!(segment_under_pointer(plan.rotation.end, 6), Some(5));
        assert_eq!(draw.phase(), SpinPhase::Spinning);

        assert_eq!(draw.settle(), SpinPhase::Idle);
        assert!(draw.can_spin());
        assert_eq!(draw.store().save_count(), 0);

        // The next spin keeps turning forward from the resting angle.
        draw.begin_spin().unwrap();
        let next = draw.resolve_spin(try_again(), &mut rng, now()).unwrap();
        assert_eq!(next.rotation.start, plan.rotation.end);
        assert!(next.rotation.end - next.rotation.start >= 5.0 * FULL_TURN);
        assert_eq!(segment_under_pointer(next.rotation.end, 6), Some(5));
        assert_eq!(draw.session().total_spins, 2);
    }

    #[test]
    fn test_zero_extra_turns_still_moves_forward() {
        let config = LuckyDrawConfig {
            min_extra_spins: 0,
            max_extra_spins: 0,
            ..LuckyDrawConfig::default()
        };
        let mut draw = LuckyDraw::new(&config, InMemoryWinStore::new()).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        draw.begin_spin().unwrap();
        let first = draw.resolve_spin(try_again(), &mut rng, now()).unwrap();
        assert_eq!(first.rotation.start, 0.0);
        assert!(first.rotation.end > first.rotation.start);
        assert_eq!(segment_under_pointer(first.rotation.end, 6), Some(5));
        assert_eq!(draw.settle(), SpinPhase::Idle);

        draw.begin_spin().unwrap();
        let second = draw.resolve_spin(try_again(), &mut rng, now()).unwrap();
        assert_eq!(second.rotation.start, first.rotation.end);
        assert!(second.rotation.end > second.rotation.start);
        assert_eq!(segment_under_pointer(second.rotation.end, 6), Some(5));
    }

    #[test]
    fn test_win_shows_result_then_locks_the_wheel() {
        let mut draw = controller();
        let mut rng = StdRng::seed_from_u64(9);

        draw.begin_spin().unwrap();
        let plan = draw.resolve_spin(jackpot(), &mut rng, now()).unwrap();
        assert_eq!(segment_under_pointer(plan.rotation.end, 6), Some(4));

        assert_eq!(draw.settle(), SpinPhase::ShowingResult);
        assert_eq!(draw.begin_spin(), Err(SpinError::ResultPending));

        draw.dismiss_result();
        assert_eq!(draw.phase(), SpinPhase::Idle);
        assert_eq!(draw.rotation(), 0.0);
        assert_eq!(draw.begin_spin(), Err(SpinError::BonusClaimed));
        assert_eq!(draw.store().save_count(), 1);
    }

    #[test]
    fn test_unknown_prize_aborts_spin() {
        let mut draw = controller();
        let mut rng = StdRng::seed_from_u64(1);
        let stray = SpinResult::from_prize(&Prize::new("99", "Ghost", 5, 1.0));

        draw.begin_spin().unwrap();
        assert_eq!(
            draw.resolve_spin(stray, &mut rng, now()),
            Err(SpinError::PrizeNotDisplayed("99".to_string()))
        );
        assert_eq!(draw.phase(), SpinPhase::Idle);
        assert_eq!(draw.rotation(), 0.0);
        assert_eq!(draw.session(), SessionStats::default());
        assert!(draw.begin_spin().is_ok());
    }

    #[test]
    fn test_resolve_without_begin_is_refused() {
        let mut draw = controller();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            draw.resolve_spin(try_again(), &mut rng, now()),
            Err(SpinError::NotSpinning)
        );
    }

    #[test]
    fn test_failed_draw_resets_to_idle() {
        let mut draw = controller();
        draw.begin_spin().unwrap();
        draw.fail_spin(&DrawError::EmptyPrizeTable);
        assert_eq!(draw.phase(), SpinPhase::Idle);
        assert!(draw.can_spin());
    }

    #[test]
    fn test_full_spin_until_bonus_claimed() {
        let mut draw = controller();
        let mut rng = StdRng::seed_from_u64(0xfeed);

        let mut spins = 0;
        loop {
            let plan = block_on(draw.spin(&mut rng, future::ready(()), now())).unwrap();
            spins += 1;
            assert_eq!(
                draw.prizes()[plan.segment_index].id,
                plan.result.prize_id
            );
            if plan.result.is_win() {
                break;
            }
            assert_eq!(draw.settle(), SpinPhase::Idle);
            assert!(spins < 1000);
        }

        let session = draw.session();
        assert_eq!(session.total_spins, spins);
        assert_eq!(session.total_wins, 1);
        assert!(session.has_won);
        assert_eq!(draw.settle(), SpinPhase::ShowingResult);
        assert_eq!(
            block_on(draw.spin(&mut rng, future::ready(()), now())),
            Err(SpinError::ResultPending)
        );
    }

    #[test]
    fn test_inactive_prizes_are_not_on_the_wheel() {
        let mut prizes = reference_prizes();
        prizes[0].is_active = false;
        let config = LuckyDrawConfig {
            prizes,
            ..LuckyDrawConfig::default()
        };
        let draw = LuckyDraw::new(&config, InMemoryWinStore::new()).unwrap();
        assert_eq!(draw.prizes().len(), 5);
        assert_eq!(draw.prizes()[0].id, "2");
    }
}
