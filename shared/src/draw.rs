use std::future::Future;

use rand::Rng;

use crate::error::DrawError;
use crate::prize_selector::select_prize_by_weight;
use crate::shared_lucky_draw::{Prize, SpinResult};

/// Simulated draw: waits on `delay` once, then picks a prize.
///
/// The caller supplies the delay (a browser timer, or `future::ready(())` in
/// tests). The future resolves exactly once and cannot be cancelled part way.
pub async fn draw_prize<R, D>(prizes: &[Prize], rng: &mut R, delay: D) -> Result<SpinResult, DrawError>
where
    R: Rng + ?Sized,
    D: Future<Output = ()>,
{
    delay.await;
    let prize = select_prize_by_weight(prizes, rng).ok_or(DrawError::EmptyPrizeTable)?;
    log::debug!("drew prize {} ({})", prize.id, prize.label);
    Ok(SpinResult::from_prize(prize))
}
