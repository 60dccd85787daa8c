use rand::Rng;

use crate::shared_lucky_draw::Prize;

/// Weighted random pick. Each prize wins with probability `weight / total`.
///
/// Draws `r` uniformly from `[0, total)` and walks the prizes in order,
/// subtracting each weight until the remainder drops to zero or below. If
/// rounding leaves a positive remainder after the last prize, the last prize
/// is returned. Returns `None` only for an empty slice.
pub fn select_prize_by_weight<'a, R>(prizes: &'a [Prize], rng: &mut R) -> Option<&'a Prize>
where
    R: Rng + ?Sized,
{
    let last = prizes.last()?;
    let total_weight: f64 = prizes.iter().map(|p| p.weight).sum();
    let mut remaining = rng.gen::<f64>() * total_weight;

    for prize in prizes {
        remaining -= prize.weight;
        if remaining <= 0.0 {
            return Some(prize);
        }
    }

    Some(last)
}

/// Share of the total weight held by each prize, as a percentage.
pub fn win_probabilities(prizes: &[Prize]) -> Vec<(String, f64)> {
    let total_weight: f64 = prizes.iter().map(|p| p.weight).sum();
    if total_weight <= 0.0 {
        return Vec::new();
    }
    prizes
        .iter()
        .map(|p| (p.id.clone(), p.weight / total_weight * 100.0))
        .collect()
}
