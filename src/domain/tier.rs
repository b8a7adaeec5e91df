//! Threshold tier lookup shared by the commission and VIP bonus tables.

/// A row of a threshold table: it applies once the looked-up value reaches `threshold`.
pub trait Tiered {
    fn threshold(&self) -> u32;
}

/// Returns the tier with the highest threshold not exceeding `value`.
///
/// The lookup does not depend on the order of `tiers`. When several tiers share
/// the winning threshold, the one listed first is returned. `None` means no tier
/// qualifies and the caller contributes zero.
pub fn highest_qualifying<T: Tiered>(tiers: &[T], value: u32) -> Option<&T> {
    tiers
        .iter()
        .filter(|tier| tier.threshold() <= value)
        .fold(None, |best: Option<&T>, tier| match best {
            Some(current) if current.threshold() >= tier.threshold() => Some(current),
            _ => Some(tier),
        })
}
