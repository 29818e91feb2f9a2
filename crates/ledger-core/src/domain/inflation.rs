//! # Inflation Estimator
//!
//! Exponentially-decaying moving averages of issuance rate, consumed by
//! the supply ledger while gating `issue`. Pure functions only: no I/O,
//! no clock access; the caller supplies elapsed seconds.
//!
//! The decay is a linear interpolation of the prior average toward zero
//! over a fixed window, clamped so that at or beyond the full window the
//! prior average contributes nothing. All intermediate arithmetic runs in
//! 128 bits to avoid overflow at the 62-bit amount range.

use super::errors::LedgerError;
use super::value_objects::Amount;

/// Fixed-point scale: parts per million.
pub const PPM: u64 = 1_000_000;

/// Decay window of the daily issuance average, in seconds.
pub const SECONDS_PER_DAY: u64 = 60 * 60 * 24;

/// Decay window of the yearly issuance average, in seconds.
pub const SECONDS_PER_YEAR: u64 = SECONDS_PER_DAY * 365;

/// Recomputes a decaying issuance average after `delta_secs` of quiet
/// followed by a new issuance.
///
/// `prior * (1 - min(delta/window, 1)) + issued`, in ppm fixed point.
pub fn decayed_average(
    delta_secs: u64,
    window_secs: u64,
    prior: &Amount,
    issued: &Amount,
) -> Result<Amount, LedgerError> {
    prior.require_same_symbol(issued)?;

    let travelled_ppm = (u128::from(delta_secs) * u128::from(PPM) / u128::from(window_secs))
        .min(u128::from(PPM));
    let remaining_ppm = u128::from(PPM) - travelled_ppm;

    // prior is range-checked, so the product fits comfortably in i128 and
    // the quotient shrinks back under the prior's magnitude.
    let carried = i128::from(prior.amount) * remaining_ppm as i128 / i128::from(PPM);
    let carried = Amount::new(carried as i64, issued.symbol.clone())?;
    carried.checked_add(issued)
}

/// Ratio of `part` to `whole` in parts per million, rounded toward zero.
/// Caller must guarantee `whole > 0`.
#[must_use]
pub fn ppm_ratio(part: i64, whole: i64) -> u64 {
    (i128::from(part) * i128::from(PPM) / i128::from(whole)) as u64
}
