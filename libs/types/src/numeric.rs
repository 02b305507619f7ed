//! Token quantities
//!
//! Amounts are whole token units held in a fixed-width unsigned integer.
//! There is no implicit scaling and no decimal rendering beyond the integer.

/// Whole-unit token quantity.
pub type Amount = u64;

/// The zero amount, used for every absent balance or allowance.
pub const ZERO: Amount = 0;

/// Add `value` to `balance`, returning `None` if the sum would wrap.
pub fn checked_credit(balance: Amount, value: Amount) -> Option<Amount> {
    balance.checked_add(value)
}

/// Subtract `value` from `balance`, returning `None` if it would underflow.
pub fn checked_debit(balance: Amount, value: Amount) -> Option<Amount> {
    balance.checked_sub(value)
}

/// Sum a sequence of amounts, returning `None` on overflow.
pub fn checked_sum<I>(amounts: I) -> Option<Amount>
where
    I: IntoIterator<Item = Amount>,
{
    amounts
        .into_iter()
        .try_fold(ZERO, |acc, amount| acc.checked_add(amount))
}
