mod effective_sums;

use super::ValidatorEnvelope;
use crate::units::GweiNewtype;

pub use effective_sums::{get_effective_balance_sum, EffectiveBalanceSum};

// sum of the actual balance of every given validator, active or not
pub fn sum_balances<'a>(
    validators: impl IntoIterator<Item = &'a ValidatorEnvelope>,
) -> GweiNewtype {
    validators
        .into_iter()
        .map(|validator| validator.balance)
        .sum()
}
