use crate::beacon_chain::{BeaconNode, Slot, StateId};
use crate::units::GweiNewtype;
use anyhow::Result;
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectiveBalanceSum {
    pub state_id: StateId,
    pub sum: GweiNewtype,
    pub active_validators: usize,
}

// retrieve all validators from the beacon node for the given state
// then accumulate the effective_balance of the active ones
pub async fn get_effective_balance_sum(
    beacon_node: &impl BeaconNode,
    state_id: &StateId,
) -> Result<EffectiveBalanceSum> {
    let validators = beacon_node.get_validators_by_pub_key(state_id, &[]).await?;

    let (active_validators, sum) = validators
        .values()
        .filter(|validator| validator.is_active())
        .fold((0, GweiNewtype::ZERO), |(count, sum), validator| {
            (count + 1, sum + validator.effective_balance())
        });

    debug!(%state_id, active_validators, %sum, "summed effective balances");

    Ok(EffectiveBalanceSum {
        state_id: state_id.clone(),
        sum,
        active_validators,
    })
}

impl EffectiveBalanceSum {
    /// Slot the sum was taken at, when the state was addressed by slot.
    pub fn slot(&self) -> Option<Slot> {
        match self.state_id {
            StateId::Slot(slot) => Some(slot),
            _ => None,
        }
    }
}
