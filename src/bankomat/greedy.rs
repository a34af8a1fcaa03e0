use crate::notes::{Denomination, NoteInventory, WithdrawalPlan};

/// Largest-note-first selection against `inventory`, which is left untouched.
///
/// Returns the remaining amount as error when the available notes cannot pay
/// `amount` exactly. Greedy selection may fail even when another split would succeed.
pub fn plan_withdrawal(inventory: &NoteInventory, amount: u64) -> Result<WithdrawalPlan, u64> {
    let mut remaining = amount;
    let mut plan = WithdrawalPlan::default();
    for denomination in Denomination::ALL {
        let face = u64::from(denomination.face_value());
        if remaining == 0 || face > remaining {
            continue;
        }
        let count = (remaining / face).min(u64::from(inventory.count(denomination)));
        remaining -= count * face;
        // count is bounded by a u32 inventory slot
        plan.push(denomination, count as u32);
    }
    if remaining == 0 {
        Ok(plan)
    } else {
        Err(remaining)
    }
}
