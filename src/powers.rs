//! Per-player ledger of active buffs: power → absolute expiry (ms).

use std::collections::BTreeMap;

use crate::entities::PowerKind;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PowerLedger {
    expiries: BTreeMap<PowerKind, u64>,
}

impl PowerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expiry for `power`, replacing any earlier one.  Pickups never
    /// stack.
    pub fn grant(&mut self, power: PowerKind, expires_at: u64) {
        self.expiries.insert(power, expires_at);
    }

    /// A power is active strictly before its expiry timestamp.
    pub fn is_active(&self, power: PowerKind, now: u64) -> bool {
        self.expiries.get(&power).is_some_and(|&expiry| now < expiry)
    }

    pub fn expiry(&self, power: PowerKind) -> Option<u64> {
        self.expiries.get(&power).copied()
    }

    /// Drop every entry whose expiry is at or before `now`.  Returns the
    /// powers that lapsed.
    pub fn sweep(&mut self, now: u64) -> Vec<PowerKind> {
        let expired: Vec<PowerKind> = self
            .expiries
            .iter()
            .filter(|&(_, &expiry)| expiry <= now)
            .map(|(&power, _)| power)
            .collect();
        for power in &expired {
            self.expiries.remove(power);
        }
        expired
    }

    /// Whole seconds left on each active power, in ledger order.
    pub fn remaining_seconds(&self, now: u64) -> Vec<(PowerKind, u64)> {
        self.expiries
            .iter()
            .map(|(&power, &expiry)| (power, expiry.saturating_sub(now) / 1000))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }
}
