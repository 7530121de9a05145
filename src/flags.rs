//! Switch storage used as one-shot activation latches
//!
//! The host owns the switch table. The core only reads the ids a rule binds
//! to and writes them when that rule matches. Id 0 means "no binding" and is
//! never touched.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Read/write access to global boolean switches
pub trait FlagStore {
    /// Current value of a switch; unknown ids read as off
    fn value(&self, id: u32) -> bool;

    /// Set a switch
    fn set_value(&mut self, id: u32, on: bool);
}

/// Plain in-memory switch table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchTable {
    values: HashMap<u32, bool>,
}

impl SwitchTable {
    /// Create an empty table (every switch off)
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn every switch off
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Ids of all switches currently on, sorted
    pub fn enabled(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .values
            .iter()
            .filter(|(_, &on)| on)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl FlagStore for SwitchTable {
    fn value(&self, id: u32) -> bool {
        id != 0 && self.values.get(&id).copied().unwrap_or(false)
    }

    fn set_value(&mut self, id: u32, on: bool) {
        if id == 0 {
            return;
        }
        self.values.insert(id, on);
    }
}

/// Cloneable handle to one switch table shared by the host and the core
#[derive(Debug, Clone, Default)]
pub struct SharedSwitches {
    inner: Arc<Mutex<SwitchTable>>,
}

impl SharedSwitches {
    /// Create a new shared table
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current table
    pub fn snapshot(&self) -> SwitchTable {
        self.inner.lock().clone()
    }
}

impl FlagStore for SharedSwitches {
    fn value(&self, id: u32) -> bool {
        self.inner.lock().value(id)
    }

    fn set_value(&mut self, id: u32, on: bool) {
        self.inner.lock().set_value(id, on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_switch_is_off() {
        let table = SwitchTable::new();
        assert!(!table.value(12));
    }

    #[test]
    fn test_switch_set_and_clear() {
        let mut table = SwitchTable::new();
        table.set_value(12, true);
        table.set_value(3, true);
        table.set_value(7, false);
        assert!(table.value(12));
        assert_eq!(table.enabled(), vec![3, 12]);

        table.clear();
        assert!(!table.value(12));
    }

    #[test]
    fn test_switch_zero_is_ignored() {
        let mut table = SwitchTable::new();
        table.set_value(0, true);
        assert!(!table.value(0));
        assert!(table.enabled().is_empty());
    }

    #[test]
    fn test_shared_switches_see_each_other() {
        let host_side = SharedSwitches::new();
        let mut core_side = host_side.clone();

        core_side.set_value(5, true);
        assert!(host_side.value(5));
        assert_eq!(host_side.snapshot().enabled(), vec![5]);
    }
}
