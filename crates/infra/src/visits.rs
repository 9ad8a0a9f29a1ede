use std::collections::HashMap;
use std::sync::Mutex;

use taxi_auth::PrincipalId;

/// Per-principal count of index page visits.
#[derive(Debug, Default)]
pub struct VisitCounter {
    inner: Mutex<HashMap<PrincipalId, u64>>,
}

impl VisitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one visit and return the new total (the first visit returns 1).
    pub fn record_visit(&self, principal: PrincipalId) -> u64 {
        let mut visits = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let count = visits.entry(principal).or_insert(0);
        *count += 1;
        *count
    }

    pub fn visits(&self, principal: PrincipalId) -> u64 {
        self.inner
            .lock()
            .map(|v| v.get(&principal).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_principal() {
        let counter = VisitCounter::new();
        let alice = PrincipalId::new();
        let bob = PrincipalId::new();

        assert_eq!(counter.visits(alice), 0);
        assert_eq!(counter.record_visit(alice), 1);
        assert_eq!(counter.record_visit(alice), 2);
        assert_eq!(counter.record_visit(bob), 1);
        assert_eq!(counter.visits(alice), 2);
    }
}
