//! Rule id generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rules::RuleId;

/// Source of fresh rule ids.
pub trait IdGenerator {
    /// Returns an id not previously returned by this generator, or
    /// `None` once the generator cannot produce fresh ids.
    fn next_id(&mut self) -> Option<RuleId>;
}

/// Random ids of the form `rule-<16 hex digits>`.
///
/// Seed it for reproducible ids in tests.
#[derive(Debug, Clone)]
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    /// Seeds from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Option<RuleId> {
        Some(RuleId::new(format!("rule-{:016x}", self.rng.random::<u64>())))
    }
}

/// Counter-based ids: `<prefix>1`, `<prefix>2`, ...
///
/// Stops after `<prefix>18446744073709551615` rather than wrapping.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: Option<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Some(1),
        }
    }

    /// Continues numbering after `last`.
    pub fn starting_after(mut self, last: u64) -> Self {
        self.next = last.checked_add(1);
        self
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Option<RuleId> {
        let n = self.next?;
        self.next = n.checked_add(1);
        Some(RuleId::new(format!("{}{}", self.prefix, n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_ids_are_distinct() {
        let mut ids = RandomIds::new();
        let generated: HashSet<RuleId> = (0..1000).filter_map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn test_seeded_ids_reproducible() {
        let a: Vec<RuleId> = {
            let mut ids = RandomIds::with_seed(42);
            (0..5).filter_map(|_| ids.next_id()).collect()
        };
        let b: Vec<RuleId> = {
            let mut ids = RandomIds::with_seed(42);
            (0..5).filter_map(|_| ids.next_id()).collect()
        };
        assert_eq!(a, b);
        assert!(a[0].as_str().starts_with("rule-"));
        assert_eq!(a[0].as_str().len(), "rule-".len() + 16);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("r").starting_after(9);
        assert_eq!(ids.next_id(), Some(RuleId::from("r10")));
        assert_eq!(ids.next_id(), Some(RuleId::from("r11")));
    }

    #[test]
    fn test_sequential_ids_stop_at_counter_end() {
        let mut ids = SequentialIds::new("r").starting_after(u64::MAX - 1);
        assert_eq!(ids.next_id(), Some(RuleId::new(format!("r{}", u64::MAX))));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);

        let mut spent = SequentialIds::new("r").starting_after(u64::MAX);
        assert_eq!(spent.next_id(), None);
    }
}
