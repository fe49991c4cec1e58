use std::sync::atomic::{AtomicU64, Ordering};

/// Produces process-unique identifiers of the form `<prefix>-<n>`.
///
/// The counter is shared by every prefix, so ids stay unique even when two
/// calls land in the same clock tick.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier for `prefix`
    pub fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_ids_are_unique_in_tight_loop() {
        let ids = IdGenerator::new();
        let produced: HashSet<String> = (0..1000).map(|_| ids.next_id("msg")).collect();
        assert_eq!(produced.len(), 1000);
    }

    #[test]
    fn test_prefix_is_kept() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_id("session"), "session-1");
        assert_eq!(ids.next_id("msg"), "msg-2");
    }

    #[test]
    fn test_unique_across_threads() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..250).map(|_| ids.next_id("req")).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id));
            }
        }
        assert_eq!(all.len(), 1000);
    }
}
