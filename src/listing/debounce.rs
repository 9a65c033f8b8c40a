//! Quick-search debouncing.
//!
//! Each keystroke registers a new generation for its key and waits for the
//! configured delay. Only the call still holding the newest generation when
//! the delay elapses is allowed to fetch.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    generations: Mutex<HashMap<String, u64>>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generations: Mutex::new(HashMap::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits out the debounce window for `key`.
    ///
    /// Returns `true` when no newer call for the same key arrived meanwhile.
    pub async fn settle(&self, key: &str) -> bool {
        let ticket = {
            let mut generations = self.lock();
            let generation = generations.entry(key.to_string()).or_insert(0);
            *generation += 1;
            *generation
        };

        tokio::time::sleep(self.delay).await;

        let mut generations = self.lock();
        if generations.get(key) == Some(&ticket) {
            generations.remove(key);
            true
        } else {
            log::debug!("Search {key} generation {ticket} superseded");
            false
        }
    }

    /// Keys with a debounce window currently open.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
