// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Trailing-edge debounce for free-text search input.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

/// Quiet period after the last keystroke before a search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds the latest value until no newer value has arrived for `delay`.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces the pending value and restarts the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// When the pending value becomes due, if there is one.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Takes the pending value if its quiet period has elapsed.
    pub fn take_due(&mut self) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= Instant::now() => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Waits for the next settled value from `rx`.
    ///
    /// Returns `None` once `rx` is closed and nothing is pending. A value
    /// still pending when the channel closes is delivered after its quiet
    /// period.
    pub async fn next(&mut self, rx: &mut mpsc::Receiver<T>) -> Option<T> {
        loop {
            if let Some(value) = self.take_due() {
                return Some(value);
            }
            match self.deadline() {
                Some(deadline) => {
                    tokio::select! {
                        received = rx.recv() => match received {
                            Some(value) => self.push(value),
                            None => {
                                sleep_until(deadline).await;
                                return self.pending.take().map(|(v, _)| v);
                            }
                        },
                        () = sleep_until(deadline) => {}
                    }
                }
                None => {
                    let value: T = rx.recv().await?;
                    self.push(value);
                }
            }
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_to_last_value() {
        let (tx, mut rx) = mpsc::channel::<String>(8);
        let mut debouncer: Debouncer<String> = Debouncer::default();
        let start: Instant = Instant::now();

        tokio::spawn(async move {
            for text in ["a", "ab", "abc"] {
                tx.send(text.to_string()).await.unwrap();
                tokio::time::sleep(Duration::from_millis(30)).await;
            }
        });

        let settled: Option<String> = debouncer.next(&mut rx).await;
        assert_eq!(settled.as_deref(), Some("abc"));
        assert!(Instant::now() - start >= Duration::from_millis(560));
        assert_eq!(debouncer.next(&mut rx).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let (tx, mut rx) = mpsc::channel::<u32>(8);
        let mut debouncer: Debouncer<u32> = Debouncer::new(Duration::from_millis(100));

        tokio::spawn(async move {
            tx.send(1).await.unwrap();
            tokio::time::sleep(Duration::from_millis(300)).await;
            tx.send(2).await.unwrap();
        });

        assert_eq!(debouncer.next(&mut rx).await, Some(1));
        assert_eq!(debouncer.next(&mut rx).await, Some(2));
        assert_eq!(debouncer.next(&mut rx).await, None);
    }

    #[test]
    fn test_nothing_due_without_push() {
        let mut debouncer: Debouncer<u8> = Debouncer::default();
        assert!(debouncer.deadline().is_none());
        assert!(debouncer.take_due().is_none());
    }
}
