//! Search-as-you-type debouncing with caller-supplied clocks

use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Holds the latest input until it has been quiet for the whole window.
///
/// Every `push` cancels the pending value and restarts the window. Time is passed in
/// rather than read, so callers and tests control the clock.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// The pending value once its window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(
            &self.pending,
            Some((_, since)) if now.saturating_duration_since(*since) >= self.window
        );
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// When the pending value becomes ready
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, since)| *since + self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_window() {
        let start = Instant::now();
        let mut d = Debouncer::default();
        d.push("cur", start);
        assert_eq!(d.poll(start + Duration::from_millis(249)), None);
        assert_eq!(d.poll(start + SEARCH_DEBOUNCE), Some("cur"));
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_keystroke_restarts_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(100));
        d.push("c", start);
        d.push("cu", start + Duration::from_millis(80));
        assert_eq!(d.poll(start + Duration::from_millis(150)), None);
        assert_eq!(d.deadline(), Some(start + Duration::from_millis(180)));
        assert_eq!(d.poll(start + Duration::from_millis(180)), Some("cu"));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut d = Debouncer::default();
        d.push(2, start);
        d.cancel();
        assert_eq!(d.poll(start + Duration::from_secs(1)), None);
    }
}
