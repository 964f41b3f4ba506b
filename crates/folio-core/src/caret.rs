//! Blinking caret.

use std::time::Duration;

/// Default full on/off cycle.
pub const DEFAULT_CARET_PERIOD: Duration = Duration::from_millis(1000);

/// Caret visibility that alternates every half period.
///
/// Visible on reset. The owner calls [`toggle`](Self::toggle) each time
/// [`half_period`](Self::half_period) elapses.
#[derive(Debug, Clone)]
pub struct CaretBlink {
    period: Duration,
    visible: bool,
}

impl Default for CaretBlink {
    fn default() -> Self {
        Self::new(DEFAULT_CARET_PERIOD)
    }
}

impl CaretBlink {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            visible: true,
        }
    }

    /// Time between toggles. Zero disables blinking.
    pub fn half_period(&self) -> Duration {
        self.period / 2
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn reset(&mut self) {
        self.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_alternates() {
        let mut caret = CaretBlink::default();
        assert!(caret.is_visible());
        assert_eq!(caret.half_period(), Duration::from_millis(500));
        caret.toggle();
        assert!(!caret.is_visible());
        caret.toggle();
        assert!(caret.is_visible());
        caret.toggle();
        caret.reset();
        assert!(caret.is_visible());
    }
}
