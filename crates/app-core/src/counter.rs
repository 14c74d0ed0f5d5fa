//! One-shot count-up animations for the numeric stats on the page.

use crate::constants::COUNTER_DURATION_MS;

/// How far outside the viewport an element may sit and still count as visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMargin {
    pub below: f64,
    pub above: f64,
}

/// Lenient check on first setup.
pub const INITIAL_MARGIN: ViewportMargin = ViewportMargin {
    below: 1000.0,
    above: 500.0,
};

/// Check used on scroll and resize.
pub const SCROLL_MARGIN: ViewportMargin = ViewportMargin {
    below: 500.0,
    above: 200.0,
};

#[inline]
pub fn near_viewport(rect_top: f64, rect_bottom: f64, viewport_height: f64, margin: ViewportMargin) -> bool {
    rect_top < viewport_height + margin.below && rect_bottom > -margin.above
}

/// Parse a `data-target` attribute the way the page authors expect:
/// leading whitespace, optional sign, then the leading run of digits.
/// Anything that does not yield a positive integer is `None`.
pub fn parse_target(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return None;
    }
    digits[..end].parse::<u64>().ok().filter(|v| *v > 0)
}

#[inline]
pub fn ease_out_quart(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(4)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterFrame {
    pub value: u64,
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterAnimation {
    pub start: u64,
    pub target: u64,
    pub duration_ms: f64,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        Self {
            start: 0,
            target,
            duration_ms: COUNTER_DURATION_MS,
        }
    }

    /// Displayed value `elapsed_ms` after the animation started.
    pub fn sample(&self, elapsed_ms: f64) -> CounterFrame {
        let progress = if self.duration_ms > 0.0 {
            (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if progress >= 1.0 {
            // land exactly on the target, never on a truncated float
            return CounterFrame {
                value: self.target,
                finished: true,
            };
        }
        let start = self.start as f64;
        let span = self.target as f64 - start;
        let value = (start + span * ease_out_quart(progress)).floor().max(0.0) as u64;
        CounterFrame {
            value,
            finished: false,
        }
    }
}

/// Per-element trigger state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CounterState {
    pub target: Option<u64>,
    pub triggered: bool,
}

impl CounterState {
    pub fn from_attr(raw: Option<&str>) -> Self {
        Self {
            target: raw.and_then(parse_target),
            triggered: false,
        }
    }

    /// Marks the counter as triggered before handing out its animation, so a
    /// second call (or re-entering the viewport) never restarts it.
    pub fn trigger(&mut self) -> Option<CounterAnimation> {
        if self.triggered {
            return None;
        }
        let target = self.target?;
        self.triggered = true;
        Some(CounterAnimation::new(target))
    }
}
