use crate::{
    config::CounterConfig,
    error::{FxError, Result},
};

pub const TARGET_ATTRIBUTE: &str = "data-target";
/// Set once a counter has finished so a rebuilt controller leaves it alone.
pub const COUNTED_ATTRIBUTE: &str = "data-counted";

/// Quadratic ease-in-out over normalized progress.
pub fn ease_in_out_quad(p: f64) -> f64 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        -1.0 + (4.0 - 2.0 * p) * p
    }
}

/// `Math.round` semantics: halves round towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Empty or non-numeric text starts the count from zero.
pub fn parse_start(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_target(raw: Option<&str>) -> Result<f64> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or_else(|| FxError::InvalidAttribute {
            attribute: TARGET_ATTRIBUTE,
            value: raw.unwrap_or_default().to_string(),
        })
}

/// Counters already marked as done are not armed again.
pub fn already_counted(counted_attr: Option<&str>) -> bool {
    counted_attr.is_some()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub done: bool,
}

/// One-shot interpolation from the displayed value to the target.
#[derive(Clone, Copy, Debug)]
pub struct CounterAnimation {
    start: f64,
    target: f64,
    duration_ms: f64,
    started_at: f64,
}

impl CounterAnimation {
    pub fn new(start: f64, target: f64, config: &CounterConfig, started_at: f64) -> Self {
        Self {
            start,
            target,
            duration_ms: config.duration_ms,
            started_at,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn frame(&self, now: f64) -> CounterFrame {
        let p = self.progress(now);
        if p >= 1.0 {
            return CounterFrame {
                value: round_half_up(self.target),
                done: true,
            };
        }

        let value = self.start + (self.target - self.start) * ease_in_out_quad(p);
        CounterFrame {
            value: round_half_up(value),
            done: false,
        }
    }
}
