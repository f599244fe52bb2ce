// File: crates/chart-core/src/grid.rs
// Summary: Tick layout helpers: nice linear steps and calendar-ish time steps.

use chrono::DateTime;

/// Tick count the axes aim for.
pub const DEFAULT_TICK_COUNT: usize = 10;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.0 * DAY;

const TIME_STEPS: [f64; 17] = [
    SECOND,
    5.0 * SECOND,
    15.0 * SECOND,
    30.0 * SECOND,
    MINUTE,
    5.0 * MINUTE,
    15.0 * MINUTE,
    30.0 * MINUTE,
    HOUR,
    3.0 * HOUR,
    6.0 * HOUR,
    12.0 * HOUR,
    DAY,
    2.0 * DAY,
    7.0 * DAY,
    30.0 * DAY,
    90.0 * DAY,
];

/// A tick in data space with its rendered label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Step of 1, 2 or 5 times a power of ten giving roughly `count` ticks over the span.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if span == 0.0 || !span.is_finite() || count == 0 {
        return 0.0;
    }
    let raw = span / count as f64;
    let mut step = 10f64.powf(raw.log10().floor());
    let err = raw / step;
    if err >= 50f64.sqrt() {
        step *= 10.0;
    } else if err >= 10f64.sqrt() {
        step *= 5.0;
    } else if err >= 2f64.sqrt() {
        step *= 2.0;
    }
    step
}

/// Multiples of the nice step inside `[start, stop]`.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<Tick> {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let step = tick_step(lo, hi, count);
    if step == 0.0 {
        return if lo.is_finite() { vec![Tick { value: lo, label: format_number(lo, 1.0) }] } else { Vec::new() };
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|i| {
            let value = i as f64 * step;
            Tick { value, label: format_number(value, step) }
        })
        .collect()
}

/// Ticks for a time domain given in epoch milliseconds.
pub fn time_ticks(start_ms: f64, stop_ms: f64, count: usize) -> Vec<Tick> {
    let (lo, hi) = if start_ms <= stop_ms { (start_ms, stop_ms) } else { (stop_ms, start_ms) };
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() || count == 0 {
        return Vec::new();
    }
    let target = span / count as f64;
    let step = TIME_STEPS
        .iter()
        .copied()
        .find(|s| *s >= target)
        .unwrap_or_else(|| tick_step(0.0, span / YEAR, count).max(1.0) * YEAR);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .filter_map(|i| {
            let value = i as f64 * step;
            format_time(value, step).map(|label| Tick { value, label })
        })
        .collect()
}

fn format_number(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 { (-step.log10().floor()).max(0.0) as usize } else { 0 };
    let s = format!("{value:.decimals$}");
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') { s.trim_start_matches('-').to_string() } else { s }
}

fn format_time(ms: f64, step: f64) -> Option<String> {
    let t = DateTime::from_timestamp_millis(ms as i64)?.naive_utc();
    let pattern = if step < MINUTE {
        "%H:%M:%S"
    } else if step < DAY {
        "%H:%M"
    } else if step < 30.0 * DAY {
        "%b %d"
    } else if step < YEAR {
        "%b %Y"
    } else {
        "%Y"
    };
    Some(t.format(pattern).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_steps() {
        assert_eq!(tick_step(0.0, 10.0, 10), 1.0);
        assert!((tick_step(0.0, 1.0, 10) - 0.1).abs() < 1e-12);
        assert_eq!(tick_step(0.0, 33.0, 10), 5.0);
        let ticks = linear_ticks(-1.1, 3.3, 10);
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("-1.0"));
        assert_eq!(ticks.last().map(|t| t.label.as_str()), Some("3.0"));
    }

    #[test]
    fn minute_span_uses_second_steps() {
        let ticks = time_ticks(0.0, 60_000.0, 10);
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[1].label, "00:00:15");
    }
}
