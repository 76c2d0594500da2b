//! Sliding-window moving average, evaluated minute by minute.
//!
//! The engine walks whole-minute boundaries from the first event's ceiling
//! minute to the last event's, keeping the in-window events in a deque and
//! their target-field sum in a running accumulator. Admission and eviction
//! each touch every event once, so the whole series costs O(N log N),
//! dominated by the initial heap ordering.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Serialize, Serializer};

use glossa_core::{Error, Result, TargetField, TranslationEvent};

use crate::heap::EventQueue;

/// Rendered-date layout: whole seconds, no fraction.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One aggregate value per evaluated minute boundary. Serializes as
/// `{"date": "YYYY-MM-DD HH:MM:SS", "average": f64}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinuteAverage {
    #[serde(rename = "date", serialize_with = "minute_as_date")]
    pub minute: DateTime<Utc>,
    pub average: f64,
}

fn minute_as_date<S>(minute: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&minute.format(DATE_FORMAT))
}

/// Earliest whole-minute instant at or after `ts`; identity on an exact
/// minute boundary.
pub fn ceil_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    if ts.second() == 0 && ts.nanosecond() == 0 {
        return ts;
    }
    let floor = ts
        - Duration::seconds(i64::from(ts.second()))
        - Duration::nanoseconds(i64::from(ts.nanosecond()));
    floor + Duration::minutes(1)
}

/// Starts the moving-average engine over `queue`.
///
/// Fails with `EmptyInput` when the queue holds no events; a non-empty
/// queue yields at least one row. The returned series is lazy and pure:
/// re-running it over the same input reproduces it exactly.
pub fn moving_average(
    mut queue: EventQueue,
    window_size_minutes: u32,
    target: TargetField,
) -> Result<MinuteAverages> {
    if queue.is_empty() {
        return Err(Error::EmptyInput);
    }
    let first = queue.extract_min()?;
    let running_sum = target.value(&first);
    let current_minute = ceil_to_minute(first.timestamp);
    let mut logs_in_window = VecDeque::new();
    logs_in_window.push_back(first);
    Ok(MinuteAverages {
        queue,
        logs_in_window,
        running_sum,
        current_minute,
        window_size: Duration::minutes(i64::from(window_size_minutes)),
        target,
        done: false,
    })
}

/// Orders `events` through an `EventQueue`, then runs the engine. Input
/// order is immaterial.
pub fn moving_average_over<I>(
    events: I,
    window_size_minutes: u32,
    target: TargetField,
) -> Result<MinuteAverages>
where
    I: IntoIterator<Item = TranslationEvent>,
{
    moving_average(events.into_iter().collect(), window_size_minutes, target)
}

/// The lazy per-minute series. Owns the remaining queue and the window
/// state for exactly one run; nothing is shared or reused across runs.
#[derive(Debug)]
pub struct MinuteAverages {
    queue: EventQueue,
    logs_in_window: VecDeque<TranslationEvent>,
    running_sum: u64,
    current_minute: DateTime<Utc>,
    window_size: Duration,
    target: TargetField,
    done: bool,
}

impl Iterator for MinuteAverages {
    type Item = MinuteAverage;

    fn next(&mut self) -> Option<MinuteAverage> {
        if self.done {
            return None;
        }
        // Admit events due at or before this minute boundary. The heap
        // yields them in ascending order, so the deque stays sorted.
        while self
            .queue
            .peek()
            .map_or(false, |e| e.timestamp <= self.current_minute)
        {
            let event = match self.queue.extract_min() {
                Ok(event) => event,
                Err(_) => break,
            };
            self.running_sum += self.target.value(&event);
            self.logs_in_window.push_back(event);
        }
        // Evict events that slid out of the trailing window; only a front
        // prefix of the sorted deque ever needs inspection. An event sitting
        // exactly on the lower boundary stays in.
        let lower_boundary = self.current_minute - self.window_size;
        while self
            .logs_in_window
            .front()
            .map_or(false, |e| e.timestamp < lower_boundary)
        {
            if let Some(expired) = self.logs_in_window.pop_front() {
                self.running_sum -= self.target.value(&expired);
            }
        }
        let average = if self.logs_in_window.is_empty() {
            // Data gap wider than the window: nothing to average this minute.
            0.0
        } else {
            self.running_sum as f64 / self.logs_in_window.len() as f64
        };
        let row = MinuteAverage {
            minute: self.current_minute,
            average,
        };
        if self.queue.is_empty() {
            self.done = true;
        } else {
            self.current_minute = self.current_minute + Duration::minutes(1);
        }
        Some(row)
    }
}
