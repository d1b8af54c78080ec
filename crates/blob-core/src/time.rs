//! Simulation time model.
//!
//! # Design
//!
//! Simulation time is a continuous count of simulated **hours** since the
//! world was created, held in `SimTime`.  It is decoupled from wall-clock
//! time by `TimeScaler`:
//!
//!   sim_delta_hours = min(real_delta, max_real_delta) * multiplier
//!
//! The cap keeps a single slow iteration (debugger pause, laptop sleep) from
//! injecting an enormous jump into the simulation.
//!
//! Calendar fields (hour, day, hour-of-day, day phase) are never stored; they
//! are derived from the elapsed hours by `SimClock`.

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation time in hours.
///
/// Totally ordered via `f64::total_cmp` so it can key a `BinaryHeap`.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn hours(self) -> f64 {
        self.0
    }

    /// The time `hours` after `self`.
    #[inline]
    pub fn after(self, hours: f64) -> SimTime {
        SimTime(self.0 + hours)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}h", self.0)
    }
}

// ── DayPhase ──────────────────────────────────────────────────────────────────

/// Coarse light phase of the simulated day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DayPhase {
    Day,
    Night,
}

impl DayPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            DayPhase::Day => "day",
            DayPhase::Night => "night",
        }
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks elapsed simulation hours and derives calendar fields from them.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Elapsed simulation time since world creation.
    now: SimTime,
    /// Hours in one simulated day.  Default: 10.
    hours_per_day: u32,
    /// Trailing fraction of each day that is night, in `[0, 1]`.
    night_fraction: f64,
}

impl SimClock {
    /// Create a clock at `t = 0`.
    ///
    /// `hours_per_day` is raised to at least 1 and `night_fraction` clamped to
    /// `[0, 1]`; `SimConfig::validate` rejects such values earlier.
    pub fn new(hours_per_day: u32, night_fraction: f64) -> Self {
        Self {
            now: SimTime::ZERO,
            hours_per_day: hours_per_day.max(1),
            night_fraction: night_fraction.clamp(0.0, 1.0),
        }
    }

    /// Advance by `delta_hours`.  Negative or NaN deltas are ignored so the
    /// clock is monotonically non-decreasing.
    #[inline]
    pub fn advance(&mut self, delta_hours: f64) {
        if delta_hours > 0.0 {
            self.now = self.now + delta_hours;
        }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    /// Whole hours elapsed: `floor(now)`.
    #[inline]
    pub fn hour(&self) -> u64 {
        self.now.0.max(0.0).floor() as u64
    }

    /// 1-based day number.
    #[inline]
    pub fn day(&self) -> u64 {
        self.hour() / self.hours_per_day as u64 + 1
    }

    /// 1-based hour within the current day, in `1..=hours_per_day`.
    #[inline]
    pub fn day_hour(&self) -> u64 {
        self.hour() % self.hours_per_day as u64 + 1
    }

    /// `Night` during the last `night_fraction` of each day.
    pub fn day_phase(&self) -> DayPhase {
        let day_length = self.hours_per_day as f64;
        if self.day_hour() as f64 > day_length * (1.0 - self.night_fraction) {
            DayPhase::Night
        } else {
            DayPhase::Day
        }
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (day {} hour {:02}, {})",
            self.now,
            self.day(),
            self.day_hour(),
            self.day_phase().as_str()
        )
    }
}

// ── TimeScaler ────────────────────────────────────────────────────────────────

/// Converts elapsed wall-clock time into a simulation-time delta.
#[derive(Clone, Copy, Debug)]
pub struct TimeScaler {
    /// Simulated hours per real second.
    pub multiplier: f64,
    /// Largest real delta honoured per tick.
    pub max_real_delta: Duration,
}

impl TimeScaler {
    pub fn new(multiplier: f64, max_real_delta: Duration) -> Self {
        Self { multiplier, max_real_delta }
    }

    /// Simulated hours corresponding to `real_delta`, after capping.
    #[inline]
    pub fn sim_delta(&self, real_delta: Duration) -> f64 {
        real_delta.min(self.max_real_delta).as_secs_f64() * self.multiplier
    }

    /// Upper bound of [`sim_delta`](Self::sim_delta) for any input.
    #[inline]
    pub fn max_sim_delta(&self) -> f64 {
        self.max_real_delta.as_secs_f64() * self.multiplier
    }
}
