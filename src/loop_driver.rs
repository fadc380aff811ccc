//! Fixed-timestep pacing.
//!
//! Real elapsed time is accumulated and paid out in whole simulation ticks,
//! so the game runs at the same speed whatever the presentation rate.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::config::LoopConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepPlan {
    pub ticks: u32,
    pub remaining_accumulator: Duration,
    pub dropped_backlog: Duration,
}

/// Spend as many `fixed_dt` steps from `accumulator` as allowed.  Anything
/// still owed past `max_ticks` is dropped rather than carried forward.
pub fn plan_steps(mut accumulator: Duration, fixed_dt: Duration, max_ticks: u32) -> StepPlan {
    let mut ticks = 0;
    while accumulator >= fixed_dt && ticks < max_ticks {
        accumulator -= fixed_dt;
        ticks += 1;
    }
    if accumulator >= fixed_dt {
        StepPlan {
            ticks,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

/// Accumulator state for one running loop.
#[derive(Debug)]
pub struct FixedTimestep {
    fixed_dt: Duration,
    frame_budget: Duration,
    max_frame_delta: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
    last: Instant,
}

impl FixedTimestep {
    pub fn new(config: &LoopConfig, now: Instant) -> Self {
        FixedTimestep {
            fixed_dt: Duration::from_secs_f64(1.0 / f64::from(config.tick_rate.max(1))),
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(config.render_fps.max(1))),
            max_frame_delta: Duration::from_millis(config.max_frame_delta_ms),
            max_ticks_per_frame: config.max_ticks_per_frame.max(1),
            accumulator: Duration::ZERO,
            last: now,
        }
    }

    pub fn fixed_dt(&self) -> Duration {
        self.fixed_dt
    }

    /// Account for the time since the previous call and return how many
    /// ticks to simulate now.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let frame_dt = now.saturating_duration_since(self.last).min(self.max_frame_delta);
        self.last = now;
        self.accumulator = self.accumulator.saturating_add(frame_dt);

        let plan = plan_steps(self.accumulator, self.fixed_dt, self.max_ticks_per_frame);
        self.accumulator = plan.remaining_accumulator;
        if plan.dropped_backlog > Duration::ZERO {
            warn!(
                dropped_ms = plan.dropped_backlog.as_millis() as u64,
                "simulation behind, dropping backlog"
            );
        }
        plan.ticks
    }

    /// How long to sleep so a frame that started at `frame_start` lasts at
    /// least one frame budget.
    pub fn sleep_for(&self, frame_start: Instant, now: Instant) -> Duration {
        self.frame_budget
            .saturating_sub(now.saturating_duration_since(frame_start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_spends_whole_steps_and_keeps_remainder() {
        let fixed_dt = Duration::from_millis(16);
        let plan = plan_steps(Duration::from_millis(50), fixed_dt, 5);
        assert_eq!(plan.ticks, 3);
        assert_eq!(plan.remaining_accumulator, Duration::from_millis(2));
        assert_eq!(plan.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_drops_backlog_beyond_cap() {
        let fixed_dt = Duration::from_millis(16);
        let plan = plan_steps(Duration::from_millis(120), fixed_dt, 3);
        assert_eq!(plan.ticks, 3);
        assert_eq!(plan.remaining_accumulator, Duration::ZERO);
        assert_eq!(plan.dropped_backlog, Duration::from_millis(72));
    }

    #[test]
    fn plan_with_less_than_one_step_runs_nothing() {
        let plan = plan_steps(Duration::from_millis(5), Duration::from_millis(16), 3);
        assert_eq!(plan.ticks, 0);
        assert_eq!(plan.remaining_accumulator, Duration::from_millis(5));
    }

    #[test]
    fn advance_pays_out_elapsed_time() {
        let config = LoopConfig::default();
        let start = Instant::now();
        let mut timestep = FixedTimestep::new(&config, start);
        assert_eq!(timestep.fixed_dt(), Duration::from_secs_f64(1.0 / 60.0));
        assert_eq!(timestep.advance(start + Duration::from_millis(10)), 0);
        // 10 ms carried over + 30 ms = 2 whole ticks.
        assert_eq!(timestep.advance(start + Duration::from_millis(40)), 2);
    }

    #[test]
    fn advance_caps_a_long_stall() {
        let config = LoopConfig::default();
        let start = Instant::now();
        let mut timestep = FixedTimestep::new(&config, start);
        assert_eq!(timestep.advance(start + Duration::from_secs(3)), 5);
        // The backlog was dropped, not deferred.
        assert_eq!(timestep.advance(start + Duration::from_millis(3001)), 0);
    }

    #[test]
    fn sleep_fills_the_frame_budget() {
        let config = LoopConfig::default();
        let start = Instant::now();
        let timestep = FixedTimestep::new(&config, start);
        let budget = Duration::from_secs_f64(1.0 / 30.0);
        assert_eq!(timestep.sleep_for(start, start), budget);
        assert_eq!(timestep.sleep_for(start, start + Duration::from_secs(1)), Duration::ZERO);
    }
}
