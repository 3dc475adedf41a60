// src/animation/scheduler.rs
//
// Frame loop of the flow animation: keeps one frame request outstanding while
// running and throttles rendering to the target frame rate. The progress
// counter it owns is the only thing that changes from frame to frame.

use super::frame_scheduler::{FrameRequest, FrameScheduler};
use crate::error::{FlowError, Result};
use std::time::Duration;

/// Wrapping pixel offset of the flow row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressCounter {
    value: u32,
    modulus: u32,
}

impl ProgressCounter {
    pub fn new(modulus: u32) -> Self {
        Self {
            value: 0,
            modulus: modulus.max(1),
        }
    }

    pub fn advance(&mut self) -> u32 {
        self.value = (self.value + 1) % self.modulus;
        self.value
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug)]
pub struct AnimationScheduler {
    state: SchedulerState,
    interval: Duration,
    last_frame: Option<Duration>,
    pending: Option<FrameRequest>,
    progress: ProgressCounter,
}

impl AnimationScheduler {
    pub fn new(fps: f64, step_size: u32, flow_length: u32) -> Result<Self> {
        let cycle = step_size
            .checked_add(flow_length)
            .filter(|_| flow_length >= 1 && step_size >= 1)
            .ok_or(FlowError::InvalidFlowGeometry {
                flow_length,
                step_size,
            })?;
        Ok(Self {
            state: SchedulerState::Stopped,
            interval: frame_interval(fps)?,
            last_frame: None,
            pending: None,
            progress: ProgressCounter::new(cycle),
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn progress(&self) -> u32 {
        self.progress.value()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_fps(&mut self, fps: f64) -> Result<()> {
        self.interval = frame_interval(fps)?;
        tracing::debug!(fps, "flow frame rate changed");
        Ok(())
    }

    /// Starts the loop. The first tick afterwards always renders.
    pub fn start<F: FrameScheduler>(&mut self, frames: &mut F) {
        if self.is_running() {
            return;
        }
        self.state = SchedulerState::Running;
        self.last_frame = None;
        self.pending = Some(frames.request_frame());
        tracing::debug!("flow animation started");
    }

    pub fn stop<F: FrameScheduler>(&mut self, frames: &mut F) {
        if let Some(request) = self.pending.take() {
            frames.cancel_frame(request);
        }
        if self.is_running() {
            tracing::debug!(progress = self.progress.value(), "flow animation stopped");
        }
        self.state = SchedulerState::Stopped;
    }

    /// Handles a fired frame request. Requests the next frame and returns
    /// true when enough time has passed to render; the progress counter has
    /// already been advanced at that point.
    pub fn tick<F: FrameScheduler>(&mut self, now: Duration, frames: &mut F) -> bool {
        if !self.is_running() {
            return false;
        }
        if let Some(previous) = self.pending.replace(frames.request_frame()) {
            frames.cancel_frame(previous);
        }

        if let Some(last) = self.last_frame {
            if now.saturating_sub(last) < self.interval {
                return false;
            }
        }

        self.last_frame = Some(now);
        let progress = self.progress.advance();
        tracing::trace!(progress, "flow frame due");
        true
    }
}

fn frame_interval(fps: f64) -> Result<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(FlowError::InvalidFrameRate(fps));
    }
    Duration::try_from_secs_f64(1.0 / fps).map_err(|_| FlowError::InvalidFrameRate(fps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FrameQueue;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    mod progress_tests {
        use super::*;

        #[test]
        fn test_counter_wraps_after_full_cycle() {
            let mut counter = ProgressCounter::new(80);
            assert_eq!(counter.advance(), 1);
            for _ in 1..80 {
                counter.advance();
            }
            assert_eq!(counter.value(), 0);
        }

        #[test]
        fn test_reset() {
            let mut counter = ProgressCounter::new(5);
            counter.advance();
            counter.advance();
            counter.reset();
            assert_eq!(counter.value(), 0);
            assert_eq!(counter.modulus(), 5);
        }
    }

    mod scheduler_tests {
        use super::*;

        #[test]
        fn test_rejects_bad_configuration() {
            assert!(matches!(
                AnimationScheduler::new(0.0, 60, 20),
                Err(FlowError::InvalidFrameRate(_))
            ));
            assert!(matches!(
                AnimationScheduler::new(f64::NAN, 60, 20),
                Err(FlowError::InvalidFrameRate(_))
            ));
            assert!(matches!(
                AnimationScheduler::new(24.0, 60, 0),
                Err(FlowError::InvalidFlowGeometry { .. })
            ));
        }

        #[test]
        fn test_rejects_frame_rate_too_low_for_duration() {
            assert!(matches!(
                AnimationScheduler::new(1e-20, 60, 20),
                Err(FlowError::InvalidFrameRate(_))
            ));

            let mut scheduler = AnimationScheduler::new(24.0, 60, 20).unwrap();
            let before = scheduler.interval();
            assert!(matches!(
                scheduler.set_fps(1e-20),
                Err(FlowError::InvalidFrameRate(_))
            ));
            assert_eq!(scheduler.interval(), before);
        }

        #[test]
        fn test_rejects_cycle_overflowing_counter() {
            assert!(matches!(
                AnimationScheduler::new(24.0, u32::MAX, 20),
                Err(FlowError::InvalidFlowGeometry {
                    flow_length: 20,
                    step_size: u32::MAX
                })
            ));
            let scheduler = AnimationScheduler::new(24.0, u32::MAX - 20, 20).unwrap();
            assert_eq!(scheduler.progress.modulus(), u32::MAX);
        }

        #[test]
        fn test_first_tick_renders_then_throttles() {
            let mut frames = FrameQueue::new();
            let mut scheduler = AnimationScheduler::new(10.0, 60, 20).unwrap();
            scheduler.start(&mut frames);

            assert!(scheduler.tick(ms(5000), &mut frames));
            assert_eq!(scheduler.progress(), 1);
            assert!(!scheduler.tick(ms(5050), &mut frames));
            assert!(scheduler.tick(ms(5100), &mut frames));
            assert_eq!(scheduler.progress(), 2);
        }

        #[test]
        fn test_every_tick_requests_next_frame() {
            let mut frames = FrameQueue::new();
            let mut scheduler = AnimationScheduler::new(10.0, 60, 20).unwrap();
            scheduler.start(&mut frames);

            for step in 0..5 {
                let request = frames.take_due();
                assert!(request.is_some());
                scheduler.tick(ms(step * 10), &mut frames);
            }
            assert_eq!(frames.pending(), 1);
        }

        #[test]
        fn test_progress_returns_to_start_after_cycle() {
            let mut frames = FrameQueue::new();
            let mut scheduler = AnimationScheduler::new(1000.0, 3, 2).unwrap();
            scheduler.start(&mut frames);

            for step in 0..5 {
                assert!(scheduler.tick(ms(step * 10), &mut frames));
            }
            assert_eq!(scheduler.progress(), 0);
        }

        #[test]
        fn test_stop_cancels_and_ignores_ticks() {
            let mut frames = FrameQueue::new();
            let mut scheduler = AnimationScheduler::new(24.0, 60, 20).unwrap();
            scheduler.start(&mut frames);
            scheduler.stop(&mut frames);

            assert_eq!(scheduler.state(), SchedulerState::Stopped);
            assert!(frames.is_idle());
            assert!(!scheduler.tick(ms(1000), &mut frames));
            assert!(frames.is_idle());
            assert_eq!(scheduler.progress(), 0);
        }

        #[test]
        fn test_restart_renders_immediately() {
            let mut frames = FrameQueue::new();
            let mut scheduler = AnimationScheduler::new(1.0, 60, 20).unwrap();
            scheduler.start(&mut frames);
            assert!(scheduler.tick(ms(100), &mut frames));

            scheduler.stop(&mut frames);
            scheduler.start(&mut frames);
            assert!(scheduler.tick(ms(200), &mut frames));
            assert_eq!(scheduler.progress(), 2);
        }

        #[test]
        fn test_tick_before_delivery_replaces_request() {
            let mut frames = FrameQueue::new();
            let mut scheduler = AnimationScheduler::new(24.0, 60, 20).unwrap();
            scheduler.start(&mut frames);

            // the host ticks without draining the queue first
            assert!(scheduler.tick(ms(0), &mut frames));
            assert!(!scheduler.tick(ms(5), &mut frames));
            assert_eq!(frames.pending(), 1);

            scheduler.stop(&mut frames);
            assert!(frames.is_idle());
            assert_eq!(frames.cancelled(), 3);
        }

        #[test]
        fn test_start_twice_keeps_one_request() {
            let mut frames = FrameQueue::new();
            let mut scheduler = AnimationScheduler::new(24.0, 60, 20).unwrap();
            scheduler.start(&mut frames);
            scheduler.start(&mut frames);
            assert_eq!(frames.pending(), 1);
        }

        #[test]
        fn test_set_fps_changes_interval() {
            let mut scheduler = AnimationScheduler::new(24.0, 60, 20).unwrap();
            scheduler.set_fps(10.0).unwrap();
            assert_eq!(scheduler.interval(), ms(100));
            assert!(scheduler.set_fps(-1.0).is_err());
            assert_eq!(scheduler.interval(), ms(100));
        }
    }
}
