pub mod frame_scheduler;
pub mod scheduler;

pub use frame_scheduler::{FrameQueue, FrameRequest, FrameScheduler};
pub use scheduler::{AnimationScheduler, ProgressCounter, SchedulerState};
