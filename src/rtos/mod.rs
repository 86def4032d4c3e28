//! Cooperative scheduling and software timers
pub mod scheduler;
pub mod sw_timer;

pub use scheduler::{Executive, Frame, Phase, Task, TaskBuilder};
pub use sw_timer::{TimerHandle, TimerPool};
