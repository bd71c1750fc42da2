//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod control;
pub mod link;
pub mod ranger;

pub use control::{control_task, Drive, Steering};
pub use link::link_task;
pub use ranger::ranger_task;
