//! Contract between the runtime and the application driving it.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, MonitorArea, WindowCtx};
