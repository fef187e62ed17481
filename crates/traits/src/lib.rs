pub mod dom;
pub mod memory;
pub mod scheduler;

pub use dom::{
    Dom, DomError, DomEvent, EventFlow, EventHandler, EventKind, ListenTarget, Rect,
    Subscription, Viewport,
};
pub use memory::{InMemoryDom, NodeId};
pub use scheduler::{FrameScheduler, FrameTask, ManualFrameScheduler};
