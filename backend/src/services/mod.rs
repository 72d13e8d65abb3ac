pub mod cache;
pub mod clock;
pub mod feedback;
pub mod registry;
pub mod router;
pub mod scheduler;
pub mod simulator;
pub mod sweeper;

pub use cache::{AssetCache, CacheStorage, DirOrigin, Origin};
pub use clock::{Clock, ManualClock, SystemClock};
pub use feedback::{FeedbackClient, FeedbackOutbox};
pub use registry::InviteRegistry;
pub use router::Router;
pub use scheduler::{Scheduler, Task, TaskHandle};
pub use simulator::ResponseSimulator;
pub use sweeper::ExpirySweeper;
