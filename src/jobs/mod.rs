pub mod coordinator;
pub mod models;

pub use coordinator::{JobCoordinator, JobHandle};
pub use models::{DownloadJob, JobStatus};
