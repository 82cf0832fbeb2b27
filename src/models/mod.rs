pub mod job;
pub mod loaders;
pub mod work_item;

pub use job::{JobHandle, JobReport, JobResult, JobStatus};
pub use loaders::{list_work_items, read_document, InputListing};
pub use work_item::WorkItem;
