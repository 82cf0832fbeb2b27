pub mod job_orchestrator;
pub mod result_writer;

pub use job_orchestrator::{JobOrchestrator, PollPolicy};
pub use result_writer::{ensure_output_dir, write_json};
