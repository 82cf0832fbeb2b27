pub mod analysis_client;

pub use analysis_client::{AnalysisClient, SubmitResponse};
