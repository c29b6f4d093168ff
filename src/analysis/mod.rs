//! Contract analysis through the external webhook
//!
//! [`AnalysisSubmitter`] validates the input, posts an [`AnalysisRequest`]
//! and keeps the raw reply as the current [`AnalysisResult`]. Replies that
//! happen to be JSON objects can also be read as an [`AnalysisReport`].
//! [`demo_report`] makes up a clearly labelled placeholder report without
//! touching the network.

pub mod demo;
pub mod request;
pub mod result;
pub mod submitter;

pub use demo::{demo_report, DemoReport};
pub use request::{AnalysisRequest, ConnectionProbe, ANALYSIS_SOURCE, DEFAULT_FILE_NAME, PROBE_SOURCE};
pub use result::{AnalysisReport, AnalysisResult, RiskLevel};
pub use submitter::{AnalysisSubmitter, SubmissionPhase};
