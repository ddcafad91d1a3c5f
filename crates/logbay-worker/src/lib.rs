//! Background parse pipeline: a bounded fire-and-forget job queue plus the
//! execution contract for turning staged log files into parsed artifacts.

pub mod context;
pub mod queue;

pub use context::{LogParser, ParseContext, PassthroughParser};
pub use queue::{ParseJob, ParseJobQueue, ParseQueueConfig};
