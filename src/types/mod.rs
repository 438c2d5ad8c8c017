//! Shared data structures for the complaint analysis pipeline
//!
//! - `ComplaintRecord` / `NewComplaint`: the durable unit of work
//! - `ComplaintStatus`: NEW → ANALYZED (RESOLVED is reserved for human follow-up)
//! - Stage payloads: request/response bodies exchanged with the AI service

mod complaint;
mod stages;

pub use complaint::*;
pub use stages::*;
