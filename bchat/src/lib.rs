//! History policy orchestration for the banter conversation toolkit.
//!
//! `bchat` decides, per call, whether the durable conversation history is
//! exposed to the outgoing request, while keeping durable-history semantics
//! intact either way. The connectivity probe is built on the same executor.

mod policy;
mod probe;

pub use policy::HistoryPolicy;
pub use probe::{probe, ProbeOutcome};
