//! Board events and presentation sinks.
//!
//! The engine reports everything observable as a `BoardEvent`. Rendering,
//! animation and network replication subscribe through a `PresentationSink`
//! and never feed back into the rules.
//!
//! ## Key Types
//!
//! - `BoardEvent`: a single observable change
//! - `PresentationSink`: receiver of events
//! - `EventLog` / `NullSink`: recording and discarding sinks

mod event;
mod sink;

pub use event::BoardEvent;
pub use sink::{EventLog, NullSink, PresentationSink};
