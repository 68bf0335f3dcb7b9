mod load;
mod replay;

pub use load::{load_trace, load_units, LoadError};
pub use replay::{run_replay, RecordedFrame, ReplayEngine, Trace, TraceStep};
