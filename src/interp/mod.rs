//! The execution engine's side of the debugger interface.

mod engine;
mod event;
mod frame;
mod value;

pub use engine::Engine;
pub use event::{Instruction, TraceEvent};
pub use frame::{CallStack, Frame};
pub use value::Value;
