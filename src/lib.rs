//! Symbol-table construction for an SSA program model, and an
//! interactive stepping debugger driven by the interpreter's trace hook.

pub mod debugger;
pub mod executor;
pub mod interp;
pub mod ssa;
pub mod types;
