//! The interactive side: suspension policy, the command loop, stack
//! navigation and name inspection.

mod breakpoints;
mod commands;
mod context;
mod error;
mod hook;
mod inspect;
mod line;
mod location;
mod navigator;
mod resolver;
mod session;
mod stepping;

pub use breakpoints::{Breakpoint, Breakpoints};
pub use commands::{execute, lookup, Category, CommandInfo, Flow, COMMANDS};
pub use context::{Debugger, DebuggerConfig};
pub use error::{CommandError, ResolveError};
pub use hook::Disposition;
pub use inspect::{
    columnize, print_const_info, print_func_info, print_global_info, print_package_info,
    print_type_info, whatis_name,
};
pub use line::split_command_line;
pub use location::{function_label, print_location, stack_location};
pub use resolver::{lookup_local, resolve, Resolved};
pub use session::Session;
pub use stepping::{SessionState, StepMode};
