use std::io;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Can't find name: {0}")]
    NotFound(String),

    #[error("{name} is not a member of {package}")]
    NotAMember { name: String, package: String },

    #[error("Sorry, dotted variable lookup for local {0} not supported yet")]
    DottedLocal(String),
}

/// Everything a single command turn can report without ending the session.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command {0}")]
    UnknownCommand(String),

    #[error("Ambiguous command {input}: could be {}", .candidates.join(", "))]
    Ambiguous {
        input: String,
        candidates: Vec<&'static str>,
    },

    #[error("Too few args; need at least {min}, got {got}")]
    TooFewArgs { min: usize, got: usize },

    #[error("Too many args; need at most {max}, got {got}")]
    TooManyArgs { max: usize, got: usize },

    #[error("Expecting integer {what}; got {value}")]
    NotAnInteger { what: &'static str, value: String },

    #[error("Frame number {requested} out of range; must be between 0 and {max}")]
    FrameOutOfRange { requested: isize, max: usize },

    #[error("No frame selected")]
    NoFrame,

    #[error("No local variable {0} in the current scope")]
    NoSuchLocal(String),

    #[error("No parameter {0} in the current function")]
    NoSuchParam(String),

    #[error("No global variable {0}")]
    NoSuchGlobal(String),

    #[error("{0} is not a function")]
    NotAFunction(String),

    #[error("No breakpoint number {0}")]
    NoBreakpoint(usize),

    #[error("Unknown info subcommand {0}")]
    UnknownSubcommand(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
