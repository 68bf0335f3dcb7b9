use crate::types::Span;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraceEvent {
    Other,
    AssignStmt,
    BlockEnd,
    BreakStmt,
    Breakpoint,
    CallEnter,
    CallReturn,
    DeferEnter,
    Expr,
    IfInit,
    IfCond,
    StepInstruction,
    ForInit,
    ForCond,
    ForIter,
    Main,
    Panic,
    RangeStmt,
    SelectType,
    SwitchCond,
    StmtInList,
}

impl TraceEvent {
    pub fn icon(self) -> &'static str {
        match self {
            TraceEvent::Other => "???",
            TraceEvent::AssignStmt => ":= ",
            TraceEvent::BlockEnd => "}  ",
            TraceEvent::BreakStmt => "<-X",
            TraceEvent::Breakpoint => "xxx",
            TraceEvent::CallEnter => "-> ",
            TraceEvent::CallReturn => "<- ",
            TraceEvent::DeferEnter => "d->",
            TraceEvent::Expr => "(.)",
            TraceEvent::IfInit => "if:",
            TraceEvent::IfCond => "if?",
            TraceEvent::StepInstruction => "...",
            TraceEvent::ForInit => "lo:",
            TraceEvent::ForCond => "lo?",
            TraceEvent::ForIter => "lo+",
            TraceEvent::Main => "m()",
            TraceEvent::Panic => "oX ",
            TraceEvent::RangeStmt => "...",
            TraceEvent::SelectType => "sel",
            TraceEvent::SwitchCond => "sw?",
            TraceEvent::StmtInList => "---",
        }
    }

    /// Whether step-over may stop here: every event but a bare instruction.
    pub fn is_statement_boundary(self) -> bool {
        self != TraceEvent::StepInstruction
    }
}

/// The instruction execution stopped at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub block: usize,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub span: Span,
}
