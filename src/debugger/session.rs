use super::breakpoints::Breakpoints;
use super::context::DebuggerConfig;
use super::error::CommandError;
use crate::interp::{CallStack, Engine, Frame, TraceEvent};
use crate::ssa::{Function, Package, Program, ScopeId};
use std::fmt;
use std::io::{self, Write};

/// Everything a command handler may touch while execution is paused.
///
/// Lives for exactly one suspension; the frame references it holds are
/// released when the engine resumes.
pub struct Session<'a> {
    pub program: &'a Program,
    pub stack: &'a CallStack,
    pub engine: &'a mut dyn Engine,
    pub out: &'a mut dyn Write,
    pub breakpoints: &'a mut Breakpoints,
    pub config: &'a DebuggerConfig,
    pub event: TraceEvent,
    cursor: usize,
    scope: Option<ScopeId>,
}

impl<'a> Session<'a> {
    pub fn new(
        program: &'a Program,
        stack: &'a CallStack,
        engine: &'a mut dyn Engine,
        out: &'a mut dyn Write,
        breakpoints: &'a mut Breakpoints,
        config: &'a DebuggerConfig,
        event: TraceEvent,
    ) -> Self {
        let mut session = Self {
            program,
            stack,
            engine,
            out,
            breakpoints,
            config,
            event,
            cursor: 0,
            scope: None,
        };
        session.set_cursor(0);
        session
    }

    /// Depth of the selected frame; 0 is the innermost.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    pub fn top_frame(&self) -> Option<&'a Frame> {
        self.stack.top()
    }

    pub fn current_frame(&self) -> Option<&'a Frame> {
        self.stack.frame(self.cursor)
    }

    pub fn current_function(&self) -> Option<&'a Function> {
        self.current_frame()
            .and_then(|f| self.program.function(f.function))
    }

    pub fn current_package(&self) -> Option<&'a Package> {
        self.current_function()
            .and_then(|f| self.program.package(f.package()))
    }

    pub(crate) fn frame_and_function(&self) -> Result<(&'a Frame, &'a Function), CommandError> {
        let frame = self.current_frame().ok_or(CommandError::NoFrame)?;
        let function = self
            .program
            .function(frame.function)
            .ok_or(CommandError::NoFrame)?;
        Ok((frame, function))
    }

    /// Selects the frame at `depth` and makes its scope current.
    pub(crate) fn set_cursor(&mut self, depth: usize) {
        self.cursor = depth;
        self.scope = self.current_frame().and_then(|frame| {
            frame.scope.or_else(|| {
                self.program
                    .function(frame.function)
                    .and_then(Function::scope)
            })
        });
    }

    pub fn msg(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.out.write_fmt(args)?;
        self.out.write_all(b"\n")
    }

    pub fn errmsg(&mut self, err: &dyn fmt::Display) -> io::Result<()> {
        writeln!(self.out, "** {}", err)
    }

    pub fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "{}", title)
    }
}
