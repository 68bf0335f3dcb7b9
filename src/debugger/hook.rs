use super::commands::{execute, Flow};
use super::context::Debugger;
use super::location::print_location;
use super::session::Session;
use super::stepping::{SessionState, StepMode};
use crate::interp::{CallStack, Engine, Instruction, TraceEvent};
use log::{debug, trace};
use std::io::{self, BufRead, Write};

/// How the engine should carry on after a suspension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Resume(StepMode),
    Quit(i32),
}

impl<'p, R: BufRead, W: Write> Debugger<'p, R, W> {
    /// Entry point from the engine at a suspension point. Shows where
    /// execution stopped, then reads and runs commands until one of them
    /// resumes or quits.
    pub fn trace_hook(
        &mut self,
        stack: &CallStack,
        instr: &Instruction,
        event: TraceEvent,
        engine: &mut dyn Engine,
    ) -> io::Result<Disposition> {
        trace!("suspended on {:?} at depth {}", event, stack.len());
        self.last_event = Some(event);
        self.state = SessionState::Paused;

        let Debugger {
            program,
            input,
            output,
            config,
            breakpoints,
            cmd_count,
            ..
        } = self;
        let mut session =
            Session::new(*program, stack, engine, output, breakpoints, config, event);
        print_location(&mut session, instr)?;

        let flow = loop {
            *cmd_count += 1;
            write!(session.out, "{}[{}]: ", session.config.prompt, cmd_count)?;
            session.out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("end of command input");
                session.msg(format_args!(""))?;
                break Flow::Quit(0);
            }
            match execute(&mut session, line.trim_end_matches(['\r', '\n']))? {
                Flow::Continue => continue,
                other => break other,
            }
        };

        match flow {
            Flow::Resume(mode) => {
                self.mode = mode;
                self.state = SessionState::Stepping(mode);
                Ok(Disposition::Resume(mode))
            }
            Flow::Quit(code) => {
                self.state = SessionState::Terminated;
                Ok(Disposition::Quit(code))
            }
            Flow::Continue => Ok(Disposition::Resume(self.mode)),
        }
    }
}
