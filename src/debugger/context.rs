use super::breakpoints::Breakpoints;
use super::stepping::{SessionState, StepMode};
use crate::interp::{CallStack, TraceEvent};
use crate::ssa::Program;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebuggerConfig {
    /// Omit block/instruction coordinates except on instruction steps.
    pub terse: bool,
    pub prompt: String,
    /// Display width for columnized listings.
    pub width: usize,
    /// Suspend on the first event rather than running to a breakpoint.
    pub stop_on_entry: bool,
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            terse: false,
            prompt: "dbg".to_string(),
            width: 80,
            stop_on_entry: true,
        }
    }
}

/// Debugger state that outlives a single suspension.
pub struct Debugger<'p, R, W> {
    pub(crate) program: &'p Program,
    pub(crate) input: R,
    pub(crate) output: W,
    pub(crate) config: DebuggerConfig,
    pub(crate) breakpoints: Breakpoints,
    pub(crate) mode: StepMode,
    pub(crate) state: SessionState,
    pub(crate) cmd_count: usize,
    pub(crate) last_event: Option<TraceEvent>,
}

impl<'p, R, W> Debugger<'p, R, W> {
    pub fn new(program: &'p Program, input: R, output: W, config: DebuggerConfig) -> Self {
        let mode = if config.stop_on_entry {
            StepMode::Into
        } else {
            StepMode::Run
        };
        Self {
            program,
            input,
            output,
            config,
            breakpoints: Breakpoints::new(),
            mode,
            state: SessionState::Idle,
            cmd_count: 0,
            last_event: None,
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn config(&self) -> &DebuggerConfig {
        &self.config
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: StepMode) {
        self.mode = mode;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_event(&self) -> Option<TraceEvent> {
        self.last_event
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn breakpoints_mut(&mut self) -> &mut Breakpoints {
        &mut self.breakpoints
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Whether `event`, reported with `stack` live, should suspend
    /// execution under the current stepping mode.
    pub fn should_suspend(&mut self, event: TraceEvent, stack: &CallStack) -> bool {
        if matches!(event, TraceEvent::Breakpoint | TraceEvent::Panic) {
            return true;
        }
        if event == TraceEvent::CallEnter {
            if let Some(top) = stack.top() {
                if self.breakpoints.hit(top.function) {
                    return true;
                }
            }
        }
        match self.mode {
            StepMode::Into => true,
            StepMode::Over { depth } => event.is_statement_boundary() && stack.len() <= depth,
            StepMode::Out { depth } => event == TraceEvent::CallReturn && stack.len() <= depth,
            StepMode::Run => false,
        }
    }
}
