//! Drives the debugger from a recorded execution trace.

use super::load::LoadError;
use crate::debugger::{Debugger, Disposition};
use crate::interp::{CallStack, Engine, Frame, Instruction, TraceEvent, Value};
use crate::ssa::{FunctionId, Program, ScopeId};
use crate::types::Span;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::{BufRead, Write};

/// One frame as recorded by the interpreter; `function` is `pkg.name`
/// or, for methods, `(T).name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub function: String,
    #[serde(default)]
    pub locals: Vec<Value>,
    #[serde(default)]
    pub params: Vec<Value>,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    #[serde(default)]
    pub block: usize,
    #[serde(default)]
    pub pc: usize,
    #[serde(default)]
    pub scope: Option<u32>,
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub result: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub event: TraceEvent,
    #[serde(default)]
    pub instruction: Instruction,
    /// Outermost first.
    pub stack: Vec<RecordedFrame>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Package-level variables keyed by `path.name`.
    #[serde(default)]
    pub globals: BTreeMap<String, Value>,
    pub steps: Vec<TraceStep>,
}

/// An engine whose state is whatever the trace recorded.
#[derive(Debug, Default)]
pub struct ReplayEngine {
    globals: BTreeMap<String, Value>,
    env: Vec<(String, Value)>,
    tracing: bool,
}

impl ReplayEngine {
    pub fn new(globals: BTreeMap<String, Value>) -> Self {
        Self {
            globals,
            ..Self::default()
        }
    }
}

impl Engine for ReplayEngine {
    fn step_into(&mut self) {
        trace!("engine: step into");
    }

    fn step_over(&mut self, depth: usize) {
        trace!("engine: step over at depth {}", depth);
    }

    fn step_out(&mut self, depth: usize) {
        trace!("engine: step out to depth {}", depth);
    }

    fn run(&mut self) {
        trace!("engine: run");
    }

    fn set_instruction_tracing(&mut self, on: bool) {
        self.tracing = on;
    }

    fn global(&self, package: &str, name: &str) -> Option<Value> {
        self.globals.get(&format!("{}.{}", package, name)).cloned()
    }

    fn globals(&self) -> Vec<(String, Value)> {
        self.globals
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn env(&self) -> Vec<(String, Value)> {
        self.env.clone()
    }
}

fn find_function(program: &Program, name: &str) -> Option<FunctionId> {
    program.function_by_name(name).or_else(|| {
        program.all_packages().find_map(|pkg| {
            pkg.functions()
                .find(|(_, f)| program.qualified_name(f) == name)
                .map(|(id, _)| id)
        })
    })
}

fn rebuild_stack(program: &Program, recorded: &[RecordedFrame]) -> Result<CallStack, LoadError> {
    recorded
        .iter()
        .map(|r| {
            let function = find_function(program, &r.function)
                .ok_or_else(|| LoadError::UnknownFunction(r.function.clone()))?;
            Ok(Frame {
                function,
                locals: r.locals.clone(),
                params: r.params.clone(),
                aliases: r.aliases.clone(),
                block: r.block,
                pc: r.pc,
                scope: r.scope.map(ScopeId),
                span: r.span.clone(),
                result: r.result.clone(),
            })
        })
        .collect()
}

/// The innermost frame's bindings: parameters first, then locals by slot.
fn frame_env(program: &Program, stack: &CallStack) -> Vec<(String, Value)> {
    let Some(frame) = stack.top() else {
        return Vec::new();
    };
    let Some(function) = program.function(frame.function) else {
        return Vec::new();
    };
    let params = function
        .params()
        .iter()
        .zip(&frame.params)
        .map(|(p, v)| (p.name.clone(), v.clone()));
    let locals = function
        .locals()
        .iter()
        .zip(&frame.locals)
        .map(|(l, v)| (l.name.clone(), v.clone()));
    params.chain(locals).collect()
}

/// Feeds every recorded step through the debugger. Returns the exit code
/// when the user quits, `None` when the trace runs out.
pub fn run_replay<R: BufRead, W: Write>(
    program: &Program,
    trace: Trace,
    debugger: &mut Debugger<'_, R, W>,
) -> Result<Option<i32>, LoadError> {
    let mut engine = ReplayEngine::new(trace.globals);

    for (n, step) in trace.steps.iter().enumerate() {
        let stack = rebuild_stack(program, &step.stack)?;
        engine.env = frame_env(program, &stack);

        if engine.tracing && step.event == TraceEvent::StepInstruction {
            let instr = &step.instruction;
            writeln!(debugger.output_mut(), "{}.{}: {}", instr.block, instr.index, instr.text)?;
        }

        if !debugger.should_suspend(step.event, &stack) {
            continue;
        }
        debug!("step {} suspends on {:?}", n, step.event);
        match debugger.trace_hook(&stack, &step.instruction, step.event, &mut engine)? {
            Disposition::Resume(mode) => trace!("resuming in {:?}", mode),
            Disposition::Quit(code) => {
                info!("debugger quit with code {}", code);
                return Ok(Some(code));
            }
        }
    }

    info!("trace exhausted after {} steps", trace.steps.len());
    Ok(None)
}
