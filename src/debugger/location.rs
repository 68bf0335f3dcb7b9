use super::session::Session;
use crate::interp::{Frame, Instruction, TraceEvent, Value};
use crate::ssa::{Function, Program};
use std::io;

/// `name()` for functions, `(T).name()` for methods.
pub fn function_label(function: &Function) -> String {
    let name = function.name();
    match function.receiver() {
        Some(recv) => format!("({}).{}()", recv.ty, name),
        None if name.is_empty() => String::new(),
        None => format!("{}()", name),
    }
}

/// One backtrace line's worth of location for `frame`.
pub fn stack_location(program: &Program, frame: &Frame) -> String {
    match program.function(frame.function) {
        Some(f) => format!("{}() at {}", program.qualified_name(f), frame.span),
        None => format!("<unknown function> at {}", frame.span),
    }
}

/// Prints the banner shown each time execution suspends.
pub fn print_location(session: &mut Session<'_>, instr: &Instruction) -> io::Result<()> {
    let Some(frame) = session.top_frame() else {
        return session.msg(format_args!("{} <no frame>", session.event.icon()));
    };
    let program = session.program;
    let Some(function) = program.function(frame.function) else {
        return session.msg(format_args!("{} <unknown function>", session.event.icon()));
    };
    let event = session.event;

    let head = format!("{} {}", event.icon(), function_label(function));
    if session.config.terse && event != TraceEvent::StepInstruction {
        session.msg(format_args!("{}", head))?;
    } else {
        session.msg(format_args!("{} block {} insn {}", head, frame.block, frame.pc))?;
    }

    match event {
        TraceEvent::CallReturn => {
            let sig = function.signature();
            if !sig.has_results() {
                session.msg(format_args!("return void"))?;
            } else {
                session.msg(format_args!("return type: {}", sig.results_tuple()))?;
                let result = frame.result.clone().unwrap_or(Value::Nil);
                session.msg(format_args!("return value: {}", result.deref()))?;
            }
        }
        TraceEvent::CallEnter => {
            for (i, p) in function.params().iter().enumerate() {
                match frame.param(i) {
                    Some(v) => session.msg(format_args!("{} {}", p, v.deref()))?,
                    None => session.msg(format_args!("{} nil", p))?,
                }
            }
        }
        _ => {}
    }

    let span = if instr.span.is_known() {
        &instr.span
    } else {
        &frame.span
    };
    session.msg(format_args!("{}", span))
}
