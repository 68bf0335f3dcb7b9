//! The command table and the single dispatch boundary.

use super::error::CommandError;
use super::inspect;
use super::line::split_command_line;
use super::navigator;
use super::session::Session;
use super::stepping::StepMode;
use std::io;

/// What the command loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Resume(StepMode),
    Quit(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Running,
    Data,
    Stack,
    Breakpoints,
    Support,
}

impl Category {
    const ALL: [Category; 5] = [
        Category::Running,
        Category::Data,
        Category::Stack,
        Category::Breakpoints,
        Category::Support,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::Running => "Execution running",
            Category::Data => "Variables",
            Category::Stack => "Stack",
            Category::Breakpoints => "Breakpoints",
            Category::Support => "Other",
        }
    }
}

type Handler = fn(&mut Session<'_>, &[String]) -> Result<Flow, CommandError>;

pub struct CommandInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: Category,
    pub min_args: usize,
    pub max_args: Option<usize>,
    pub summary: &'static str,
    pub help: &'static str,
    handler: Handler,
}

pub static COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "step",
        aliases: &["s"],
        category: Category::Running,
        min_args: 0,
        max_args: Some(0),
        summary: "step in",
        help: "step\n\nRun until the next instruction, entering calls.",
        handler: step,
    },
    CommandInfo {
        name: "next",
        aliases: &["n"],
        category: Category::Running,
        min_args: 0,
        max_args: Some(0),
        summary: "next or step over",
        help: "next\n\nRun to the next statement in this function or a caller, stepping over calls.",
        handler: next,
    },
    CommandInfo {
        name: "finish",
        aliases: &["fin"],
        category: Category::Running,
        min_args: 0,
        max_args: Some(0),
        summary: "finish or step out",
        help: "finish\n\nRun until the innermost function returns.",
        handler: finish,
    },
    CommandInfo {
        name: "continue",
        aliases: &["c"],
        category: Category::Running,
        min_args: 0,
        max_args: Some(0),
        summary: "continue",
        help: "continue\n\nRun until a breakpoint or panic.",
        handler: cont,
    },
    CommandInfo {
        name: "+",
        aliases: &[],
        category: Category::Running,
        min_args: 0,
        max_args: Some(0),
        summary: "add instruction tracing",
        help: "+\n\nTrace each instruction as it executes.",
        handler: trace_on,
    },
    CommandInfo {
        name: "-",
        aliases: &[],
        category: Category::Running,
        min_args: 0,
        max_args: Some(0),
        summary: "remove instruction tracing",
        help: "-\n\nStop tracing instructions.",
        handler: trace_off,
    },
    CommandInfo {
        name: "locals",
        aliases: &["local", "lo", "loc"],
        category: Category::Data,
        min_args: 0,
        max_args: Some(1),
        summary: "show local variable info",
        help: "locals [*name*]\n\nShow all locals of the selected frame, or the one named *name* visible from the current scope.",
        handler: inspect::locals,
    },
    CommandInfo {
        name: "globals",
        aliases: &["global", "gl"],
        category: Category::Data,
        min_args: 0,
        max_args: None,
        summary: "show global variable info",
        help: "globals [*name*...]\n\nShow all package-level variables, or the named ones. Names may be qualified as pkg.name.",
        handler: inspect::globals,
    },
    CommandInfo {
        name: "parameters",
        aliases: &["param", "params", "parameter"],
        category: Category::Data,
        min_args: 0,
        max_args: Some(1),
        summary: "show function parameter info",
        help: "parameters [*name*]\n\nShow the selected frame's parameters, or the one named *name*.",
        handler: inspect::parameters,
    },
    CommandInfo {
        name: "whatis",
        aliases: &["v"],
        category: Category::Data,
        min_args: 1,
        max_args: Some(1),
        summary: "describe a name",
        help: "whatis *name*\n\nDescribe what *name* refers to from the selected frame: a local, parameter, package member, or package. Use pkg.name for another package's member.",
        handler: inspect::whatis,
    },
    CommandInfo {
        name: "env",
        aliases: &[],
        category: Category::Data,
        min_args: 0,
        max_args: Some(0),
        summary: "show the innermost frame's environment",
        help: "env\n\nList the values bound in the innermost frame's environment.",
        handler: inspect::env,
    },
    CommandInfo {
        name: "backtrace",
        aliases: &["bt", "T", "where"],
        category: Category::Stack,
        min_args: 0,
        max_args: Some(1),
        summary: "print a backtrace",
        help: "backtrace [*count*]\n\nPrint the call stack, innermost first. The selected frame is marked with =>.",
        handler: navigator::backtrace,
    },
    CommandInfo {
        name: "frame",
        aliases: &[],
        category: Category::Stack,
        min_args: 1,
        max_args: Some(1),
        summary: "switch stack frame",
        help: "frame *num*\n\nSelect frame *num*; 0 is the innermost.",
        handler: navigator::frame,
    },
    CommandInfo {
        name: "up",
        aliases: &[],
        category: Category::Stack,
        min_args: 0,
        max_args: Some(1),
        summary: "switch to an older frame",
        help: "up [*num*]\n\nMove *num* frames (default 1) toward the outermost caller.",
        handler: navigator::up,
    },
    CommandInfo {
        name: "down",
        aliases: &[],
        category: Category::Stack,
        min_args: 0,
        max_args: Some(1),
        summary: "switch to a newer frame",
        help: "down [*num*]\n\nMove *num* frames (default 1) toward the innermost frame.",
        handler: navigator::down,
    },
    CommandInfo {
        name: "break",
        aliases: &["b"],
        category: Category::Breakpoints,
        min_args: 1,
        max_args: Some(1),
        summary: "set a breakpoint on function entry",
        help: "break *function*\n\nStop when *function* (or pkg.function) is entered.",
        handler: set_break,
    },
    CommandInfo {
        name: "delete",
        aliases: &["d"],
        category: Category::Breakpoints,
        min_args: 1,
        max_args: Some(1),
        summary: "delete a breakpoint",
        help: "delete *num*\n\nDelete breakpoint number *num*.",
        handler: delete_break,
    },
    CommandInfo {
        name: "info",
        aliases: &[],
        category: Category::Breakpoints,
        min_args: 1,
        max_args: Some(1),
        summary: "info breakpoints",
        help: "info breakpoints\n\nShow status of user-settable breakpoints.",
        handler: info,
    },
    CommandInfo {
        name: "help",
        aliases: &["h", "?"],
        category: Category::Support,
        min_args: 0,
        max_args: Some(1),
        summary: "this help",
        help: "help [*command*]\n\nList commands, or show help for one.",
        handler: help,
    },
    CommandInfo {
        name: "quit",
        aliases: &["q", "exit"],
        category: Category::Support,
        min_args: 0,
        max_args: Some(1),
        summary: "quit",
        help: "quit [*exit-code*]\n\nTerminate the program. The exit code defaults to 0.",
        handler: quit,
    },
];

/// Finds a command by name, alias, or unique prefix of a name.
pub fn lookup(word: &str) -> Result<&'static CommandInfo, CommandError> {
    if let Some(cmd) = COMMANDS
        .iter()
        .find(|c| c.name == word || c.aliases.contains(&word))
    {
        return Ok(cmd);
    }
    let candidates: Vec<&CommandInfo> = COMMANDS
        .iter()
        .filter(|c| c.name.starts_with(word))
        .collect();
    match candidates.as_slice() {
        [only] => Ok(only),
        [] => Err(CommandError::UnknownCommand(word.to_string())),
        many => Err(CommandError::Ambiguous {
            input: word.to_string(),
            candidates: many.iter().map(|c| c.name).collect(),
        }),
    }
}

fn check_arg_count(cmd: &CommandInfo, args: &[String]) -> Result<(), CommandError> {
    let got = args.len() - 1;
    if got < cmd.min_args {
        return Err(CommandError::TooFewArgs {
            min: cmd.min_args,
            got,
        });
    }
    match cmd.max_args {
        Some(max) if got > max => Err(CommandError::TooManyArgs { max, got }),
        _ => Ok(()),
    }
}

/// Runs one command line. Command errors are reported here and never
/// end the turn; only I/O failures on the session's output escape.
pub fn execute(session: &mut Session<'_>, line: &str) -> io::Result<Flow> {
    let args = split_command_line(line);
    if args.is_empty() {
        session.msg(format_args!("Empty line skipped"))?;
        return Ok(Flow::Continue);
    }
    let result = lookup(&args[0]).and_then(|cmd| {
        check_arg_count(cmd, &args)?;
        (cmd.handler)(session, &args)
    });
    match result {
        Ok(flow) => Ok(flow),
        Err(CommandError::Io(err)) => Err(err),
        Err(err) => {
            session.errmsg(&err)?;
            Ok(Flow::Continue)
        }
    }
}

fn step(s: &mut Session<'_>, _args: &[String]) -> Result<Flow, CommandError> {
    s.msg(format_args!("Stepping..."))?;
    s.engine.step_into();
    Ok(Flow::Resume(StepMode::Into))
}

fn next(s: &mut Session<'_>, _args: &[String]) -> Result<Flow, CommandError> {
    let depth = s.stack.len();
    s.msg(format_args!("Step over..."))?;
    s.engine.step_over(depth);
    Ok(Flow::Resume(StepMode::Over { depth }))
}

fn finish(s: &mut Session<'_>, _args: &[String]) -> Result<Flow, CommandError> {
    let depth = s.stack.len();
    s.msg(format_args!("Continuing until return..."))?;
    s.engine.step_out(depth);
    Ok(Flow::Resume(StepMode::Out { depth }))
}

fn cont(s: &mut Session<'_>, _args: &[String]) -> Result<Flow, CommandError> {
    s.msg(format_args!("Continuing..."))?;
    s.engine.run();
    Ok(Flow::Resume(StepMode::Run))
}

fn trace_on(s: &mut Session<'_>, _args: &[String]) -> Result<Flow, CommandError> {
    s.msg(format_args!("Setting Instruction Trace"))?;
    s.engine.set_instruction_tracing(true);
    Ok(Flow::Continue)
}

fn trace_off(s: &mut Session<'_>, _args: &[String]) -> Result<Flow, CommandError> {
    s.msg(format_args!("Clearing Instruction Trace"))?;
    s.engine.set_instruction_tracing(false);
    Ok(Flow::Continue)
}

fn quit(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let code = match args.get(1) {
        None => 0,
        Some(arg) => arg.parse::<i32>().map_err(|_| CommandError::NotAnInteger {
            what: "return code",
            value: arg.clone(),
        })?,
    };
    s.msg(format_args!("That's all folks..."))?;
    Ok(Flow::Quit(code))
}

fn help(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    if let Some(word) = args.get(1) {
        let cmd = lookup(word)?;
        s.msg(format_args!("{}", cmd.help))?;
        if !cmd.aliases.is_empty() {
            s.msg(format_args!("Aliases: {}", cmd.aliases.join(", ")))?;
        }
        return Ok(Flow::Continue);
    }

    s.msg(format_args!("List of commands:"))?;
    for category in Category::ALL {
        s.msg(format_args!("{} --", category.title()))?;
        for cmd in COMMANDS.iter().filter(|c| c.category == category) {
            let shortest = cmd
                .aliases
                .iter()
                .copied()
                .min_by_key(|a| a.len())
                .unwrap_or(cmd.name);
            s.msg(format_args!("  {}: {}", shortest, cmd.summary))?;
        }
        s.msg(format_args!(""))?;
    }
    Ok(Flow::Continue)
}

fn set_break(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let name = &args[1];
    let qualified = match name.contains('.') {
        true => name.clone(),
        false => {
            let pkg = s.current_package().ok_or(CommandError::NoFrame)?;
            format!("{}.{}", pkg.name(), name)
        }
    };
    let function = s
        .program
        .function_by_name(&qualified)
        .ok_or_else(|| CommandError::NotAFunction(name.clone()))?;
    let id = s.breakpoints.add(function, qualified.clone());
    s.msg(format_args!("Breakpoint {} set in function {}", id, qualified))?;
    Ok(Flow::Continue)
}

fn delete_break(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let id = args[1]
        .parse::<usize>()
        .map_err(|_| CommandError::NotAnInteger {
            what: "breakpoint number",
            value: args[1].clone(),
        })?;
    s.breakpoints
        .remove(id)
        .ok_or(CommandError::NoBreakpoint(id))?;
    s.msg(format_args!("Deleted breakpoint {}", id))?;
    Ok(Flow::Continue)
}

fn info(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let sub = &args[1];
    if sub.is_empty() || !"breakpoints".starts_with(sub.as_str()) {
        return Err(CommandError::UnknownSubcommand(sub.clone()));
    }
    if s.breakpoints.is_empty() {
        s.msg(format_args!("No breakpoints set"))?;
        return Ok(Flow::Continue);
    }
    s.section("Num Type          Disp Enb Where")?;
    let rows: Vec<String> = s
        .breakpoints
        .iter()
        .map(|b| {
            format!(
                "{:<3} {:<13} {:<4} {:<3} {} (hit {} times)",
                b.id,
                "breakpoint",
                "keep",
                if b.enabled { "y" } else { "n" },
                b.location,
                b.hits
            )
        })
        .collect();
    for row in rows {
        s.msg(format_args!("{}", row))?;
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_alias_and_prefix() {
        assert_eq!(lookup("s").map(|c| c.name).ok(), Some("step"));
        assert_eq!(lookup("where").map(|c| c.name).ok(), Some("backtrace"));
        assert_eq!(lookup("glob").map(|c| c.name).ok(), Some("globals"));
        assert_eq!(lookup("fr").map(|c| c.name).ok(), Some("frame"));
        assert!(matches!(lookup("zzz"), Err(CommandError::UnknownCommand(_))));
        assert!(matches!(lookup("f"), Err(CommandError::Ambiguous { .. })));
    }

    #[test]
    fn aliases_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for c in COMMANDS {
            assert!(seen.insert(c.name), "duplicate {}", c.name);
            for a in c.aliases {
                assert!(seen.insert(a), "duplicate {}", a);
            }
        }
    }
}
