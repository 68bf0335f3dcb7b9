mod common;

use common::*;
use ssa_debugger::debugger::{
    lookup_local, resolve, Breakpoints, Debugger, DebuggerConfig, Disposition, Flow,
    ResolveError, Resolved, SessionState, StepMode,
};
use ssa_debugger::interp::{CallStack, Frame, Instruction, TraceEvent, Value};
use ssa_debugger::ssa::{BuilderMode, Program, ScopeId};
use ssa_debugger::types::Span;
use std::io::Cursor;

// Helper: hello plus the nested-scope package, paused inside nest.f
fn nested_program() -> Program {
    let mut program = Program::new(BuilderMode::SANITY_CHECK_FUNCTIONS);
    program
        .create_packages(vec![hello_unit(), nested_unit()])
        .expect("no type errors");
    program
}

fn nested_stack(program: &Program, scope: u32) -> CallStack {
    let mut main = Frame::new(function(program, "main.main"));
    main.span = Span::at(pos("hello.go", 6, 2));
    let mut f = Frame::new(function(program, "nest.f"));
    f.params = vec![Value::Int(5)];
    f.locals = vec![Value::Int(1), Value::String("two".to_string()), Value::Int(3)];
    f.scope = Some(ScopeId(scope));
    f.span = Span::at(pos("nest.go", 9, 3));
    [main, f].into_iter().collect()
}

#[cfg(test)]
mod debugger_tests {
    use super::*;

    #[test]
    fn test_whatis_constant() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let t = commands(&program, &stack, &["whatis message"]);
        assert_eq!(
            t.output,
            "Constant message is a constant at:\n\thello.go:3:7-31\n\t\"Hello, World!\":untyped string\n"
        );
        assert_eq!(t.flows, vec![Flow::Continue]);
    }

    #[test]
    fn test_backtrace_marks_current_frame() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let t = commands(&program, &stack, &["bt"]);
        let lines: Vec<&str> = t.output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "=> #0 main.main() at hello.go:6:2",
                "   #1 main.init() at hello.go:1:1",
            ]
        );

        let t = commands(&program, &stack, &["up", "where 1"]);
        assert!(t.output.ends_with("   #0 main.main() at hello.go:6:2\n"));
    }

    #[test]
    fn test_quit_exit_codes() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let t = commands(&program, &stack, &["quit 3", "q", "exit x"]);
        assert_eq!(t.flows, vec![Flow::Quit(3), Flow::Quit(0), Flow::Continue]);
        assert!(t.output.starts_with("That's all folks...\nThat's all folks...\n"));
        assert!(t.output.contains("** Expecting integer return code; got x"));
    }

    #[test]
    fn test_unknown_command_keeps_session_paused() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let input = Cursor::new("zzz\nquit 0\n");
        let mut debugger = Debugger::new(&program, input, Vec::new(), DebuggerConfig::default());
        let mut engine = MockEngine::default();

        let disposition = debugger
            .trace_hook(&stack, &Instruction::default(), TraceEvent::StmtInList, &mut engine)
            .unwrap();

        assert_eq!(disposition, Disposition::Quit(0));
        assert_eq!(debugger.mode(), StepMode::Into);
        assert_eq!(debugger.state(), SessionState::Terminated);
        assert!(engine.directives.is_empty());
        let out = String::from_utf8(debugger.into_output()).unwrap();
        assert!(out.contains("dbg[1]: ** Unknown command zzz\ndbg[2]: "));
    }

    #[test]
    fn test_trace_hook_banner_and_resume() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let input = Cursor::new("\nnext\n");
        let mut debugger = Debugger::new(&program, input, Vec::new(), DebuggerConfig::default());
        let mut engine = MockEngine::default();

        let disposition = debugger
            .trace_hook(&stack, &Instruction::default(), TraceEvent::CallEnter, &mut engine)
            .unwrap();

        assert_eq!(disposition, Disposition::Resume(StepMode::Over { depth: 2 }));
        assert_eq!(debugger.mode(), StepMode::Over { depth: 2 });
        assert_eq!(debugger.state(), SessionState::Stepping(StepMode::Over { depth: 2 }));
        assert_eq!(debugger.last_event(), Some(TraceEvent::CallEnter));
        assert_eq!(engine.directives, vec!["over 2"]);

        let out = String::from_utf8(debugger.into_output()).unwrap();
        let expected = "->  main() block 0 insn 0\nhello.go:6:2\ndbg[1]: Empty line skipped\ndbg[2]: Step over...\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_end_of_input_quits() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let config = DebuggerConfig {
            terse: true,
            ..DebuggerConfig::default()
        };
        let mut debugger = Debugger::new(&program, Cursor::new(""), Vec::new(), config);
        let disposition = debugger
            .trace_hook(
                &stack,
                &Instruction::default(),
                TraceEvent::CallReturn,
                &mut MockEngine::default(),
            )
            .unwrap();
        assert_eq!(disposition, Disposition::Quit(0));
        let out = String::from_utf8(debugger.into_output()).unwrap();
        assert!(out.starts_with("<-  main()\nreturn void\nhello.go:6:2\n"));
    }

    #[test]
    fn test_up_down_and_boundaries() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);

        let t = commands(&program, &stack, &["up", "down"]);
        assert_eq!(t.cursor, 0);
        assert_eq!(
            t.output,
            "=> #1 main.init() at hello.go:1:1\n=> #0 main.main() at hello.go:6:2\n"
        );

        let t = commands(&program, &stack, &["down"]);
        assert_eq!(t.cursor, 0);
        assert_eq!(
            t.output,
            "** Frame number -1 out of range; must be between 0 and 1\n"
        );

        let t = commands(&program, &stack, &["up", "up"]);
        assert_eq!(t.cursor, 1);
        assert!(t.output.ends_with("** Frame number 2 out of range; must be between 0 and 1\n"));

        let t = commands(&program, &stack, &["frame 1", "frame 0", "frame -3", "frame x"]);
        assert_eq!(t.cursor, 0);
        assert!(t.output.contains("** Expecting integer frame number; got x"));
    }

    #[test]
    fn test_huge_frame_offsets_are_reported() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);

        let t = commands(&program, &stack, &["up", "up 9223372036854775807"]);
        assert_eq!(t.cursor, 1);
        assert!(t.output.ends_with(
            "** Frame number 9223372036854775807 out of range; must be between 0 and 1\n"
        ));

        let t = commands(&program, &stack, &["down -9223372036854775808"]);
        assert_eq!(t.cursor, 0);
        assert_eq!(
            t.output,
            "** Frame number 9223372036854775807 out of range; must be between 0 and 1\n"
        );
    }

    #[test]
    fn test_call_stack_depths() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        assert_eq!(stack.frame(0).unwrap().function, function(&program, "main.main"));
        assert_eq!(stack.caller(0).unwrap().function, function(&program, "main.init"));
        assert!(stack.caller(1).is_none());
    }

    #[test]
    fn test_nearest_scope_wins() {
        let program = nested_program();
        let f = program.function(function(&program, "nest.f")).unwrap();
        let pkg = program.package_by_name("nest").unwrap();

        assert_eq!(lookup_local(pkg, f, Some(ScopeId(2)), "a"), Some(1));
        assert_eq!(lookup_local(pkg, f, Some(ScopeId(1)), "a"), Some(0));
        assert_eq!(lookup_local(pkg, f, Some(ScopeId(2)), "b"), Some(2));
        assert_eq!(lookup_local(pkg, f, Some(ScopeId(1)), "b"), None);
        assert_eq!(lookup_local(pkg, f, None, "a"), Some(0));

        let inner = commands(&program, &nested_stack(&program, 2), &["locals a"]);
        assert_eq!(inner.output, "  1:\ta string = \"two\" scope 2 nest.go:8:3\n");
        let outer = commands(&program, &nested_stack(&program, 1), &["locals a"]);
        assert_eq!(outer.output, "  0:\ta int = 1 scope 1 nest.go:6:2\n");
        let missing = commands(&program, &nested_stack(&program, 1), &["locals b"]);
        assert_eq!(missing.output, "** No local variable b in the current scope\n");
    }

    #[test]
    fn test_resolution_order() {
        let program = nested_program();
        let f = program.function(function(&program, "nest.f")).unwrap();
        let scope = Some(ScopeId(2));

        assert!(matches!(
            resolve(&program, f, scope, "a"),
            Ok(Resolved::Local { slot: 1, .. })
        ));
        assert!(matches!(
            resolve(&program, f, scope, "x"),
            Ok(Resolved::Param { index: 0, .. })
        ));
        assert!(matches!(resolve(&program, f, scope, "g"), Ok(Resolved::Global { .. })));
        assert!(matches!(resolve(&program, f, scope, "f"), Ok(Resolved::Function(_))));
        assert!(matches!(resolve(&program, f, scope, "main"), Ok(Resolved::Package(_))));
        assert!(matches!(
            resolve(&program, f, scope, "main.message"),
            Ok(Resolved::Const { .. })
        ));
        assert_eq!(
            resolve(&program, f, scope, "nope").unwrap_err(),
            ResolveError::NotFound("nope".to_string())
        );
        assert_eq!(
            resolve(&program, f, scope, "main.nope").unwrap_err(),
            ResolveError::NotAMember {
                name: "nope".to_string(),
                package: "main".to_string()
            }
        );
    }

    #[test]
    fn test_dotted_local_is_unsupported() {
        let program = nested_program();
        let f = program.function(function(&program, "nest.f")).unwrap();
        assert_eq!(
            resolve(&program, f, Some(ScopeId(2)), "a.len").unwrap_err(),
            ResolveError::DottedLocal("a".to_string())
        );

        let t = commands(&program, &nested_stack(&program, 2), &["whatis a.len"]);
        assert_eq!(
            t.output,
            "** Sorry, dotted variable lookup for local a not supported yet\n"
        );
    }

    #[test]
    fn test_inspect_caller_after_up() {
        let program = nested_program();
        let stack = nested_stack(&program, 2);
        let t = commands(&program, &stack, &["whatis b", "up", "whatis b"]);
        let lines: Vec<&str> = t.output.lines().collect();
        assert_eq!(lines[0], "  2:\tb int = 3 scope 2 nest.go:9:3");
        assert_eq!(lines[1], "=> #1 main.main() at hello.go:6:2");
        assert_eq!(lines[2], "** Can't find name: b");
    }

    #[test]
    fn test_parameters_and_globals() {
        let program = nested_program();
        let stack = nested_stack(&program, 2);
        let mut engine = MockEngine::default();
        engine
            .globals
            .insert("example.com/nest.g".to_string(), Value::Pointer(Box::new(Value::Int(7))));

        let t = run_commands(
            &program,
            &stack,
            &mut engine,
            &mut Breakpoints::new(),
            &["params", "param y", "globals g", "gl", "globals zz", "whatis g"],
        );
        let lines: Vec<&str> = t.output.lines().collect();
        assert_eq!(lines[0], "x int 5");
        assert_eq!(lines[1], "** No parameter y in the current function");
        assert_eq!(lines[2], "g: 7");
        assert_eq!(lines[3], "example.com/nest.g: 7");
        assert_eq!(lines[4], "** No global variable zz");
        assert_eq!(lines[5], "g is a variable in package example.com/nest at:");
        assert_eq!(lines[6], "  nest.go:3:5-10");
        assert_eq!(lines[7], "  *int");
        assert_eq!(lines[8], "  7");
    }

    #[test]
    fn test_resolved_values() {
        let program = nested_program();
        let stack = nested_stack(&program, 2);
        let frame = stack.frame(0).unwrap();
        let f = program.function(frame.function).unwrap();
        let mut engine = MockEngine::default();
        engine
            .globals
            .insert("example.com/nest.g".to_string(), Value::Pointer(Box::new(Value::Int(7))));

        let value_of = |name: &str| {
            resolve(&program, f, frame.scope, name)
                .unwrap()
                .value(frame, &engine)
        };
        assert_eq!(value_of("a"), Some(Value::String("two".to_string())));
        assert_eq!(value_of("x"), Some(Value::Int(5)));
        assert_eq!(value_of("g"), Some(Value::Int(7)));
        assert_eq!(
            value_of("main.message"),
            Some(Value::String("Hello, World!".to_string()))
        );
        assert_eq!(value_of("f"), None);
        assert_eq!(value_of("main"), None);
    }

    #[test]
    fn test_whatis_function_and_package() {
        let program = nested_program();
        let stack = nested_stack(&program, 2);
        let t = commands(&program, &stack, &["whatis f", "whatis main"]);
        let lines: Vec<&str> = t.output.lines().collect();
        assert_eq!(lines[0], "nest.f is a function at:");
        assert_eq!(lines[1], "\tnest.go:5:6-11:2");
        assert_eq!(lines[2], "\tx int");
        assert!(lines.contains(&"Locals:"));
        assert!(lines.contains(&"\t(external)"));
        assert!(lines.contains(&"main is a package: at hello.go"));
        assert!(lines.contains(&"Members"));
        assert!(lines.iter().any(|l| l.contains("init$guard")));
    }

    #[test]
    fn test_stepping_commands_direct_engine() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let mut engine = MockEngine::default();
        let t = run_commands(
            &program,
            &stack,
            &mut engine,
            &mut Breakpoints::new(),
            &["s", "n", "fin", "c", "+"],
        );
        assert_eq!(
            t.flows,
            vec![
                Flow::Resume(StepMode::Into),
                Flow::Resume(StepMode::Over { depth: 2 }),
                Flow::Resume(StepMode::Out { depth: 2 }),
                Flow::Resume(StepMode::Run),
                Flow::Continue,
            ]
        );
        assert_eq!(engine.directives, vec!["into", "over 2", "out 2", "run"]);
        assert!(engine.tracing);
        assert_eq!(
            t.output,
            "Stepping...\nStep over...\nContinuing until return...\nContinuing...\nSetting Instruction Trace\n"
        );
    }

    #[test]
    fn test_suspension_predicates() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let mut deeper = stack.clone();
        deeper.push(Frame::new(function(&program, "main.main")));
        let mut debugger =
            Debugger::new(&program, std::io::empty(), Vec::<u8>::new(), DebuggerConfig::default());

        debugger.set_mode(StepMode::Into);
        assert!(debugger.should_suspend(TraceEvent::StepInstruction, &stack));

        debugger.set_mode(StepMode::Over { depth: 2 });
        assert!(debugger.should_suspend(TraceEvent::StmtInList, &stack));
        assert!(!debugger.should_suspend(TraceEvent::StepInstruction, &stack));
        assert!(!debugger.should_suspend(TraceEvent::StmtInList, &deeper));

        debugger.set_mode(StepMode::Out { depth: 2 });
        assert!(debugger.should_suspend(TraceEvent::CallReturn, &stack));
        assert!(!debugger.should_suspend(TraceEvent::CallReturn, &deeper));
        assert!(!debugger.should_suspend(TraceEvent::AssignStmt, &stack));

        debugger.set_mode(StepMode::Run);
        assert!(!debugger.should_suspend(TraceEvent::CallEnter, &stack));
        assert!(debugger.should_suspend(TraceEvent::Panic, &stack));
        assert!(debugger.should_suspend(TraceEvent::Breakpoint, &stack));

        debugger
            .breakpoints_mut()
            .add(function(&program, "main.main"), "main.main");
        assert!(debugger.should_suspend(TraceEvent::CallEnter, &stack));
        assert_eq!(debugger.breakpoints().iter().next().map(|b| b.hits), Some(1));
    }

    #[test]
    fn test_breakpoint_commands() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let mut breakpoints = Breakpoints::new();
        let t = run_commands(
            &program,
            &stack,
            &mut MockEngine::default(),
            &mut breakpoints,
            &["info break", "b main", "break message", "info breakpoints", "delete 1", "d 1"],
        );
        let lines: Vec<&str> = t.output.lines().collect();
        assert_eq!(lines[0], "No breakpoints set");
        assert_eq!(lines[1], "Breakpoint 1 set in function main.main");
        assert_eq!(lines[2], "** message is not a function");
        assert_eq!(lines[3], "Num Type          Disp Enb Where");
        assert_eq!(lines[4], "1   breakpoint    keep y   main.main (hit 0 times)");
        assert_eq!(lines[5], "Deleted breakpoint 1");
        assert_eq!(lines[6], "** No breakpoint number 1");
        assert!(breakpoints.is_empty());
    }

    #[test]
    fn test_argument_counts_and_abbreviations() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let t = commands(
            &program,
            &stack,
            &["whatis", "frame 1 2", "wha message", "   ", "f 0"],
        );
        let lines: Vec<&str> = t.output.lines().collect();
        assert_eq!(lines[0], "** Too few args; need at least 1, got 0");
        assert_eq!(lines[1], "** Too many args; need at most 1, got 2");
        assert_eq!(lines[2], "Constant message is a constant at:");
        assert_eq!(lines[5], "Empty line skipped");
        assert_eq!(lines[6], "** Ambiguous command f: could be finish, frame");
    }

    #[test]
    fn test_help() {
        let (program, _) = hello_program();
        let stack = hello_stack(&program);
        let t = commands(&program, &stack, &["help", "help bt"]);
        assert!(t.output.starts_with("List of commands:\nExecution running --\n  s: step in\n"));
        assert!(t.output.contains("Stack --\n"));
        assert!(t.output.contains("  q: quit\n"));
        assert!(t.output.contains("backtrace [*count*]"));
        assert!(t.output.contains("Aliases: bt, T, where"));
    }
}
