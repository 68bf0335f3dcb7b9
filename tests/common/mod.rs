// Shared fixtures for the integration tests.
#![allow(dead_code)]

use ssa_debugger::debugger::{execute, Breakpoints, DebuggerConfig, Flow, Session};
use ssa_debugger::interp::{CallStack, Engine, Frame, TraceEvent, Value};
use ssa_debugger::ssa::{BuilderMode, FunctionId, PackageId, Program};
use ssa_debugger::types::{
    BasicKind, ConstValue, Decl, DeclKind, Field, File, FuncDecl, Ident, Object, PackageInfo,
    Position, ScopeInfo, Signature, Span, Spec, Type, TypeScopeId, Var,
};
use std::collections::BTreeMap;

pub fn pos(file: &str, line: u32, column: u32) -> Position {
    Position::new(file, line, column)
}

pub fn span(file: &str, from: (u32, u32), to: (u32, u32)) -> Span {
    Span::new(Some(pos(file, from.0, from.1)), Some(pos(file, to.0, to.1)))
}

pub fn int() -> Type {
    Type::basic(BasicKind::Int)
}

fn func_decl(name: &str, object: u32, scope: Option<u32>, span: Span) -> FuncDecl {
    FuncDecl {
        name: Ident::new(name, ssa_debugger::types::ObjectId(object)),
        recv: None,
        params: Vec::new(),
        scope: scope.map(TypeScopeId),
        body: Some(serde_json::json!({ "stmts": [] })),
        span,
    }
}

/// const message = "Hello, World!"; func main() {}
pub fn hello_unit() -> PackageInfo {
    let mut unit = PackageInfo::new("main", "main");
    let message = unit.add_object(Object::Const {
        name: "message".to_string(),
        pos: Some(pos("hello.go", 3, 7)),
        ty: Type::basic(BasicKind::UntypedString),
        value: ConstValue::String("Hello, World!".to_string()),
    });
    let main = unit.add_object(Object::Func {
        name: "main".to_string(),
        pos: Some(pos("hello.go", 5, 6)),
        sig: Signature::default(),
    });
    unit.declare(TypeScopeId(0), "message", message);
    unit.declare(TypeScopeId(0), "main", main);
    let main_scope = unit.add_scope(
        TypeScopeId(0),
        ScopeInfo {
            span: span("hello.go", (5, 10), (7, 2)),
            ..ScopeInfo::default()
        },
    );

    unit.files.push(File {
        name: "hello.go".to_string(),
        decls: vec![
            Decl::Gen {
                kind: DeclKind::Const,
                specs: vec![Spec::Value {
                    names: vec![Ident::new("message", message)],
                    span: span("hello.go", (3, 7), (3, 31)),
                }],
                span: span("hello.go", (3, 1), (3, 31)),
            },
            Decl::Func(func_decl(
                "main",
                main.0,
                Some(main_scope.0),
                span("hello.go", (5, 1), (7, 2)),
            )),
        ],
    });
    unit
}

/// func f(x int) { a := 1; { a := 2; b := 3 } } plus var g int
pub fn nested_unit() -> PackageInfo {
    let mut unit = PackageInfo::new("example.com/nest", "nest");
    let f = unit.add_object(Object::Func {
        name: "f".to_string(),
        pos: Some(pos("nest.go", 5, 6)),
        sig: Signature {
            params: vec![Var::new("x", int())],
            ..Signature::default()
        },
    });
    let x = unit.add_object(Object::Var {
        name: "x".to_string(),
        pos: Some(pos("nest.go", 5, 8)),
        ty: int(),
    });
    let outer_a = unit.add_object(Object::Var {
        name: "a".to_string(),
        pos: Some(pos("nest.go", 6, 2)),
        ty: int(),
    });
    let inner_a = unit.add_object(Object::Var {
        name: "a".to_string(),
        pos: Some(pos("nest.go", 8, 3)),
        ty: Type::basic(BasicKind::String),
    });
    let b = unit.add_object(Object::Var {
        name: "b".to_string(),
        pos: Some(pos("nest.go", 9, 3)),
        ty: int(),
    });
    let g = unit.add_object(Object::Var {
        name: "g".to_string(),
        pos: Some(pos("nest.go", 3, 5)),
        ty: int(),
    });
    unit.declare(TypeScopeId(0), "f", f);
    unit.declare(TypeScopeId(0), "g", g);

    let fn_scope = unit.add_scope(
        TypeScopeId(0),
        ScopeInfo {
            span: span("nest.go", (5, 7), (11, 2)),
            ..ScopeInfo::default()
        },
    );
    unit.declare(fn_scope, "x", x);
    unit.declare(fn_scope, "a", outer_a);
    let block = unit.add_scope(
        fn_scope,
        ScopeInfo {
            span: span("nest.go", (7, 2), (10, 3)),
            ..ScopeInfo::default()
        },
    );
    unit.declare(block, "a", inner_a);
    unit.declare(block, "b", b);

    let mut decl = func_decl("f", f.0, Some(fn_scope.0), span("nest.go", (5, 1), (11, 2)));
    decl.params = vec![Field {
        names: vec![Ident::new("x", x)],
        ty: int(),
    }];
    unit.files.push(File {
        name: "nest.go".to_string(),
        decls: vec![
            Decl::Gen {
                kind: DeclKind::Var,
                specs: vec![Spec::Value {
                    names: vec![Ident::new("g", g)],
                    span: span("nest.go", (3, 5), (3, 10)),
                }],
                span: span("nest.go", (3, 1), (3, 10)),
            },
            Decl::Func(decl),
        ],
    });
    unit
}

/// type T struct{}; func (t *T) Area() int
pub fn method_unit() -> PackageInfo {
    let mut unit = PackageInfo::new("example.com/shapes", "shapes");
    let path = unit.path.clone();
    let t_ty = Type::named(path.clone(), "T");
    let area = ssa_debugger::types::ObjectId(1);
    let t = unit.add_object(Object::TypeName {
        name: "T".to_string(),
        pos: Some(pos("shapes.go", 3, 6)),
        ty: t_ty.clone(),
        underlying: Type::Struct { fields: Vec::new() },
        methods: vec![area],
    });
    unit.add_object(Object::Func {
        name: "Area".to_string(),
        pos: Some(pos("shapes.go", 5, 14)),
        sig: Signature {
            recv: Some(Var::new("t", Type::pointer(t_ty.clone()))),
            results: vec![Var::new("", int())],
            ..Signature::default()
        },
    });
    unit.declare(TypeScopeId(0), "T", t);
    let recv = unit.add_object(Object::Var {
        name: "t".to_string(),
        pos: Some(pos("shapes.go", 5, 7)),
        ty: Type::pointer(t_ty.clone()),
    });

    let mut decl = func_decl("Area", area.0, None, span("shapes.go", (5, 1), (5, 40)));
    decl.recv = Some(vec![Field {
        names: vec![Ident::new("t", recv)],
        ty: Type::pointer(t_ty),
    }]);
    unit.files.push(File {
        name: "shapes.go".to_string(),
        decls: vec![
            Decl::Gen {
                kind: DeclKind::Type,
                specs: vec![Spec::Type {
                    name: Ident::new("T", t),
                    span: span("shapes.go", (3, 6), (3, 15)),
                }],
                span: span("shapes.go", (3, 1), (3, 15)),
            },
            Decl::Func(decl),
        ],
    });
    unit
}

/// A package known only from its export data.
pub fn binary_unit() -> PackageInfo {
    let mut unit = PackageInfo::new("fmt", "fmt");
    let stringer_ty = Type::named("fmt", "Stringer");
    let println = unit.add_object(Object::Func {
        name: "Println".to_string(),
        pos: None,
        sig: Signature {
            params: vec![Var::new(
                "a",
                Type::Slice {
                    elem: Box::new(Type::Interface { methods: Vec::new() }),
                },
            )],
            results: vec![
                Var::new("n", int()),
                Var::new("err", Type::named("", "error")),
            ],
            variadic: true,
            ..Signature::default()
        },
    });
    let string_method = ssa_debugger::types::ObjectId(2);
    let stringer = unit.add_object(Object::TypeName {
        name: "Stringer".to_string(),
        pos: None,
        ty: stringer_ty.clone(),
        underlying: Type::Interface {
            methods: vec!["String".to_string()],
        },
        methods: vec![string_method],
    });
    unit.add_object(Object::Func {
        name: "String".to_string(),
        pos: None,
        sig: Signature {
            recv: Some(Var::new("s", stringer_ty)),
            results: vec![Var::new("", Type::basic(BasicKind::String))],
            ..Signature::default()
        },
    });
    unit.declare(TypeScopeId(0), "Println", println);
    unit.declare(TypeScopeId(0), "Stringer", stringer);
    unit
}

pub fn hello_program() -> (Program, PackageId) {
    let mut program = Program::new(BuilderMode::SANITY_CHECK_FUNCTIONS);
    let id = program.create_package(hello_unit());
    (program, id)
}

pub fn function(program: &Program, qualified: &str) -> FunctionId {
    program
        .function_by_name(qualified)
        .unwrap_or_else(|| panic!("no function {}", qualified))
}

/// `main.init` calling `main.main`, innermost at line 6.
pub fn hello_stack(program: &Program) -> CallStack {
    let pkg = program.package_by_name("main").expect("main package");
    let mut init = Frame::new(pkg.init_id());
    init.span = Span::at(pos("hello.go", 1, 1));
    let mut main = Frame::new(function(program, "main.main"));
    main.span = Span::at(pos("hello.go", 6, 2));
    [init, main].into_iter().collect()
}

/// Records every directive the debugger issues.
#[derive(Debug, Default)]
pub struct MockEngine {
    pub directives: Vec<String>,
    pub tracing: bool,
    pub globals: BTreeMap<String, Value>,
}

impl Engine for MockEngine {
    fn step_into(&mut self) {
        self.directives.push("into".to_string());
    }

    fn step_over(&mut self, depth: usize) {
        self.directives.push(format!("over {}", depth));
    }

    fn step_out(&mut self, depth: usize) {
        self.directives.push(format!("out {}", depth));
    }

    fn run(&mut self) {
        self.directives.push("run".to_string());
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
}

/// Result of feeding command lines to one paused session.
pub struct Transcript {
    pub output: String,
    pub flows: Vec<Flow>,
    pub cursor: usize,
}

pub fn run_commands(
    program: &Program,
    stack: &CallStack,
    engine: &mut MockEngine,
    breakpoints: &mut Breakpoints,
    lines: &[&str],
) -> Transcript {
    let config = DebuggerConfig::default();
    let mut out = Vec::new();
    let mut session = Session::new(
        program,
        stack,
        engine,
        &mut out,
        breakpoints,
        &config,
        TraceEvent::StmtInList,
    );
    let mut flows = Vec::new();
    for line in lines {
        flows.push(execute(&mut session, line).expect("write to Vec"));
    }
    let cursor = session.cursor();
    drop(session);
    Transcript {
        output: String::from_utf8(out).expect("utf-8 output"),
        flows,
        cursor,
    }
}

pub fn commands(program: &Program, stack: &CallStack, lines: &[&str]) -> Transcript {
    run_commands(
        program,
        stack,
        &mut MockEngine::default(),
        &mut Breakpoints::new(),
        lines,
    )
}
