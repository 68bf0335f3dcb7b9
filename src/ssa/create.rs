//! The CREATE phase: turn a type-checked compilation unit into a
//! [`Package`] whose members are allocated but whose function bodies are
//! not yet built.

use super::error::{CreateError, ProgrammerError};
use super::function::{FuncSyntax, Function, FunctionId, Origin};
use super::member::{Const, Global, Member, NamedConst, TypeMember};
use super::mode::BuilderMode;
use super::package::{BuiltValue, Package, PackageId};
use super::program::{ObjectKey, Program};
use super::sanity;
use super::scope::{Scope, ScopeId, ScopeNode};
use crate::types::{
    BasicKind, Decl, DeclKind, FuncDecl, Object, ObjectId, PackageInfo, Span, Spec, Type,
    TypeScopeId,
};
use log::{debug, info, trace};
use std::collections::HashSet;

/// Syntax accompanying an object during member construction.
#[derive(Clone, Copy)]
enum DeclSyntax<'a> {
    Spec(&'a Span),
    Func(&'a FuncDecl),
}

fn fatal(err: ProgrammerError) -> ! {
    panic!("{}", err)
}

impl Program {
    /// Creates the package described by `info` and populates its members.
    ///
    /// Repeated calls for the same package path return the same package.
    ///
    /// # Panics
    ///
    /// If `info` carries type errors, or violates the type checker's
    /// guarantees (unresolved identifiers, methods on unnamed types).
    pub fn create_package(&mut self, info: PackageInfo) -> PackageId {
        if let Some(error) = &info.error {
            fatal(ProgrammerError::TypeErrors {
                package: info.path.clone(),
                error: error.clone(),
            });
        }
        if let Some(id) = self.lookup_identity(&info.path) {
            debug!("package {} already created", info.path);
            return id;
        }

        let id = self.next_package_id();
        let mut pkg = Package::new(id, &info.path, &info.name, info.importable);
        assign_scope_ids(&mut pkg, &info);

        let mut creator = Creator {
            pkg: &mut pkg,
            info: &info,
            methods: Vec::new(),
        };
        if info.is_binary() {
            creator.members_from_scope();
        } else {
            for file in &info.files {
                trace!("creating members of {}", file.name);
                for decl in &file.decls {
                    creator.members_from_decl(decl);
                }
            }
        }
        let methods = creator.methods;

        pkg.insert_member(Member::Global(Global {
            name: "init$guard".to_string(),
            object: None,
            ty: Type::pointer(Type::basic(BasicKind::Bool)),
            span: Span::default(),
        }));
        pkg.set_info(info);

        if self.mode().contains(BuilderMode::LOG_PACKAGES) {
            info!("{}", pkg.inventory().trim_end());
        }
        if self.mode().contains(BuilderMode::LOG_FUNCTIONS) {
            for (_, f) in pkg.functions() {
                debug!(
                    "# Name: {}.{} func{} locals={} synthetic={:?} at {}",
                    pkg.name(),
                    f.name(),
                    f.signature(),
                    f.locals().len(),
                    f.synthetic_reason(),
                    f.span()
                );
            }
        }

        let id = self.register(pkg);
        for (object, function) in methods {
            self.register_concrete_method(ObjectKey { package: id, object }, function);
        }

        if self.mode().contains(BuilderMode::SANITY_CHECK_FUNCTIONS) {
            if let Some(pkg) = self.package(id) {
                if let Err(problems) = sanity::check_package(self, pkg) {
                    fatal(ProgrammerError::SanityCheck {
                        package: pkg.path().to_string(),
                        problems: problems.join("\n"),
                    });
                }
            }
        }

        id
    }

    /// Creates every error-free unit; reports the ones that had type errors.
    pub fn create_packages(
        &mut self,
        units: impl IntoIterator<Item = PackageInfo>,
    ) -> Result<Vec<PackageId>, CreateError> {
        let mut created = Vec::new();
        let mut failed = Vec::new();
        for unit in units {
            if unit.error.is_some() {
                failed.push(unit.path.clone());
            } else {
                created.push(self.create_package(unit));
            }
        }
        if failed.is_empty() {
            Ok(created)
        } else {
            Err(CreateError::TypeErrors(failed))
        }
    }
}

/// Numbers the unit's resolved scopes depth-first; the package scope is 0.
fn assign_scope_ids(pkg: &mut Package, info: &PackageInfo) {
    if info.scopes.is_empty() {
        pkg.push_scope(
            TypeScopeId(0),
            Scope::new(ScopeId::PACKAGE, None, ScopeNode::Package, Span::default()),
        );
        return;
    }

    let mut next = 0u32;
    let mut stack = vec![(TypeScopeId(0), None)];
    while let Some((ts, parent)) = stack.pop() {
        let Some(info_scope) = info.scope(ts) else {
            continue;
        };
        let id = ScopeId(next);
        next += 1;
        let node = if parent.is_none() {
            ScopeNode::Package
        } else {
            ScopeNode::Block
        };
        pkg.push_scope(ts, Scope::new(id, parent, node, info_scope.span.clone()));
        // Reverse so the first child is numbered first.
        for child in info_scope.children.iter().rev() {
            stack.push((*child, Some(id)));
        }
    }
}

struct Creator<'a> {
    pkg: &'a mut Package,
    info: &'a PackageInfo,
    methods: Vec<(ObjectId, FunctionId)>,
}

impl Creator<'_> {
    fn members_from_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Gen { kind, specs, .. } => {
                for spec in specs {
                    match (kind, spec) {
                        (DeclKind::Import, _) => {}
                        (DeclKind::Const | DeclKind::Var, Spec::Value { names, span }) => {
                            for id in names.iter().filter(|id| !id.is_blank()) {
                                let object = self.object_of(&id.name, id.object);
                                self.member_from_object(object, Some(DeclSyntax::Spec(span)));
                            }
                        }
                        (DeclKind::Type, Spec::Type { name, .. }) => {
                            if !name.is_blank() {
                                let object = self.object_of(&name.name, name.object);
                                self.member_from_object(object, None);
                            }
                        }
                        (kind, spec) => fatal(ProgrammerError::UnexpectedSpec {
                            decl: decl_kind_name(*kind),
                            found: spec_name(spec),
                        }),
                    }
                }
            }
            Decl::Func(decl) => {
                if decl.recv.is_none() && decl.name.name == "init" {
                    self.adopt_init(decl);
                    return;
                }
                if !decl.name.is_blank() {
                    let object = self.object_of(&decl.name.name, decl.name.object);
                    self.member_from_object(object, Some(DeclSyntax::Func(decl)));
                }
            }
        }
    }

    /// Binary packages expose no declarations, only a resolved scope.
    fn members_from_scope(&mut self) {
        let Some(scope) = self.info.package_scope() else {
            return;
        };
        for (name, object) in &scope.names {
            let object = self.object_of(name, Some(*object));
            self.member_from_object(object, None);
            if let Some(Object::TypeName { methods, .. }) = self.info.object(object) {
                for method in methods {
                    self.member_from_object(*method, None);
                }
            }
        }
    }

    fn object_of(&self, name: &str, object: Option<ObjectId>) -> ObjectId {
        object
            .filter(|id| self.info.object(*id).is_some())
            .unwrap_or_else(|| fatal(ProgrammerError::Unresolved(name.to_string())))
    }

    /// Explicit `init` functions merge into the package initializer.
    fn adopt_init(&mut self, decl: &FuncDecl) {
        let syntax = func_syntax(decl);
        self.pkg.push_init_body(syntax.clone());
        if self.pkg.init_mut().adopt_declaration(syntax) {
            debug!("package {}: init declared at {}", self.pkg.path(), decl.span);
        }
        if let Some(ts) = decl.scope {
            let init = self.pkg.init_id();
            self.derive_locals(init, ts, &HashSet::new());
        }
    }

    fn member_from_object(&mut self, object: ObjectId, syntax: Option<DeclSyntax<'_>>) {
        if self.pkg.has_value(object) {
            return;
        }
        let Some(obj) = self.info.object(object) else {
            fatal(ProgrammerError::Unresolved(format!("#{}", object.0)));
        };

        match obj {
            Object::TypeName {
                name,
                pos,
                ty,
                underlying,
                ..
            } => {
                self.pkg.record_value(object, BuiltValue::Type);
                self.pkg.insert_member(Member::Type(TypeMember {
                    name: name.clone(),
                    object,
                    ty: ty.clone(),
                    underlying: underlying.clone(),
                    pos: pos.clone(),
                }));
            }

            Object::Const {
                name,
                pos,
                ty,
                value,
            } => {
                let spec = match syntax {
                    Some(DeclSyntax::Spec(span)) => Some(span),
                    _ => None,
                };
                let start = pos
                    .clone()
                    .or_else(|| spec.and_then(|s| s.start.clone()));
                let end = spec
                    .and_then(|s| s.end.clone())
                    .or_else(|| pos.clone());
                let value = Const {
                    value: value.clone(),
                    ty: ty.clone(),
                    span: Span::new(start, end),
                };
                self.pkg.record_value(object, BuiltValue::Const(value.clone()));
                self.pkg.insert_member(Member::Const(NamedConst {
                    name: name.clone(),
                    object,
                    value,
                }));
            }

            Object::Var { name, pos, ty } => {
                let end = match syntax {
                    Some(DeclSyntax::Spec(span)) => span.end.clone(),
                    _ => None,
                }
                .or_else(|| pos.clone());
                self.pkg.record_value(object, BuiltValue::Global(name.clone()));
                self.pkg.insert_member(Member::Global(Global {
                    name: name.clone(),
                    object: Some(object),
                    ty: Type::pointer(ty.clone()),
                    span: Span::new(pos.clone(), end),
                }));
            }

            Object::Func { name, pos, sig } => {
                let decl = match syntax {
                    Some(DeclSyntax::Func(decl)) => Some(decl),
                    _ => None,
                };
                let origin = match decl {
                    Some(decl) => Origin::SourceDeclared(func_syntax(decl)),
                    None => Origin::Synthesized("loaded from gc object file".to_string()),
                };
                let scope = decl
                    .and_then(|d| d.scope)
                    .and_then(|ts| self.pkg.scope_for(ts));
                if let Some(scope) = scope.and_then(|s| self.pkg.scope_mut(s)) {
                    scope.set_node(ScopeNode::Function(object));
                }
                let end = decl
                    .and_then(|d| d.span.end.clone())
                    .or_else(|| pos.clone());
                let function = Function::new(name.clone(), sig.clone(), origin, self.pkg.id())
                    .with_object(object)
                    .with_scope(scope)
                    .with_span(Span::new(pos.clone(), end));
                let id = self.pkg.push_function(function);
                self.pkg.record_value(object, BuiltValue::Function(id));

                if let Some(ts) = decl.and_then(|d| d.scope) {
                    let params: HashSet<String> = sig
                        .recv
                        .iter()
                        .chain(sig.params.iter())
                        .map(|p| p.name.clone())
                        .collect();
                    self.derive_locals(id, ts, &params);
                }

                match &sig.recv {
                    None => self.pkg.insert_member(Member::Function {
                        name: name.clone(),
                        id,
                    }),
                    Some(recv) => {
                        self.check_receiver(name, &recv.ty);
                        self.methods.push((object, id));
                    }
                }
            }

            Object::PackageName { name, .. } => fatal(ProgrammerError::UnexpectedObject {
                name: name.clone(),
                kind: obj.kind_name(),
            }),
        }
    }

    /// A method's receiver must be `T` or `*T` for a type declared here.
    fn check_receiver(&self, method: &str, receiver: &crate::types::Type) {
        let declared = receiver.named_base().is_some_and(|(path, name)| {
            path == self.info.path
                && self
                    .info
                    .package_scope()
                    .and_then(|s| s.names.get(name))
                    .and_then(|id| self.info.object(*id))
                    .is_some_and(|o| matches!(o, Object::TypeName { .. }))
        });
        if !declared {
            fatal(ProgrammerError::BadReceiver {
                method: method.to_string(),
                receiver: receiver.to_string(),
            });
        }
    }

    /// Allocates a local slot for every variable declared in the scope
    /// subtree rooted at `root`, skipping parameters of the root scope.
    fn derive_locals(&mut self, function: FunctionId, root: TypeScopeId, params: &HashSet<String>) {
        let mut stack = vec![root];
        while let Some(ts) = stack.pop() {
            let (Some(info_scope), Some(scope)) = (self.info.scope(ts), self.pkg.scope_for(ts))
            else {
                continue;
            };
            for (name, object) in &info_scope.names {
                if ts == root && params.contains(name) {
                    continue;
                }
                let Some(Object::Var { pos, ty, .. }) = self.info.object(*object) else {
                    continue;
                };
                let span = pos.clone().map(Span::at).unwrap_or_default();
                if let Some(f) = self.pkg.function_mut(function) {
                    f.add_local(name.clone(), ty.clone(), scope, span);
                }
            }
            for child in info_scope.children.iter().rev() {
                stack.push(*child);
            }
        }
    }
}

fn func_syntax(decl: &FuncDecl) -> FuncSyntax {
    FuncSyntax {
        recv: decl.recv.clone(),
        params: decl.params.clone(),
        body: decl.body.clone(),
        span: decl.span.clone(),
    }
}

fn decl_kind_name(kind: DeclKind) -> &'static str {
    match kind {
        DeclKind::Import => "import",
        DeclKind::Const => "const",
        DeclKind::Var => "var",
        DeclKind::Type => "type",
    }
}

fn spec_name(spec: &Spec) -> &'static str {
    match spec {
        Spec::Import { .. } => "import",
        Spec::Value { .. } => "value",
        Spec::Type { .. } => "type",
    }
}
