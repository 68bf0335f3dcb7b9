use super::function::{FuncSyntax, Function, FunctionId};
use super::member::{Const, Global, Member, NamedConst, TypeMember};
use super::scope::{Scope, ScopeId};
use crate::types::{ObjectId, PackageInfo, Signature, TypeScopeId, Var};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(pub usize);

/// What a declaration object has already been built into.
#[derive(Debug, Clone, PartialEq)]
pub enum BuiltValue {
    Type,
    Const(Const),
    Global(String),
    Function(FunctionId),
}

#[derive(Debug)]
pub struct Package {
    id: PackageId,
    path: String,
    name: String,
    importable: bool,
    members: BTreeMap<String, Member>,
    values: HashMap<ObjectId, BuiltValue>,
    functions: Vec<Function>,
    scopes: Vec<Scope>,
    type_scopes: HashMap<TypeScopeId, ScopeId>,
    init: FunctionId,
    init_bodies: Vec<FuncSyntax>,
    info: Option<PackageInfo>,
}

impl Package {
    pub(crate) fn new(id: PackageId, path: &str, name: &str, importable: bool) -> Self {
        let init = Function::synthetic("init", Signature::default(), "package initializer", id)
            .with_scope(Some(ScopeId::PACKAGE));
        let mut pkg = Self {
            id,
            path: path.to_string(),
            name: name.to_string(),
            importable,
            members: BTreeMap::new(),
            values: HashMap::new(),
            functions: Vec::new(),
            scopes: Vec::new(),
            type_scopes: HashMap::new(),
            init: FunctionId { package: id, index: 0 },
            init_bodies: Vec::new(),
            info: None,
        };
        pkg.init = pkg.push_function(init);
        pkg.insert_member(Member::Function {
            name: "init".to_string(),
            id: pkg.init,
        });
        pkg
    }

    pub fn id(&self) -> PackageId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_importable(&self) -> bool {
        self.importable
    }

    pub fn members(&self) -> &BTreeMap<String, Member> {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// The package-level function `name`, if that member is a function.
    pub fn func(&self, name: &str) -> Option<&Function> {
        self.member(name)
            .and_then(Member::as_function)
            .and_then(|id| self.function(id))
    }

    pub fn var(&self, name: &str) -> Option<&Global> {
        match self.member(name) {
            Some(Member::Global(g)) => Some(g),
            _ => None,
        }
    }

    pub fn constant(&self, name: &str) -> Option<&NamedConst> {
        match self.member(name) {
            Some(Member::Const(c)) => Some(c),
            _ => None,
        }
    }

    pub fn type_(&self, name: &str) -> Option<&TypeMember> {
        match self.member(name) {
            Some(Member::Type(t)) => Some(t),
            _ => None,
        }
    }

    pub fn init(&self) -> &Function {
        &self.functions[self.init.index]
    }

    pub fn init_id(&self) -> FunctionId {
        self.init
    }

    /// Every explicit `init` body, in declaration order.
    pub fn init_bodies(&self) -> &[FuncSyntax] {
        &self.init_bodies
    }

    pub fn function(&self, id: FunctionId) -> Option<&Function> {
        if id.package != self.id {
            return None;
        }
        self.functions.get(id.index)
    }

    pub fn function_mut(&mut self, id: FunctionId) -> Option<&mut Function> {
        if id.package != self.id {
            return None;
        }
        self.functions.get_mut(id.index)
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        let package = self.id;
        self.functions
            .iter()
            .enumerate()
            .map(move |(index, f)| (FunctionId { package, index }, f))
    }

    pub fn value_of(&self, object: ObjectId) -> Option<&BuiltValue> {
        self.values.get(&object)
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    pub fn scope_for(&self, type_scope: TypeScopeId) -> Option<ScopeId> {
        self.type_scopes.get(&type_scope).copied()
    }

    /// `scope` followed by each enclosing scope out to the package scope.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(self.scope(scope), move |s| {
            s.parent().and_then(|p| self.scope(p))
        })
        .map(Scope::id)
    }

    /// The compilation unit this package was created from.
    pub fn info(&self) -> Option<&PackageInfo> {
        self.info.as_ref()
    }

    /// Records a closure nested in `enclosing`.
    pub fn add_anonymous(
        &mut self,
        enclosing: FunctionId,
        signature: Signature,
        free_vars: Vec<Var>,
    ) -> Option<FunctionId> {
        let parent = self.function(enclosing)?;
        let name = format!("{}${}", parent.name(), parent.anon_funcs().len() + 1);
        let mut anon = Function::synthetic(name, signature, "anonymous function", self.id)
            .with_scope(parent.scope());
        anon.set_enclosing(enclosing);
        anon.set_free_vars(free_vars);
        let id = self.push_function(anon);
        self.function_mut(enclosing)?.push_anon(id);
        Some(id)
    }

    pub(crate) fn push_function(&mut self, function: Function) -> FunctionId {
        self.functions.push(function);
        FunctionId {
            package: self.id,
            index: self.functions.len() - 1,
        }
    }

    pub(crate) fn init_mut(&mut self) -> &mut Function {
        &mut self.functions[self.init.index]
    }

    pub(crate) fn push_init_body(&mut self, syntax: FuncSyntax) {
        self.init_bodies.push(syntax);
    }

    pub(crate) fn insert_member(&mut self, member: Member) {
        self.members.insert(member.name().to_string(), member);
    }

    pub(crate) fn has_value(&self, object: ObjectId) -> bool {
        self.values.contains_key(&object)
    }

    pub(crate) fn record_value(&mut self, object: ObjectId, value: BuiltValue) {
        self.values.insert(object, value);
    }

    pub(crate) fn push_scope(&mut self, type_scope: TypeScopeId, scope: Scope) {
        self.type_scopes.insert(type_scope, scope.id());
        self.scopes.push(scope);
    }

    pub(crate) fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes.get_mut(id.0 as usize)
    }

    pub(crate) fn set_info(&mut self, info: PackageInfo) {
        self.info = Some(info);
    }

    /// Writes the member inventory, one line per member sorted by name.
    pub fn dump_to(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "package {}:", self.path)?;

        let width = self.members.keys().map(String::len).max().unwrap_or(0);
        for (name, member) in &self.members {
            let detail = match member {
                Member::Type(t) => t.ty.to_string(),
                Member::Const(c) => format!("{} = {}", c.name, c.value),
                Member::Global(g) => g.ty.deref().to_string(),
                Member::Function { id, .. } => self
                    .function(*id)
                    .map(|f| format!("func{}", f.signature()))
                    .unwrap_or_default(),
            };
            writeln!(
                w,
                "  {:<5} {:<width$} {}",
                member.kind_name(),
                name,
                detail,
                width = width
            )?;
        }
        Ok(())
    }

    pub fn inventory(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.dump_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "package {}", self.path)
    }
}
