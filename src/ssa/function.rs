use super::package::PackageId;
use super::scope::{NameScope, ScopeId};
use crate::types::{Field, ObjectId, Signature, Span, Type, Var};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId {
    pub package: PackageId,
    pub index: usize,
}

/// Syntax kept from a function declaration for the BUILD phase.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncSyntax {
    pub recv: Option<Vec<Field>>,
    pub params: Vec<Field>,
    pub body: Option<serde_json::Value>,
    pub span: Span,
}

/// Where a function came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    SourceDeclared(FuncSyntax),
    Synthesized(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Local {
    pub name: String,
    pub ty: Type,
    pub scope: ScopeId,
    pub slot: usize,
    pub span: Span,
}

impl fmt::Display for Local {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

/// A basic block as filled in by BUILD.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub index: usize,
    pub comment: String,
    pub scope: Option<ScopeId>,
    pub instrs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    object: Option<ObjectId>,
    signature: Signature,
    origin: Origin,
    span: Span,
    package: PackageId,
    scope: Option<ScopeId>,
    params: Vec<Var>,
    locals: Vec<Local>,
    locals_by_name: HashMap<NameScope, usize>,
    free_vars: Vec<Var>,
    enclosing: Option<FunctionId>,
    anon_funcs: Vec<FunctionId>,
    blocks: Option<Vec<BasicBlock>>,
}

impl Function {
    pub(crate) fn new(
        name: impl Into<String>,
        signature: Signature,
        origin: Origin,
        package: PackageId,
    ) -> Self {
        // The receiver, if any, is the first parameter.
        let params = signature
            .recv
            .iter()
            .chain(signature.params.iter())
            .cloned()
            .collect();
        Self {
            name: name.into(),
            object: None,
            signature,
            origin,
            span: Span::default(),
            package,
            scope: None,
            params,
            locals: Vec::new(),
            locals_by_name: HashMap::new(),
            free_vars: Vec::new(),
            enclosing: None,
            anon_funcs: Vec::new(),
            blocks: None,
        }
    }

    pub(crate) fn synthetic(
        name: impl Into<String>,
        signature: Signature,
        reason: impl Into<String>,
        package: PackageId,
    ) -> Self {
        Self::new(name, signature, Origin::Synthesized(reason.into()), package)
    }

    pub(crate) fn with_object(mut self, object: ObjectId) -> Self {
        self.object = Some(object);
        self
    }

    pub(crate) fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub(crate) fn with_scope(mut self, scope: Option<ScopeId>) -> Self {
        self.scope = scope;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> Option<ObjectId> {
        self.object
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn syntax(&self) -> Option<&FuncSyntax> {
        match &self.origin {
            Origin::SourceDeclared(syntax) => Some(syntax),
            Origin::Synthesized(_) => None,
        }
    }

    pub fn synthetic_reason(&self) -> Option<&str> {
        match &self.origin {
            Origin::SourceDeclared(_) => None,
            Origin::Synthesized(reason) => Some(reason),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic_reason().is_some()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn package(&self) -> PackageId {
        self.package
    }

    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    pub fn receiver(&self) -> Option<&Var> {
        self.signature.recv.as_ref()
    }

    pub fn params(&self) -> &[Var] {
        &self.params
    }

    pub fn locals(&self) -> &[Local] {
        &self.locals
    }

    pub fn local(&self, slot: usize) -> Option<&Local> {
        self.locals.get(slot)
    }

    pub fn locals_by_name(&self) -> &HashMap<NameScope, usize> {
        &self.locals_by_name
    }

    /// Slot of the local `name` declared exactly in `scope`.
    pub fn local_slot(&self, name: &str, scope: ScopeId) -> Option<usize> {
        self.locals_by_name
            .get(&NameScope::new(name, scope))
            .copied()
    }

    pub fn free_vars(&self) -> &[Var] {
        &self.free_vars
    }

    pub fn enclosing(&self) -> Option<FunctionId> {
        self.enclosing
    }

    pub fn anon_funcs(&self) -> &[FunctionId] {
        &self.anon_funcs
    }

    /// `None` until BUILD runs, and forever for external functions.
    pub fn blocks(&self) -> Option<&[BasicBlock]> {
        self.blocks.as_deref()
    }

    pub fn set_blocks(&mut self, blocks: Vec<BasicBlock>) {
        self.blocks = Some(blocks);
    }

    pub(crate) fn add_local(
        &mut self,
        name: impl Into<String>,
        ty: Type,
        scope: ScopeId,
        span: Span,
    ) -> usize {
        let name = name.into();
        let slot = self.locals.len();
        self.locals_by_name
            .insert(NameScope::new(name.clone(), scope), slot);
        self.locals.push(Local {
            name,
            ty,
            scope,
            slot,
            span,
        });
        slot
    }

    pub(crate) fn set_free_vars(&mut self, free_vars: Vec<Var>) {
        self.free_vars = free_vars;
    }

    pub(crate) fn set_enclosing(&mut self, enclosing: FunctionId) {
        self.enclosing = Some(enclosing);
    }

    pub(crate) fn push_anon(&mut self, anon: FunctionId) {
        self.anon_funcs.push(anon);
    }

    /// Adopts the first explicit declaration of a synthetic function.
    pub(crate) fn adopt_declaration(&mut self, syntax: FuncSyntax) -> bool {
        if self.is_synthetic() {
            self.span = syntax.span.clone();
            self.origin = Origin::SourceDeclared(syntax);
            true
        } else {
            false
        }
    }
}
