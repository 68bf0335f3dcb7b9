use crate::types::{ObjectId, Span};

/// Depth-first scope number, unique within one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const PACKAGE: ScopeId = ScopeId(0);
}

/// The syntax a scope was opened by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeNode {
    Package,
    Function(ObjectId),
    Block,
}

#[derive(Debug, Clone)]
pub struct Scope {
    id: ScopeId,
    parent: Option<ScopeId>,
    node: ScopeNode,
    span: Span,
}

impl Scope {
    pub(crate) fn new(id: ScopeId, parent: Option<ScopeId>, node: ScopeNode, span: Span) -> Self {
        Self {
            id,
            parent,
            node,
            span,
        }
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn node(&self) -> ScopeNode {
        self.node
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub(crate) fn set_node(&mut self, node: ScopeNode) {
        self.node = node;
    }
}

/// Key of a function's local-slot table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameScope {
    pub name: String,
    pub scope: ScopeId,
}

impl NameScope {
    pub fn new(name: impl Into<String>, scope: ScopeId) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }
}
