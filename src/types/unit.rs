use super::object::{Object, ObjectId};
use super::position::Span;
use super::syntax::{File, Ident, TypeScopeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A lexical scope as resolved by the type checker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeInfo {
    #[serde(default)]
    pub span: Span,
    /// Names declared directly in this scope; iteration is sorted.
    #[serde(default)]
    pub names: BTreeMap<String, ObjectId>,
    #[serde(default)]
    pub children: Vec<TypeScopeId>,
}

fn importable_default() -> bool {
    true
}

/// A type-checked compilation unit. With no files it describes a
/// binary-only package whose members come from its resolved scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub path: String,
    pub name: String,
    #[serde(default = "importable_default")]
    pub importable: bool,
    /// Set when type checking failed.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub objects: Vec<Object>,
    /// Scope 0 is the package scope.
    #[serde(default)]
    pub scopes: Vec<ScopeInfo>,
    #[serde(default)]
    pub files: Vec<File>,
}

impl PackageInfo {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            importable: true,
            error: None,
            objects: Vec::new(),
            scopes: vec![ScopeInfo::default()],
            files: Vec::new(),
        }
    }

    pub fn is_binary(&self) -> bool {
        self.files.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0 as usize)
    }

    pub fn object_of(&self, ident: &Ident) -> Option<ObjectId> {
        ident.object.filter(|id| self.object(*id).is_some())
    }

    pub fn scope(&self, id: TypeScopeId) -> Option<&ScopeInfo> {
        self.scopes.get(id.0 as usize)
    }

    pub fn package_scope(&self) -> Option<&ScopeInfo> {
        self.scopes.first()
    }

    /// Appends an object and returns its id.
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId((self.objects.len() - 1) as u32)
    }

    /// Appends a child scope under `parent` and returns its id.
    pub fn add_scope(&mut self, parent: TypeScopeId, scope: ScopeInfo) -> TypeScopeId {
        self.scopes.push(scope);
        let id = TypeScopeId((self.scopes.len() - 1) as u32);
        if let Some(p) = self.scopes.get_mut(parent.0 as usize) {
            p.children.push(id);
        }
        id
    }

    /// Declares `name` in scope `scope`.
    pub fn declare(&mut self, scope: TypeScopeId, name: impl Into<String>, object: ObjectId) {
        if let Some(s) = self.scopes.get_mut(scope.0 as usize) {
            s.names.insert(name.into(), object);
        }
    }
}
