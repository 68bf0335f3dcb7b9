//! Declaration-level syntax of a type-checked compilation unit.
//!
//! Only the shape CREATE needs is modelled here. Function bodies stay
//! opaque: they are carried as JSON and handed to the BUILD phase untouched.

use super::object::ObjectId;
use super::position::{Position, Span};
use super::ty::Type;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    /// The object the type checker resolved this identifier to.
    #[serde(default)]
    pub object: Option<ObjectId>,
    #[serde(default)]
    pub pos: Option<Position>,
}

impl Ident {
    pub fn new(name: impl Into<String>, object: ObjectId) -> Self {
        Self {
            name: name.into(),
            object: Some(object),
            pos: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Import,
    Const,
    Var,
    Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "spec", rename_all = "snake_case")]
pub enum Spec {
    Import {
        path: String,
    },
    Value {
        names: Vec<Ident>,
        #[serde(default)]
        span: Span,
    },
    Type {
        name: Ident,
        #[serde(default)]
        span: Span,
    },
}

/// One entry of a parameter or receiver list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub names: Vec<Ident>,
    #[serde(rename = "type")]
    pub ty: Type,
}

/// Index into a compilation unit's resolved scope table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeScopeId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: Ident,
    #[serde(default)]
    pub recv: Option<Vec<Field>>,
    #[serde(default)]
    pub params: Vec<Field>,
    /// Resolved scope opened by the function's signature.
    #[serde(default)]
    pub scope: Option<TypeScopeId>,
    #[serde(default)]
    pub body: Option<serde_json::Value>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum Decl {
    Gen {
        kind: DeclKind,
        specs: Vec<Spec>,
        #[serde(default)]
        span: Span,
    },
    Func(FuncDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    #[serde(default)]
    pub decls: Vec<Decl>,
}
