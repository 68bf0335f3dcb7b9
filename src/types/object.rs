use super::position::Position;
use super::ty::{Signature, Type};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index into a compilation unit's object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

/// An exact constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(b) => write!(f, "{}", b),
            ConstValue::Int(i) => write!(f, "{}", i),
            ConstValue::Float(x) => write!(f, "{}", x),
            ConstValue::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// A typed object produced by the type checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Object {
    TypeName {
        name: String,
        #[serde(default)]
        pos: Option<Position>,
        #[serde(rename = "type")]
        ty: Type,
        underlying: Type,
        /// Declared methods of the named type.
        #[serde(default)]
        methods: Vec<ObjectId>,
    },
    Const {
        name: String,
        #[serde(default)]
        pos: Option<Position>,
        #[serde(rename = "type")]
        ty: Type,
        value: ConstValue,
    },
    Var {
        name: String,
        #[serde(default)]
        pos: Option<Position>,
        #[serde(rename = "type")]
        ty: Type,
    },
    Func {
        name: String,
        #[serde(default)]
        pos: Option<Position>,
        sig: Signature,
    },
    PackageName {
        name: String,
        #[serde(default)]
        pos: Option<Position>,
        imported: String,
    },
}

impl Object {
    pub fn name(&self) -> &str {
        match self {
            Object::TypeName { name, .. }
            | Object::Const { name, .. }
            | Object::Var { name, .. }
            | Object::Func { name, .. }
            | Object::PackageName { name, .. } => name,
        }
    }

    pub fn pos(&self) -> Option<&Position> {
        match self {
            Object::TypeName { pos, .. }
            | Object::Const { pos, .. }
            | Object::Var { pos, .. }
            | Object::Func { pos, .. }
            | Object::PackageName { pos, .. } => pos.as_ref(),
        }
    }

    pub fn ty(&self) -> Type {
        match self {
            Object::TypeName { ty, .. } | Object::Const { ty, .. } | Object::Var { ty, .. } => {
                ty.clone()
            }
            Object::Func { sig, .. } => Type::func(sig.clone()),
            Object::PackageName { imported, .. } => Type::named("", imported.clone()),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Object::TypeName { .. } => "type",
            Object::Const { .. } => "const",
            Object::Var { .. } => "var",
            Object::Func { .. } => "func",
            Object::PackageName { .. } => "package",
        }
    }
}
