use super::function::FunctionId;
use crate::types::{ConstValue, ObjectId, Position, Span, Type};
use std::fmt;

/// A constant value with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Const {
    pub value: ConstValue,
    pub ty: Type,
    pub span: Span,
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.value, self.ty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeMember {
    pub name: String,
    pub object: ObjectId,
    pub ty: Type,
    pub underlying: Type,
    pub pos: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedConst {
    pub name: String,
    pub object: ObjectId,
    pub value: Const,
}

/// Package-level storage. `ty` is always the address of the declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub name: String,
    pub object: Option<ObjectId>,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Type(TypeMember),
    Const(NamedConst),
    Global(Global),
    Function { name: String, id: FunctionId },
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Type(t) => &t.name,
            Member::Const(c) => &c.name,
            Member::Global(g) => &g.name,
            Member::Function { name, .. } => name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Member::Type(_) => "type",
            Member::Const(_) => "const",
            Member::Global(_) => "var",
            Member::Function { .. } => "func",
        }
    }

    pub fn as_function(&self) -> Option<FunctionId> {
        match self {
            Member::Function { id, .. } => Some(*id),
            _ => None,
        }
    }
}
