//! The type checker's view of a compilation unit, as consumed by CREATE.

mod object;
mod position;
mod syntax;
mod ty;
mod unit;

pub use object::{ConstValue, Object, ObjectId};
pub use position::{Position, Span};
pub use syntax::{Decl, DeclKind, Field, File, FuncDecl, Ident, Spec, TypeScopeId};
pub use ty::{BasicKind, Signature, Type, Var};
pub use unit::{PackageInfo, ScopeInfo};
