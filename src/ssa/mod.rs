//! In-memory program model and the CREATE phase that populates it.

mod create;
mod error;
mod function;
mod member;
mod mode;
mod package;
mod program;
mod sanity;
mod scope;

pub use error::{CreateError, ProgrammerError};
pub use function::{BasicBlock, FuncSyntax, Function, FunctionId, Local, Origin};
pub use member::{Const, Global, Member, NamedConst, TypeMember};
pub use mode::BuilderMode;
pub use package::{BuiltValue, Package, PackageId};
pub use program::{Builtin, ObjectKey, Program};
pub use sanity::check_package;
pub use scope::{NameScope, Scope, ScopeId, ScopeNode};
