//! Name lookup across locals, parameters, package members and packages.
//!
//! Domains are searched in that order and the first one that knows the
//! name wins; a later domain is never consulted once an earlier one matches.

use super::error::ResolveError;
use crate::interp::{Engine, Frame, Value};
use crate::ssa::{
    Function, Global, Local, Member, NamedConst, Package, Program, ScopeId, TypeMember,
};
use crate::types::Var;

#[derive(Debug, Clone, Copy)]
pub enum Resolved<'p> {
    Local { slot: usize, local: &'p Local },
    Param { index: usize, param: &'p Var },
    Function(&'p Function),
    Global { package: &'p Package, global: &'p Global },
    Const { package: &'p Package, constant: &'p NamedConst },
    Type { package: &'p Package, ty: &'p TypeMember },
    Package(&'p Package),
}

impl<'p> Resolved<'p> {
    /// The runtime value behind a resolved name, where it has one.
    pub fn value(&self, frame: &Frame, engine: &dyn Engine) -> Option<Value> {
        match self {
            Resolved::Local { slot, .. } => frame.local(*slot).cloned(),
            Resolved::Param { index, .. } => frame.param(*index).cloned(),
            Resolved::Global { package, global } => engine
                .global(package.path(), &global.name)
                .map(|v| v.deref().clone()),
            Resolved::Const { constant, .. } => Some(Value::from(&constant.value.value)),
            Resolved::Function(_) | Resolved::Type { .. } | Resolved::Package(_) => None,
        }
    }
}

/// Slot of the local `name` visible from `scope`; the nearest enclosing
/// declaration wins.
pub fn lookup_local(
    pkg: &Package,
    function: &Function,
    scope: Option<ScopeId>,
    name: &str,
) -> Option<usize> {
    let start = scope.or_else(|| function.scope())?;
    pkg.ancestors(start)
        .find_map(|s| function.local_slot(name, s))
}

/// Resolves `name` as seen from `function` with `scope` current.
pub fn resolve<'p>(
    program: &'p Program,
    function: &'p Function,
    scope: Option<ScopeId>,
    name: &str,
) -> Result<Resolved<'p>, ResolveError> {
    let pkg = program
        .package(function.package())
        .ok_or_else(|| ResolveError::NotFound(name.to_string()))?;

    if let Some((qualifier, member)) = name.split_once('.') {
        if lookup_local(pkg, function, scope, qualifier).is_some() {
            return Err(ResolveError::DottedLocal(qualifier.to_string()));
        }
        let target = program
            .package_by_name(qualifier)
            .ok_or_else(|| ResolveError::NotFound(qualifier.to_string()))?;
        return resolve_member(program, target, member).ok_or_else(|| ResolveError::NotAMember {
            name: member.to_string(),
            package: target.path().to_string(),
        });
    }

    if let Some(slot) = lookup_local(pkg, function, scope, name) {
        if let Some(local) = function.local(slot) {
            return Ok(Resolved::Local { slot, local });
        }
    }

    if let Some((index, param)) = function
        .params()
        .iter()
        .enumerate()
        .find(|(_, p)| p.name == name)
    {
        return Ok(Resolved::Param { index, param });
    }

    if let Some(resolved) = resolve_member(program, pkg, name) {
        return Ok(resolved);
    }

    program
        .package_by_name(name)
        .map(Resolved::Package)
        .ok_or_else(|| ResolveError::NotFound(name.to_string()))
}

fn resolve_member<'p>(
    program: &'p Program,
    package: &'p Package,
    name: &str,
) -> Option<Resolved<'p>> {
    match package.member(name)? {
        Member::Function { id, .. } => program.function(*id).map(Resolved::Function),
        Member::Global(global) => Some(Resolved::Global { package, global }),
        Member::Const(constant) => Some(Resolved::Const { package, constant }),
        Member::Type(ty) => Some(Resolved::Type { package, ty }),
    }
}
