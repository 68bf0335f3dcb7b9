//! Human-readable descriptions of locals, parameters and package members.

use super::commands::Flow;
use super::error::CommandError;
use super::resolver::{lookup_local, resolve, Resolved};
use super::session::Session;
use crate::interp::{Frame, Value};
use crate::ssa::{Function, Global, NamedConst, Package, TypeMember};
use std::io;

/// Lays `items` out in columns, filling each column top to bottom.
pub fn columnize(items: &[String], width: usize) -> String {
    if items.is_empty() {
        return String::new();
    }
    let col_width = items.iter().map(String::len).max().unwrap_or(0) + 2;
    let cols = (width / col_width).max(1);
    let rows = items.len().div_ceil(cols);

    let mut out = String::new();
    for r in 0..rows {
        let line: String = (0..cols)
            .filter_map(|c| items.get(c * rows + r))
            .map(|item| format!("{:<w$}", item, w = col_width))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn print_local(
    s: &mut Session<'_>,
    frame: &Frame,
    function: &Function,
    slot: usize,
) -> io::Result<()> {
    let Some(local) = function.local(slot) else {
        return Ok(());
    };
    let value = Resolved::Local { slot, local }
        .value(frame, &*s.engine)
        .unwrap_or(Value::Nil);
    let scope = format!(" scope {}", local.scope.0);
    let ty = local.ty.deref();
    match frame.aliases.get(&local.name) {
        Some(alias) if local.name.starts_with('t') => s.msg(format_args!(
            "{:3}:\t{} {} ({}) = {}{} {}",
            slot, alias, local.name, ty, value, scope, local.span
        )),
        _ => s.msg(format_args!(
            "{:3}:\t{} {} = {}{} {}",
            slot, local.name, ty, value, scope, local.span
        )),
    }
}

fn print_param(
    s: &mut Session<'_>,
    frame: &Frame,
    function: &Function,
    index: usize,
) -> io::Result<()> {
    let Some(param) = function.params().get(index) else {
        return Ok(());
    };
    match (Resolved::Param { index, param }).value(frame, &*s.engine) {
        Some(v) => s.msg(format_args!("{} {}", param, v)),
        None => s.msg(format_args!("{} nil", param)),
    }
}

pub fn print_func_info(s: &mut Session<'_>, function: &Function) -> io::Result<()> {
    let program = s.program;
    s.msg(format_args!("{} is a function at:", program.qualified_name(function)))?;
    if function.span().is_known() {
        s.msg(format_args!("\t{}", function.span()))?;
    } else {
        s.msg(format_args!("\tsynthetic function (no position)"))?;
    }
    if let Some(reason) = function.synthetic_reason() {
        s.msg(format_args!("\t# Synthetic: {}", reason))?;
    }

    for p in function.params() {
        s.msg(format_args!("\t{}", p))?;
    }
    for r in function.signature().named_results() {
        s.msg(format_args!("\t{}", r))?;
    }

    if let Some(parent) = function.enclosing().and_then(|id| program.function(id)) {
        s.section(&format!("Parent: {}", parent.name()))?;
    }

    if !function.free_vars().is_empty() {
        s.section("Free variables:")?;
        for (i, fv) in function.free_vars().iter().enumerate() {
            s.msg(format_args!("{:3}:\t{} {}", i, fv.name, fv.ty))?;
        }
    }

    if !function.locals().is_empty() {
        s.section("Locals:")?;
        for (i, l) in function.locals().iter().enumerate() {
            s.msg(format_args!(" {:3}:\t{} {}", i, l.name, l.ty.deref()))?;
        }
    }

    if function.blocks().is_none() {
        s.msg(format_args!("\t(external)"))?;
    }
    Ok(())
}

pub fn print_const_info(s: &mut Session<'_>, constant: &NamedConst) -> io::Result<()> {
    s.msg(format_args!("Constant {} is a constant at:", constant.name))?;
    s.msg(format_args!("\t{}", constant.value.span))?;
    s.msg(format_args!("\t{}", constant.value))
}

pub fn print_global_info(
    s: &mut Session<'_>,
    package: &Package,
    global: &Global,
    value: Option<Value>,
) -> io::Result<()> {
    s.msg(format_args!("{} is a variable in {} at:", global.name, package))?;
    s.msg(format_args!("  {}", global.span))?;
    s.msg(format_args!("  {}", global.ty))?;
    if let Some(v) = value {
        s.msg(format_args!("  {}", v))?;
    }
    Ok(())
}

pub fn print_type_info(s: &mut Session<'_>, package: &Package, ty: &TypeMember) -> io::Result<()> {
    s.msg(format_args!("Type {} at:", ty.ty))?;
    match &ty.pos {
        Some(pos) => s.msg(format_args!("  {}", pos))?,
        None => s.msg(format_args!("  -"))?,
    }
    s.msg(format_args!("  {}", ty.underlying))?;
    let program = s.program;
    for method in program.methods_of(package.path(), &ty.name) {
        s.msg(format_args!("    method {} func{}", method.name(), method.signature()))?;
    }
    Ok(())
}

pub fn print_package_info(s: &mut Session<'_>, name: &str, package: &Package) -> io::Result<()> {
    let mut line = format!("{} is a package", name);

    let mut files = package
        .members()
        .values()
        .filter_map(|m| member_file(package, m));
    if let Some(first) = files.next() {
        let first = first.to_string();
        let location = if files.all(|f| f == first) {
            first
        } else {
            std::path::Path::new(&first)
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or(first)
        };
        line.push_str(": at ");
        line.push_str(&location);
    }
    s.msg(format_args!("{}", line))?;

    if !package.members().is_empty() {
        let names: Vec<String> = package.members().keys().cloned().collect();
        s.section("Members")?;
        let listing = columnize(&names, s.config.width);
        s.out.write_all(listing.as_bytes())?;
    }
    Ok(())
}

fn member_file<'p>(package: &'p Package, member: &'p crate::ssa::Member) -> Option<&'p str> {
    use crate::ssa::Member;
    match member {
        Member::Type(t) => t.pos.as_ref().map(|p| p.file.as_str()),
        Member::Const(c) => c.value.span.file(),
        Member::Global(g) => g.span.file(),
        Member::Function { id, .. } => package.function(*id).and_then(|f| f.span().file()),
    }
}

/// Prints whatever `name` resolves to from the selected frame.
pub fn whatis_name(s: &mut Session<'_>, name: &str) -> Result<(), CommandError> {
    let (frame, function) = s.frame_and_function()?;
    let resolved = resolve(s.program, function, s.scope(), name)?;
    match resolved {
        Resolved::Local { slot, .. } => print_local(s, frame, function, slot)?,
        Resolved::Param { index, .. } => print_param(s, frame, function, index)?,
        Resolved::Function(f) => print_func_info(s, f)?,
        Resolved::Global { package, global } => {
            let value = resolved.value(frame, &*s.engine);
            print_global_info(s, package, global, value)?
        }
        Resolved::Const { constant, .. } => print_const_info(s, constant)?,
        Resolved::Type { package, ty } => print_type_info(s, package, ty)?,
        Resolved::Package(package) => print_package_info(s, name, package)?,
    }
    Ok(())
}

/// locals [name]
pub(crate) fn locals(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let (frame, function) = s.frame_and_function()?;
    match args.get(1) {
        None => {
            for slot in 0..function.locals().len() {
                print_local(s, frame, function, slot)?;
            }
            let mut aliases: Vec<_> = frame.aliases.iter().collect();
            aliases.sort();
            for (reg, var) in aliases {
                s.msg(format_args!("reg {}, var {}", reg, var))?;
            }
        }
        Some(name) => {
            let program = s.program;
            let pkg = program
                .package(function.package())
                .ok_or(CommandError::NoFrame)?;
            let slot = lookup_local(pkg, function, s.scope(), name)
                .ok_or_else(|| CommandError::NoSuchLocal(name.clone()))?;
            print_local(s, frame, function, slot)?;
        }
    }
    Ok(Flow::Continue)
}

/// parameters [name]
pub(crate) fn parameters(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let (frame, function) = s.frame_and_function()?;
    match args.get(1) {
        None => {
            for index in 0..function.params().len() {
                print_param(s, frame, function, index)?;
            }
        }
        Some(name) => {
            let index = function
                .params()
                .iter()
                .position(|p| &p.name == name)
                .ok_or_else(|| CommandError::NoSuchParam(name.clone()))?;
            print_param(s, frame, function, index)?;
        }
    }
    Ok(Flow::Continue)
}

/// globals [name...]
pub(crate) fn globals(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    if args.len() == 1 {
        let mut all = s.engine.globals();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, value) in all {
            s.msg(format_args!("{}: {}", name, value.deref()))?;
        }
        return Ok(Flow::Continue);
    }

    let home = s.current_package().map(|p| p.path().to_string());
    let mut missing = None;
    for name in &args[1..] {
        let (pkg, var) = match name.split_once('.') {
            Some((qualifier, var)) => (
                s.program
                    .package_by_name(qualifier)
                    .map(|p| p.path().to_string()),
                var,
            ),
            None => (home.clone(), name.as_str()),
        };
        match pkg.and_then(|pkg| s.engine.global(&pkg, var)) {
            Some(v) => s.msg(format_args!("{}: {}", name, v.deref()))?,
            None => {
                missing.get_or_insert_with(|| name.clone());
            }
        }
    }
    match missing {
        Some(name) => Err(CommandError::NoSuchGlobal(name)),
        None => Ok(Flow::Continue),
    }
}

/// whatis NAME
pub(crate) fn whatis(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    whatis_name(s, &args[1])?;
    Ok(Flow::Continue)
}

/// env
pub(crate) fn env(s: &mut Session<'_>, _args: &[String]) -> Result<Flow, CommandError> {
    for (i, (name, value)) in s.engine.env().into_iter().enumerate() {
        s.msg(format_args!("{} {} = {}", i, name, value))?;
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columnize_fills_columns_first() {
        let items: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        assert_eq!(columnize(&items, 9), "a  c  e\nb  d\n");
        assert_eq!(columnize(&items, 1), "a\nb\nc\nd\ne\n");
        assert_eq!(columnize(&[], 80), "");
    }
}
