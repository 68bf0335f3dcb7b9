use super::function::Function;
use super::package::Package;
use super::program::Program;
use log::warn;
use std::collections::HashSet;

/// Checks every function of `pkg` for internal consistency, returning
/// one line per problem found.
pub fn check_package(program: &Program, pkg: &Package) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();
    for (_, f) in pkg.functions() {
        check_function(program, pkg, f, &mut problems);
    }
    if problems.is_empty() {
        Ok(())
    } else {
        for p in &problems {
            warn!("{}", p);
        }
        Err(problems)
    }
}

fn check_function(program: &Program, pkg: &Package, f: &Function, problems: &mut Vec<String>) {
    let name = program.qualified_name(f);

    let mut seen = HashSet::new();
    for p in f.params().iter().filter(|p| !p.name.is_empty() && p.name != "_") {
        if !seen.insert(p.name.as_str()) {
            problems.push(format!("{}: duplicate parameter {}", name, p.name));
        }
    }

    for (i, local) in f.locals().iter().enumerate() {
        if local.slot != i {
            problems.push(format!(
                "{}: local {} has slot {}, expected {}",
                name, local.name, local.slot, i
            ));
        }
        if f.local_slot(&local.name, local.scope) != Some(i) {
            problems.push(format!(
                "{}: local {} is missing from the name table",
                name, local.name
            ));
        }
        if pkg.scope(local.scope).is_none() {
            problems.push(format!(
                "{}: local {} refers to unknown scope {}",
                name, local.name, local.scope.0
            ));
        }
    }
    if f.locals_by_name().len() != f.locals().len() {
        problems.push(format!("{}: name table and locals differ in size", name));
    }

    if let Some(scope) = f.scope() {
        if pkg.scope(scope).is_none() {
            problems.push(format!("{}: unknown scope {}", name, scope.0));
        }
    }

    if let Some(parent) = f.enclosing() {
        if program.function(parent).is_none() && pkg.function(parent).is_none() {
            problems.push(format!("{}: enclosing function does not exist", name));
        }
    }

    if let Some(blocks) = f.blocks() {
        for (i, b) in blocks.iter().enumerate() {
            if b.index != i {
                problems.push(format!("{}: block {} has index {}", name, i, b.index));
            }
        }
    }
}
