use super::function::{Function, FunctionId};
use super::mode::BuilderMode;
use super::package::{Package, PackageId};
use crate::types::{Object, ObjectId, Signature, Var};
use std::collections::{BTreeMap, HashMap};

/// Universe-scope builtin functions.
const BUILTINS: &[&str] = &[
    "append", "cap", "close", "complex", "copy", "delete", "imag", "len", "make", "new", "panic",
    "print", "println", "real", "recover",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builtin {
    pub name: String,
}

/// A typed object qualified by the package it was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub package: PackageId,
    pub object: ObjectId,
}

#[derive(Debug, Default)]
pub struct Program {
    packages: Vec<Package>,
    by_identity: HashMap<String, PackageId>,
    by_path: HashMap<String, PackageId>,
    by_name: HashMap<String, PackageId>,
    builtins: BTreeMap<String, Builtin>,
    concrete_methods: HashMap<ObjectKey, FunctionId>,
    bound_method_wrappers: HashMap<ObjectKey, FunctionId>,
    iface_method_wrappers: HashMap<ObjectKey, FunctionId>,
    mode: BuilderMode,
}

impl Program {
    pub fn new(mode: BuilderMode) -> Self {
        let builtins = BUILTINS
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    Builtin {
                        name: name.to_string(),
                    },
                )
            })
            .collect();
        Self {
            builtins,
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> BuilderMode {
        self.mode
    }

    pub fn builtin(&self, name: &str) -> Option<&Builtin> {
        self.builtins.get(name)
    }

    pub fn builtins(&self) -> impl Iterator<Item = &Builtin> {
        self.builtins.values()
    }

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(id.0)
    }

    pub fn package_mut(&mut self, id: PackageId) -> Option<&mut Package> {
        self.packages.get_mut(id.0)
    }

    pub fn all_packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    /// The importable package whose import path is `path`.
    pub fn imported_package(&self, path: &str) -> Option<&Package> {
        self.by_path.get(path).and_then(|id| self.package(*id))
    }

    pub fn package_by_name(&self, name: &str) -> Option<&Package> {
        self.by_name.get(name).and_then(|id| self.package(*id))
    }

    pub fn function(&self, id: FunctionId) -> Option<&Function> {
        self.package(id.package).and_then(|p| p.function(id))
    }

    /// Looks up `pkg.name` among package-level functions.
    pub fn function_by_name(&self, qualified: &str) -> Option<FunctionId> {
        let (pkg, name) = qualified.split_once('.')?;
        let pkg = self.package_by_name(pkg)?;
        pkg.member(name).and_then(|m| m.as_function())
    }

    /// `pkg.name` for functions, `(T).name` for methods.
    pub fn qualified_name(&self, function: &Function) -> String {
        if let Some(recv) = function.receiver() {
            return format!("({}).{}", recv.ty, function.name());
        }
        match self.package(function.package()) {
            Some(pkg) => format!("{}.{}", pkg.name(), function.name()),
            None => function.name().to_string(),
        }
    }

    pub fn concrete_method(&self, method: ObjectKey) -> Option<FunctionId> {
        self.concrete_methods.get(&method).copied()
    }

    pub fn concrete_methods(&self) -> impl Iterator<Item = (&ObjectKey, &FunctionId)> {
        self.concrete_methods.iter()
    }

    /// Concrete methods whose receiver is `T` or `*T` for the named type
    /// `name` declared in package `path`, sorted by method name.
    pub fn methods_of(&self, path: &str, name: &str) -> Vec<&Function> {
        let mut methods: Vec<&Function> = self
            .concrete_methods
            .values()
            .filter_map(|id| self.function(*id))
            .filter(|f| {
                f.receiver().and_then(|r| r.ty.named_base()) == Some((path, name))
            })
            .collect();
        methods.sort_by(|a, b| a.name().cmp(b.name()));
        methods
    }

    /// The wrapper closing over a method's receiver, built on first use.
    pub fn bound_method_wrapper(&mut self, method: ObjectKey) -> Option<FunctionId> {
        if let Some(id) = self.bound_method_wrappers.get(&method) {
            return Some(*id);
        }
        let (name, sig) = self.method_object(method)?;
        let recv = sig.recv.clone()?;
        let signature = Signature {
            recv: None,
            ..sig
        };
        let reason = format!("bound method wrapper for ({}).{}", recv.ty, name);
        let mut wrapper =
            Function::synthetic(format!("{}$bound", name), signature, reason, method.package);
        wrapper.set_free_vars(vec![recv]);
        let id = self.package_mut(method.package)?.push_function(wrapper);
        self.bound_method_wrappers.insert(method, id);
        Some(id)
    }

    /// The wrapper taking the receiver as its first parameter, built on
    /// first use.
    pub fn interface_method_wrapper(&mut self, method: ObjectKey) -> Option<FunctionId> {
        if let Some(id) = self.iface_method_wrappers.get(&method) {
            return Some(*id);
        }
        let (name, sig) = self.method_object(method)?;
        let recv = sig.recv.clone()?;
        let mut params = vec![Var::new("recv", recv.ty.clone())];
        params.extend(sig.params.iter().cloned());
        let signature = Signature {
            recv: None,
            params,
            ..sig
        };
        let reason = format!("interface method wrapper for ({}).{}", recv.ty, name);
        let wrapper = Function::synthetic(name, signature, reason, method.package);
        let id = self.package_mut(method.package)?.push_function(wrapper);
        self.iface_method_wrappers.insert(method, id);
        Some(id)
    }

    fn method_object(&self, method: ObjectKey) -> Option<(String, Signature)> {
        let info = self.package(method.package)?.info()?;
        match info.object(method.object)? {
            Object::Func { name, sig, .. } if sig.recv.is_some() => {
                Some((name.clone(), sig.clone()))
            }
            _ => None,
        }
    }

    pub(crate) fn lookup_identity(&self, path: &str) -> Option<PackageId> {
        self.by_identity.get(path).copied()
    }

    pub(crate) fn next_package_id(&self) -> PackageId {
        PackageId(self.packages.len())
    }

    pub(crate) fn register(&mut self, package: Package) -> PackageId {
        let id = package.id();
        if package.is_importable() {
            self.by_path.insert(package.path().to_string(), id);
        }
        self.by_name.insert(package.name().to_string(), id);
        self.by_identity.insert(package.path().to_string(), id);
        self.packages.push(package);
        id
    }

    pub(crate) fn register_concrete_method(&mut self, method: ObjectKey, function: FunctionId) {
        self.concrete_methods.insert(method, function);
    }
}
