use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,
}

impl BasicKind {
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::UnsafePointer => "unsafe.Pointer",
            BasicKind::UntypedBool => "untyped bool",
            BasicKind::UntypedInt => "untyped integer",
            BasicKind::UntypedRune => "untyped rune",
            BasicKind::UntypedFloat => "untyped float",
            BasicKind::UntypedComplex => "untyped complex",
            BasicKind::UntypedString => "untyped string",
            BasicKind::UntypedNil => "untyped nil",
        }
    }
}

/// A named, typed slot: parameter, result, field or tuple element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Var {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.name, self.ty)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub recv: Option<Var>,
    #[serde(default)]
    pub params: Vec<Var>,
    #[serde(default)]
    pub results: Vec<Var>,
    #[serde(default)]
    pub variadic: bool,
}

impl Signature {
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Results that carry a name, as Go's named result parameters.
    pub fn named_results(&self) -> impl Iterator<Item = &Var> {
        self.results.iter().filter(|r| !r.name.is_empty())
    }

    pub fn results_tuple(&self) -> Type {
        Type::Tuple {
            vars: self.results.clone(),
        }
    }

    fn write_params(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let last = i + 1 == self.params.len();
            match (&p.ty, self.variadic && last) {
                (Type::Slice { elem }, true) if p.name.is_empty() => write!(f, "...{}", elem)?,
                (Type::Slice { elem }, true) => write!(f, "{} ...{}", p.name, elem)?,
                _ => write!(f, "{}", p)?,
            }
        }
        f.write_str(")")
    }
}

/// Renders as Go writes a signature, without the `func` keyword or receiver.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_params(f)?;
        match self.results.as_slice() {
            [] => Ok(()),
            [only] if only.name.is_empty() => write!(f, " {}", only.ty),
            results => {
                f.write_str(" (")?;
                for (i, r) in results.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", r)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Type as reported by the type checker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Basic { basic: BasicKind },
    Named { package: String, name: String },
    Pointer { elem: Box<Type> },
    Slice { elem: Box<Type> },
    Map { key: Box<Type>, value: Box<Type> },
    Func { sig: Box<Signature> },
    Tuple { vars: Vec<Var> },
    Struct { fields: Vec<Var> },
    Interface { methods: Vec<String> },
}

impl Type {
    pub fn basic(basic: BasicKind) -> Self {
        Type::Basic { basic }
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        Type::Named {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn func(sig: Signature) -> Self {
        Type::Func { sig: Box::new(sig) }
    }

    /// A pointer's element type; otherwise the type itself.
    pub fn deref(&self) -> &Type {
        match self {
            Type::Pointer { elem } => elem,
            other => other,
        }
    }

    /// The named type behind `T` or `*T`, as `(package, name)`.
    pub fn named_base(&self) -> Option<(&str, &str)> {
        match self.deref() {
            Type::Named { package, name } => Some((package, name)),
            _ => None,
        }
    }

    pub fn as_signature(&self) -> Option<&Signature> {
        match self {
            Type::Func { sig } => Some(sig),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic { basic } => f.write_str(basic.name()),
            Type::Named { package, name } if package.is_empty() => f.write_str(name),
            Type::Named { package, name } => write!(f, "{}.{}", package, name),
            Type::Pointer { elem } => write!(f, "*{}", elem),
            Type::Slice { elem } => write!(f, "[]{}", elem),
            Type::Map { key, value } => write!(f, "map[{}]{}", key, value),
            Type::Func { sig } => write!(f, "func{}", sig),
            Type::Tuple { vars } => {
                f.write_str("(")?;
                for (i, v) in vars.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str(")")
            }
            Type::Struct { fields } => {
                f.write_str("struct{")?;
                for (i, v) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("}")
            }
            Type::Interface { methods } => {
                f.write_str("interface{")?;
                for (i, m) in methods.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}()", m)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_render_like_go() {
        let int = Type::basic(BasicKind::Int);
        let err = Type::named("", "error");
        let sig = Signature {
            params: vec![Var::new("a", Type::Slice { elem: Box::new(int.clone()) })],
            results: vec![Var::new("n", int.clone()), Var::new("err", err)],
            variadic: true,
            ..Default::default()
        };
        assert_eq!(Type::func(sig).to_string(), "func(a ...int) (n int, err error)");
        assert_eq!(Type::func(Signature::default()).to_string(), "func()");
    }

    #[test]
    fn named_base_looks_through_one_pointer() {
        let t = Type::pointer(Type::named("main", "T"));
        assert_eq!(t.named_base(), Some(("main", "T")));
        assert_eq!(Type::basic(BasicKind::Int).named_base(), None);
    }
}
