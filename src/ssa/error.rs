use thiserror::Error;

/// Violations of CREATE's preconditions. These abort: CREATE assumes
/// input that the type checker has already validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgrammerError {
    #[error("package {package} has errors: {error}")]
    TypeErrors { package: String, error: String },

    #[error("identifier {0} was not resolved to an object")]
    Unresolved(String),

    #[error("unexpected object {name} ({kind}) in member construction")]
    UnexpectedObject { name: String, kind: &'static str },

    #[error("unexpected {found} specification in a {decl} declaration")]
    UnexpectedSpec { decl: &'static str, found: &'static str },

    #[error("receiver of method {method} is not a declared named type: {receiver}")]
    BadReceiver { method: String, receiver: String },

    #[error("sanity check failed for package {package}:\n{problems}")]
    SanityCheck { package: String, problems: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateError {
    #[error("couldn't create these packages due to type errors: {}", .0.join(", "))]
    TypeErrors(Vec<String>),
}
