use super::value::Value;
use crate::ssa::{FunctionId, ScopeId};
use crate::types::Span;
use std::collections::HashMap;

/// One activation record, owned by the execution engine.
#[derive(Debug, Clone)]
pub struct Frame {
    pub function: FunctionId,
    /// Local values by slot.
    pub locals: Vec<Value>,
    /// Parameter values by position, receiver first.
    pub params: Vec<Value>,
    /// Source names of temporaries, keyed by register name.
    pub aliases: HashMap<String, String>,
    pub block: usize,
    pub pc: usize,
    pub scope: Option<ScopeId>,
    pub span: Span,
    pub result: Option<Value>,
}

impl Frame {
    pub fn new(function: FunctionId) -> Self {
        Self {
            function,
            locals: Vec::new(),
            params: Vec::new(),
            aliases: HashMap::new(),
            block: 0,
            pc: 0,
            scope: None,
            span: Span::default(),
            result: None,
        }
    }

    pub fn local(&self, slot: usize) -> Option<&Value> {
        self.locals.get(slot)
    }

    pub fn param(&self, index: usize) -> Option<&Value> {
        self.params.get(index)
    }
}

/// The call stack, stored outermost first. Depth 0 is the innermost frame.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn frame(&self, depth: usize) -> Option<&Frame> {
        let index = self.frames.len().checked_sub(depth + 1)?;
        self.frames.get(index)
    }

    /// The frame that called the one at `depth`.
    pub fn caller(&self, depth: usize) -> Option<&Frame> {
        self.frame(depth + 1)
    }

    /// Innermost first.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().rev()
    }
}

impl FromIterator<Frame> for CallStack {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}
