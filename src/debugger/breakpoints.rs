use crate::ssa::FunctionId;
use log::info;

/// A function-entry breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    pub id: usize,
    pub function: FunctionId,
    pub location: String,
    pub enabled: bool,
    pub hits: usize,
}

#[derive(Debug, Default)]
pub struct Breakpoints {
    points: Vec<Breakpoint>,
    next_id: usize,
}

impl Breakpoints {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, function: FunctionId, location: impl Into<String>) -> usize {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let location = location.into();
        info!("breakpoint {} set at {}", id, location);
        self.points.push(Breakpoint {
            id,
            function,
            location,
            enabled: true,
            hits: 0,
        });
        id
    }

    pub fn remove(&mut self, id: usize) -> Option<Breakpoint> {
        let index = self.points.iter().position(|b| b.id == id)?;
        info!("breakpoint {} removed", id);
        Some(self.points.remove(index))
    }

    /// Counts a hit on every enabled breakpoint for `function`.
    pub fn hit(&mut self, function: FunctionId) -> bool {
        let mut any = false;
        for b in self
            .points
            .iter_mut()
            .filter(|b| b.enabled && b.function == function)
        {
            b.hits += 1;
            any = true;
        }
        any
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.points.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
