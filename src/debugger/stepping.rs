/// Granularity at which execution suspends again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// Every instruction.
    Into,
    /// Statement boundaries in frames no deeper than `depth`.
    Over { depth: usize },
    /// Return from the frame that sat at stack size `depth`.
    Out { depth: usize },
    /// Only breakpoints and panics.
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Paused,
    Stepping(StepMode),
    Terminated,
}
