use super::value::Value;

/// Control and inspection hooks the execution engine offers the debugger.
pub trait Engine {
    /// Suspend at every instruction.
    fn step_into(&mut self);
    /// Suspend at statement boundaries no deeper than `depth` frames.
    fn step_over(&mut self, depth: usize);
    /// Suspend when the frame at stack size `depth` returns.
    fn step_out(&mut self, depth: usize);
    /// Run until a breakpoint or panic.
    fn run(&mut self);

    fn set_instruction_tracing(&mut self, on: bool);

    /// Current value stored in the package-level variable `package.name`.
    fn global(&self, package: &str, name: &str) -> Option<Value>;

    /// Every package-level variable as `(qualified name, value)`.
    fn globals(&self) -> Vec<(String, Value)>;

    /// The innermost frame's environment as `(name, value)`.
    fn env(&self) -> Vec<(String, Value)> {
        Vec::new()
    }
}
