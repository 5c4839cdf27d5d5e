//! CPU core trait.

/// A CPU core.
///
/// CPUs execute one whole instruction per `step()`. The CPU owns its bus,
/// so a single value holds the complete machine state and no other
/// component can mutate it between steps.
///
/// CPUs expose their internal state for observation and debugging.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Fault raised when an instruction cannot be executed.
    type Error;

    /// Execute exactly one instruction.
    fn step(&mut self) -> Result<(), Self::Error>;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU has stopped on a fault.
    fn is_halted(&self) -> bool;

    /// Reset the CPU to its initial state.
    fn reset(&mut self);
}
