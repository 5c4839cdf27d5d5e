//! CPU faults.

use std::fmt;

/// Fault raised while stepping the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The byte at `pc` has no documented meaning. The CPU halts with its
    /// registers untouched.
    InvalidOpcode { opcode: u8, pc: u16 },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOpcode { opcode, pc } => {
                write!(f, "invalid opcode ${opcode:02X} at ${pc:04X}")
            }
        }
    }
}

impl std::error::Error for CpuError {}
