//! 2A03 CPU registers.

use crate::Status;

/// Base address of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// 2A03 CPU register set.
///
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - S: 8-bit stack pointer (stack is at $0100-$01FF)
/// - PC: 16-bit program counter
/// - P: 8-bit processor status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (points to next free location).
    pub s: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status flags.
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Registers as they stand after reset, before PC is loaded from the
    /// reset vector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0xFD,
            pc: 0,
            p: Status::new(),
        }
    }

    /// Claim the next stack slot for a push and return its address.
    pub fn push(&mut self) -> u16 {
        let addr = STACK_PAGE | u16::from(self.s);
        self.s = self.s.wrapping_sub(1);
        addr
    }

    /// Release the top stack slot for a pull and return its address.
    pub fn pull(&mut self) -> u16 {
        self.s = self.s.wrapping_add(1);
        STACK_PAGE | u16::from(self.s)
    }
}
