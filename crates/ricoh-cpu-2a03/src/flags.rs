//! 2A03 processor status register (P).
//!
//! Layout, most significant bit first: `NV-BDIZC`.

/// Carry flag - set if an addition carried out of bit 7, or a subtraction
/// did not borrow.
pub const C: u8 = 0x01;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x02;

/// Interrupt disable.
pub const I: u8 = 0x04;

/// Decimal mode. Stored and restored, but the 2A03 has no BCD unit so it
/// never changes arithmetic.
pub const D: u8 = 0x08;

/// Break flag - only meaningful in copies of P pushed by BRK and PHP.
pub const B: u8 = 0x10;

/// Unused bit - always reads as 1.
pub const U: u8 = 0x20;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x40;

/// Negative flag - set if result has bit 7 set.
pub const N: u8 = 0x80;

/// Processor status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub u8);

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

impl Status {
    /// Power-up status: unused bit and interrupt disable set.
    #[must_use]
    pub const fn new() -> Self {
        Self(U | I)
    }

    /// Status pulled from the stack by PLP or RTI.
    ///
    /// The break bit does not exist inside the CPU, so it is dropped; the
    /// unused bit always reads back as 1.
    #[must_use]
    pub const fn from_stack(value: u8) -> Self {
        Self((value | U) & !B)
    }

    /// Value pushed by BRK and PHP (break and unused both set).
    #[must_use]
    pub const fn to_stack(self) -> u8 {
        self.0 | U | B
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    /// Update N and Z flags based on a value.
    pub fn update_nz(&mut self, value: u8) {
        self.set_if(N, crate::alu::negative(value));
        self.set_if(Z, crate::alu::zero(value));
    }
}
