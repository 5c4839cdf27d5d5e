//! Flag algebra for the 2A03.
//!
//! Pure functions: they take operands and return the result together with
//! the flag outputs. The execution engine decides which flags to commit.

/// Result of an arithmetic or compare operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    /// Low 8 bits of the result.
    pub value: u8,
    /// Bit 8 of the 9-bit result (no-borrow for subtraction and compares).
    pub carry: bool,
    /// Signed overflow. Always false for compares.
    pub overflow: bool,
}

/// Zero flag: result byte is zero.
#[must_use]
pub const fn zero(value: u8) -> bool {
    value == 0
}

/// Negative flag: bit 7 of the result.
#[must_use]
pub const fn negative(value: u8) -> bool {
    value & 0x80 != 0
}

/// Two's-complement overflow: both operands share a sign that the result
/// does not.
#[must_use]
pub const fn overflow(a: u8, operand: u8, result: u8) -> bool {
    (a ^ operand) & 0x80 == 0 && (a ^ result) & 0x80 != 0
}

/// ADC: binary add with carry in. Decimal mode is not wired on the 2A03.
#[must_use]
pub fn add(a: u8, operand: u8, carry_in: bool) -> AluResult {
    let sum = u16::from(a) + u16::from(operand) + u16::from(carry_in);
    let value = sum as u8;
    AluResult {
        value,
        carry: sum > 0xFF,
        overflow: overflow(a, operand, value),
    }
}

/// SBC: add of the one's complement, so carry in means "no borrow".
#[must_use]
pub fn subtract(a: u8, operand: u8, carry_in: bool) -> AluResult {
    add(a, !operand, carry_in)
}

/// CMP/CPX/CPY: subtraction without borrow whose result is discarded.
#[must_use]
pub fn compare(register: u8, operand: u8) -> AluResult {
    AluResult {
        value: register.wrapping_sub(operand),
        carry: register >= operand,
        overflow: false,
    }
}
