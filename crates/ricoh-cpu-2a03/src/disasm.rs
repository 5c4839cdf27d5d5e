//! Disassembler for trace output and listings.
//!
//! Reads through [`Bus::peek`], so disassembling never disturbs the machine.

use emu_core::Bus;

use crate::decode::{AddressingMode, decode};

/// Disassemble the instruction at `address`.
///
/// Returns the assembly text and the instruction length in bytes.
/// Undocumented opcodes come back as a one-byte `.byte` directive.
#[must_use]
pub fn disassemble<B: Bus + ?Sized>(bus: &B, address: u16) -> (String, u8) {
    let opcode = bus.peek(address);
    let instr = decode(opcode);
    if !instr.is_valid() {
        return (format!(".byte ${opcode:02X}"), 1);
    }

    let lo = bus.peek(address.wrapping_add(1));
    let hi = bus.peek(address.wrapping_add(2));
    let word = u16::from_le_bytes([lo, hi]);

    let operand = match instr.mode {
        AddressingMode::Implied | AddressingMode::Invalid => String::new(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${lo:02X}"),
        AddressingMode::ZeroPage => format!("${lo:02X}"),
        AddressingMode::ZeroPageX => format!("${lo:02X},X"),
        AddressingMode::ZeroPageY => format!("${lo:02X},Y"),
        AddressingMode::Absolute => format!("${word:04X}"),
        AddressingMode::AbsoluteX => format!("${word:04X},X"),
        AddressingMode::AbsoluteY => format!("${word:04X},Y"),
        AddressingMode::Indirect => format!("(${word:04X})"),
        AddressingMode::IndexedIndirect => format!("(${lo:02X},X)"),
        AddressingMode::IndirectIndexed => format!("(${lo:02X}),Y"),
        AddressingMode::Relative => {
            let target = address.wrapping_add(2).wrapping_add(lo as i8 as u16);
            format!("${target:04X}")
        }
    };

    let text = if operand.is_empty() {
        instr.op.to_string()
    } else {
        format!("{} {operand}", instr.op)
    };
    (text, instr.size)
}

/// Raw bytes of the instruction at `address`, as space-separated hex.
#[must_use]
pub fn instruction_bytes<B: Bus + ?Sized>(bus: &B, address: u16) -> String {
    let len = decode(bus.peek(address)).size.max(1);
    (0..u16::from(len))
        .map(|i| format!("{:02X}", bus.peek(address.wrapping_add(i))))
        .collect::<Vec<_>>()
        .join(" ")
}
