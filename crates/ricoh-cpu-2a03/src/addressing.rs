//! Addressing mode resolution.
//!
//! Resolution runs with PC still pointing at the opcode, so operand bytes
//! live at PC+1 and PC+2. Every mode yields a tagged [`Operand`]:
//!
//! - Implied / Accumulator: no memory access
//! - Immediate: the address of the operand byte itself
//! - Zero Page,X / ,Y: base + index, wrapping within page zero
//! - Absolute,X / ,Y: base + index, wrapping at $FFFF
//! - Indirect: JMP only, pointer high byte fetched from the same page
//! - ($nn,X) / ($nn),Y: pointer read from page zero, wrapping within it
//! - Relative: signed displacement, applied by the branch itself

use emu_core::Bus;

use crate::cpu::Ricoh2A03;
use crate::decode::AddressingMode;

/// Where an instruction's operand lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// No operand.
    Implied,
    /// The accumulator.
    Accumulator,
    /// Effective address in memory.
    Address(u16),
    /// Branch displacement, relative to the next instruction.
    Offset(i8),
}

impl<M: Bus> Ricoh2A03<M> {
    /// Resolve the operand for `mode` relative to the current PC.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Operand {
        let arg = self.regs.pc.wrapping_add(1);
        match mode {
            AddressingMode::Implied | AddressingMode::Invalid => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Address(arg),
            AddressingMode::ZeroPage => Operand::Address(u16::from(self.memory.read(arg))),
            AddressingMode::ZeroPageX => {
                let base = self.memory.read(arg);
                Operand::Address(u16::from(base.wrapping_add(self.regs.x)))
            }
            AddressingMode::ZeroPageY => {
                let base = self.memory.read(arg);
                Operand::Address(u16::from(base.wrapping_add(self.regs.y)))
            }
            AddressingMode::Absolute => Operand::Address(self.memory.read_word(arg)),
            AddressingMode::AbsoluteX => {
                let base = self.memory.read_word(arg);
                Operand::Address(base.wrapping_add(u16::from(self.regs.x)))
            }
            AddressingMode::AbsoluteY => {
                let base = self.memory.read_word(arg);
                Operand::Address(base.wrapping_add(u16::from(self.regs.y)))
            }
            AddressingMode::Relative => Operand::Offset(self.memory.read(arg) as i8),
            AddressingMode::Indirect => {
                let pointer = self.memory.read_word(arg);
                Operand::Address(self.read_word_page_wrap(pointer))
            }
            AddressingMode::IndexedIndirect => {
                let pointer = self.memory.read(arg).wrapping_add(self.regs.x);
                Operand::Address(self.read_zero_page_word(pointer))
            }
            AddressingMode::IndirectIndexed => {
                let pointer = self.memory.read(arg);
                let base = self.read_zero_page_word(pointer);
                Operand::Address(base.wrapping_add(u16::from(self.regs.y)))
            }
        }
    }

    /// Read a word with the NMOS JMP ($xxFF) bug: the high byte comes from
    /// $xx00, not the next page.
    fn read_word_page_wrap(&mut self, address: u16) -> u16 {
        let lo = self.memory.read(address);
        let hi_addr = (address & 0xFF00) | (address.wrapping_add(1) & 0x00FF);
        let hi = self.memory.read(hi_addr);
        u16::from_le_bytes([lo, hi])
    }

    /// Read a pointer from page zero. $FF wraps to $00 for the high byte.
    fn read_zero_page_word(&mut self, pointer: u8) -> u16 {
        let lo = self.memory.read(u16::from(pointer));
        let hi = self.memory.read(u16::from(pointer.wrapping_add(1)));
        u16::from_le_bytes([lo, hi])
    }

    /// Push a byte onto the stack.
    pub(crate) fn push(&mut self, value: u8) {
        let address = self.regs.push();
        self.memory.write(address, value);
    }

    /// Pull a byte from the stack.
    pub(crate) fn pull(&mut self) -> u8 {
        let address = self.regs.pull();
        self.memory.read(address)
    }

    /// Push a word, high byte first.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    /// Pull a word, low byte first.
    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull();
        let hi = self.pull();
        u16::from_le_bytes([lo, hi])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::SimpleBus;

    fn cpu_with(program: &[u8]) -> Ricoh2A03<SimpleBus> {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, program);
        let mut cpu = Ricoh2A03::new(bus);
        cpu.regs.pc = 0x0200;
        cpu
    }

    #[test]
    fn immediate_points_at_operand_byte() {
        let mut cpu = cpu_with(&[0xA9, 0x42]);
        assert_eq!(
            cpu.resolve(AddressingMode::Immediate),
            Operand::Address(0x0201)
        );
    }

    #[test]
    fn zero_page_x_wraps() {
        let mut cpu = cpu_with(&[0xB5, 0xF0]);
        cpu.regs.x = 0x20;
        assert_eq!(
            cpu.resolve(AddressingMode::ZeroPageX),
            Operand::Address(0x0010)
        );
    }

    #[test]
    fn zero_page_y_wraps() {
        let mut cpu = cpu_with(&[0xB6, 0xFF]);
        cpu.regs.y = 0x01;
        assert_eq!(
            cpu.resolve(AddressingMode::ZeroPageY),
            Operand::Address(0x0000)
        );
    }

    #[test]
    fn absolute_x_wraps_at_top_of_memory() {
        let mut cpu = cpu_with(&[0xBD, 0xFF, 0xFF]);
        cpu.regs.x = 0x02;
        assert_eq!(
            cpu.resolve(AddressingMode::AbsoluteX),
            Operand::Address(0x0001)
        );
    }

    #[test]
    fn relative_is_signed() {
        let mut cpu = cpu_with(&[0xD0, 0xFE]);
        assert_eq!(cpu.resolve(AddressingMode::Relative), Operand::Offset(-2));
    }

    #[test]
    fn indirect_high_byte_stays_in_page() {
        let mut cpu = cpu_with(&[0x6C, 0xFF, 0x30]);
        cpu.memory_mut().write(0x30FF, 0x80);
        cpu.memory_mut().write(0x3000, 0x50);
        cpu.memory_mut().write(0x3100, 0x40);
        assert_eq!(
            cpu.resolve(AddressingMode::Indirect),
            Operand::Address(0x5080)
        );
    }

    #[test]
    fn indexed_indirect_pointer_wraps_in_zero_page() {
        let mut cpu = cpu_with(&[0xA1, 0xFE]);
        cpu.regs.x = 0x01;
        cpu.memory_mut().write(0x00FF, 0x34);
        cpu.memory_mut().write(0x0000, 0x12);
        assert_eq!(
            cpu.resolve(AddressingMode::IndexedIndirect),
            Operand::Address(0x1234)
        );
    }

    #[test]
    fn indirect_indexed_adds_y_after_lookup() {
        let mut cpu = cpu_with(&[0xB1, 0xFF]);
        cpu.regs.y = 0x10;
        cpu.memory_mut().write(0x00FF, 0xF8);
        cpu.memory_mut().write(0x0000, 0x40);
        assert_eq!(
            cpu.resolve(AddressingMode::IndirectIndexed),
            Operand::Address(0x4108)
        );
    }

    #[test]
    fn stack_word_round_trip() {
        let mut cpu = cpu_with(&[]);
        let s = cpu.regs.s;
        cpu.push_word(0xBEEF);
        assert_eq!(cpu.regs.s, s.wrapping_sub(2));
        assert_eq!(cpu.memory().peek(0x0100 | u16::from(s)), 0xBE);
        assert_eq!(cpu.pull_word(), 0xBEEF);
        assert_eq!(cpu.regs.s, s);
    }
}
