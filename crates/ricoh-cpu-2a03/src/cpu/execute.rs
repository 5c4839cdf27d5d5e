//! Instruction semantics.
//!
//! PC has already been advanced past the instruction when these run, so
//! branches and JSR work from the address of the next instruction.

use emu_core::Bus;

use crate::addressing::Operand;
use crate::alu::{self, AluResult};
use crate::cpu::Ricoh2A03;
use crate::decode::Operation;
use crate::flags::{C, D, I, N, V, Z};
use crate::memory::IRQ_VECTOR;
use crate::Status;

impl<M: Bus> Ricoh2A03<M> {
    pub(super) fn execute(&mut self, op: Operation, operand: Operand) {
        match op {
            // Loads and stores
            Operation::Lda => {
                self.regs.a = self.load(operand);
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Ldx => {
                self.regs.x = self.load(operand);
                self.regs.p.update_nz(self.regs.x);
            }
            Operation::Ldy => {
                self.regs.y = self.load(operand);
                self.regs.p.update_nz(self.regs.y);
            }
            Operation::Sta => self.store(operand, self.regs.a),
            Operation::Stx => self.store(operand, self.regs.x),
            Operation::Sty => self.store(operand, self.regs.y),

            // Arithmetic
            Operation::Adc => {
                let value = self.load(operand);
                let result = alu::add(self.regs.a, value, self.regs.p.is_set(C));
                self.commit_arithmetic(result);
            }
            Operation::Sbc => {
                let value = self.load(operand);
                let result = alu::subtract(self.regs.a, value, self.regs.p.is_set(C));
                self.commit_arithmetic(result);
            }
            Operation::Cmp => self.compare(self.regs.a, operand),
            Operation::Cpx => self.compare(self.regs.x, operand),
            Operation::Cpy => self.compare(self.regs.y, operand),

            // Logical
            Operation::And => {
                let value = self.load(operand);
                self.regs.a &= value;
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Ora => {
                let value = self.load(operand);
                self.regs.a |= value;
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Eor => {
                let value = self.load(operand);
                self.regs.a ^= value;
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Bit => {
                let value = self.load(operand);
                self.regs.p.set_if(Z, self.regs.a & value == 0);
                self.regs.p.set_if(N, value & 0x80 != 0);
                self.regs.p.set_if(V, value & 0x40 != 0);
            }

            // Shifts and rotates
            Operation::Asl => self.modify(operand, |p, v| {
                p.set_if(C, v & 0x80 != 0);
                v << 1
            }),
            Operation::Lsr => self.modify(operand, |p, v| {
                p.set_if(C, v & 0x01 != 0);
                v >> 1
            }),
            Operation::Rol => self.modify(operand, |p, v| {
                let carry_in = u8::from(p.is_set(C));
                p.set_if(C, v & 0x80 != 0);
                (v << 1) | carry_in
            }),
            Operation::Ror => self.modify(operand, |p, v| {
                let carry_in = if p.is_set(C) { 0x80 } else { 0 };
                p.set_if(C, v & 0x01 != 0);
                (v >> 1) | carry_in
            }),

            // Increments and decrements
            Operation::Inc => self.modify(operand, |_, v| v.wrapping_add(1)),
            Operation::Dec => self.modify(operand, |_, v| v.wrapping_sub(1)),
            Operation::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Operation::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
            }
            Operation::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Operation::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
            }

            // Register transfers
            Operation::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
            }
            Operation::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
            }
            Operation::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
            }
            // No flags
            Operation::Txs => self.regs.s = self.regs.x,

            // Branches
            Operation::Bcc => self.branch(operand, !self.regs.p.is_set(C)),
            Operation::Bcs => self.branch(operand, self.regs.p.is_set(C)),
            Operation::Bne => self.branch(operand, !self.regs.p.is_set(Z)),
            Operation::Beq => self.branch(operand, self.regs.p.is_set(Z)),
            Operation::Bpl => self.branch(operand, !self.regs.p.is_set(N)),
            Operation::Bmi => self.branch(operand, self.regs.p.is_set(N)),
            Operation::Bvc => self.branch(operand, !self.regs.p.is_set(V)),
            Operation::Bvs => self.branch(operand, self.regs.p.is_set(V)),

            // Stack
            Operation::Pha => self.push(self.regs.a),
            Operation::Php => self.push(self.regs.p.to_stack()),
            Operation::Pla => {
                self.regs.a = self.pull();
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Plp => {
                let value = self.pull();
                self.regs.p = Status::from_stack(value);
            }

            // Control flow
            Operation::Jmp => self.regs.pc = target(operand),
            Operation::Jsr => {
                // Return address is the last byte of the JSR itself.
                self.push_word(self.regs.pc.wrapping_sub(1));
                self.regs.pc = target(operand);
            }
            Operation::Rts => self.regs.pc = self.pull_word().wrapping_add(1),
            Operation::Brk => {
                // Skip the padding byte after BRK.
                self.push_word(self.regs.pc.wrapping_add(1));
                self.push(self.regs.p.to_stack());
                self.regs.p.0 |= I;
                self.regs.pc = self.memory.read_word(IRQ_VECTOR);
                log::debug!("BRK, vectoring to ${:04X}", self.regs.pc);
            }
            Operation::Rti => {
                let value = self.pull();
                self.regs.p = Status::from_stack(value);
                self.regs.pc = self.pull_word();
            }

            // Flags
            Operation::Clc => self.regs.p.0 &= !C,
            Operation::Cld => self.regs.p.0 &= !D,
            Operation::Cli => self.regs.p.0 &= !I,
            Operation::Clv => self.regs.p.0 &= !V,
            Operation::Sec => self.regs.p.0 |= C,
            Operation::Sed => self.regs.p.0 |= D,
            Operation::Sei => self.regs.p.0 |= I,

            Operation::Nop => {}

            Operation::Invalid => unreachable!("invalid opcodes are rejected before dispatch"),
        }
    }

    /// Fetch the operand value.
    fn load(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::Address(address) => self.memory.read(address),
            Operand::Accumulator => self.regs.a,
            Operand::Implied | Operand::Offset(_) => {
                unreachable!("{operand:?} has no value")
            }
        }
    }

    fn store(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Address(address) => self.memory.write(address, value),
            Operand::Accumulator => self.regs.a = value,
            Operand::Implied | Operand::Offset(_) => {
                unreachable!("{operand:?} cannot be written")
            }
        }
    }

    /// Read-modify-write on memory or the accumulator. N and Z follow the
    /// result; `f` may adjust carry.
    fn modify(&mut self, operand: Operand, f: impl FnOnce(&mut Status, u8) -> u8) {
        let value = self.load(operand);
        let result = f(&mut self.regs.p, value);
        self.regs.p.update_nz(result);
        self.store(operand, result);
    }

    fn commit_arithmetic(&mut self, result: AluResult) {
        self.regs.a = result.value;
        self.regs.p.set_if(C, result.carry);
        self.regs.p.set_if(V, result.overflow);
        self.regs.p.update_nz(result.value);
    }

    fn compare(&mut self, register: u8, operand: Operand) {
        let value = self.load(operand);
        let result = alu::compare(register, value);
        self.regs.p.set_if(C, result.carry);
        self.regs.p.update_nz(result.value);
    }

    /// Taken branches add the displacement to the next instruction's
    /// address.
    fn branch(&mut self, operand: Operand, condition: bool) {
        if let Operand::Offset(offset) = operand
            && condition
        {
            self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
        }
    }
}

fn target(operand: Operand) -> u16 {
    match operand {
        Operand::Address(address) => address,
        _ => unreachable!("{operand:?} is not a jump target"),
    }
}
