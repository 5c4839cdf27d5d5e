//! Property-based tests for memory, stack and execution invariants.

use emu_core::Bus;
use proptest::prelude::*;
use ricoh_cpu_2a03::{CpuError, DECODE_TABLE, NesMemory, Operation, Ricoh2A03, alu};

fn cpu_at(address: u16) -> Ricoh2A03 {
    let mut memory = NesMemory::new();
    memory.load(0xFFFC, &address.to_le_bytes());
    let mut cpu = Ricoh2A03::new(memory);
    cpu.reset();
    cpu
}

/// Opcodes whose only effect on PC is advancing past themselves.
fn straight_line_opcodes() -> Vec<u8> {
    (0..=0xFF_u8)
        .filter(|&opcode| {
            let instr = DECODE_TABLE[usize::from(opcode)];
            instr.is_valid()
                && !matches!(
                    instr.op,
                    Operation::Bcc
                        | Operation::Bcs
                        | Operation::Beq
                        | Operation::Bne
                        | Operation::Bmi
                        | Operation::Bpl
                        | Operation::Bvc
                        | Operation::Bvs
                        | Operation::Jmp
                        | Operation::Jsr
                        | Operation::Rts
                        | Operation::Rti
                        | Operation::Brk
                )
        })
        .collect()
}

fn undocumented_opcodes() -> Vec<u8> {
    (0..=0xFF_u8)
        .filter(|&opcode| !DECODE_TABLE[usize::from(opcode)].is_valid())
        .collect()
}

proptest! {
    #[test]
    fn ram_mirrors_agree(address in 0u16..0x2000, value: u8, mirror in 0u16..4) {
        let mut memory = NesMemory::new();
        memory.write(address, value);
        let alias = (address & 0x07FF) + mirror * 0x0800;
        prop_assert_eq!(memory.read(alias), value);
    }

    #[test]
    fn direct_region_does_not_alias(address in 0x2000u16..=0xFFFF, value: u8) {
        let mut memory = NesMemory::new();
        memory.write(address, value);
        prop_assert_eq!(memory.peek(address), value);
        prop_assert_eq!(memory.peek(address & 0x07FF), 0);
    }

    #[test]
    fn push_pull_restores_value_and_stack_pointer(value: u8, s: u8) {
        // PHA; LDA #$00; PLA
        let mut cpu = cpu_at(0x8000);
        cpu.memory_mut().load(0x8000, &[0x48, 0xA9, 0x00, 0x68]);
        cpu.regs.a = value;
        cpu.regs.s = s;
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        prop_assert_eq!(cpu.regs.a, value);
        prop_assert_eq!(cpu.regs.s, s);
    }

    #[test]
    fn jsr_rts_returns_past_call(origin in 0x8000u16..0xF000, target in 0x2000u16..0x7FFF, s: u8) {
        let mut cpu = cpu_at(origin);
        let [lo, hi] = target.to_le_bytes();
        cpu.memory_mut().load(origin, &[0x20, lo, hi]);
        cpu.memory_mut().write(target, 0x60);
        cpu.regs.s = s;

        cpu.step().unwrap();
        prop_assert_eq!(cpu.regs.pc, target);
        cpu.step().unwrap();
        prop_assert_eq!(cpu.regs.pc, origin.wrapping_add(3));
        prop_assert_eq!(cpu.regs.s, s);
    }

    #[test]
    fn zero_page_x_stays_in_page_zero(base: u8, x: u8, value: u8) {
        // LDA base,X
        let mut cpu = cpu_at(0x8000);
        cpu.memory_mut().load(0x8000, &[0xB5, base]);
        cpu.memory_mut().write(u16::from(base.wrapping_add(x)), value);
        cpu.regs.x = x;
        cpu.step().unwrap();
        prop_assert_eq!(cpu.regs.a, value);
    }

    #[test]
    fn pc_advances_by_instruction_size(
        opcode in prop::sample::select(straight_line_opcodes()),
        operand1: u8,
        operand2: u8,
    ) {
        let mut cpu = cpu_at(0x8000);
        cpu.memory_mut().load(0x8000, &[opcode, operand1, operand2]);
        let size = cpu.step().unwrap().size;
        prop_assert_eq!(cpu.regs.pc, 0x8000 + u16::from(size));
    }

    #[test]
    fn undocumented_opcodes_halt_in_place(
        opcode in prop::sample::select(undocumented_opcodes()),
        a: u8,
        x: u8,
    ) {
        let mut cpu = cpu_at(0x9000);
        cpu.memory_mut().write(0x9000, opcode);
        cpu.regs.a = a;
        cpu.regs.x = x;
        let before = cpu.regs;
        prop_assert_eq!(cpu.step(), Err(CpuError::InvalidOpcode { opcode, pc: 0x9000 }));
        prop_assert_eq!(cpu.regs, before);
        prop_assert!(cpu.is_halted());
    }

    #[test]
    fn branches_follow_their_flag(
        index in 0usize..8,
        p: u8,
        offset: u8,
        origin in 0x8000u16..0xFF00,
    ) {
        let (opcode, flag, when_set) = [
            (0x10, 0x80, false),
            (0x30, 0x80, true),
            (0x50, 0x40, false),
            (0x70, 0x40, true),
            (0x90, 0x01, false),
            (0xB0, 0x01, true),
            (0xD0, 0x02, false),
            (0xF0, 0x02, true),
        ][index];
        let mut cpu = cpu_at(origin);
        cpu.memory_mut().load(origin, &[opcode, offset]);
        cpu.regs.p = ricoh_cpu_2a03::Status::from_stack(p);
        let before = cpu.regs;
        cpu.step().unwrap();

        let next = origin.wrapping_add(2);
        let expected = if (p & flag != 0) == when_set {
            next.wrapping_add(i16::from(offset as i8) as u16)
        } else {
            next
        };
        prop_assert_eq!(cpu.regs.pc, expected);
        prop_assert_eq!(cpu.regs.p, before.p);
        prop_assert_eq!(cpu.regs.s, before.s);
    }

    #[test]
    fn add_matches_wide_arithmetic(a: u8, operand: u8, carry: bool) {
        let r = alu::add(a, operand, carry);
        let unsigned = u16::from(a) + u16::from(operand) + u16::from(carry);
        let signed = i16::from(a as i8) + i16::from(operand as i8) + i16::from(carry);
        prop_assert_eq!(u16::from(r.value), unsigned & 0xFF);
        prop_assert_eq!(r.carry, unsigned > 0xFF);
        prop_assert_eq!(r.overflow, !(-128..=127).contains(&signed));
    }

    #[test]
    fn compare_carry_is_unsigned_ordering(register: u8, operand: u8) {
        let r = alu::compare(register, operand);
        prop_assert_eq!(r.carry, register >= operand);
        prop_assert_eq!(alu::zero(r.value), register == operand);
    }
}
