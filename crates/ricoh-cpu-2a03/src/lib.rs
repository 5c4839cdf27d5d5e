//! Instruction-level Ricoh 2A03 (NES 6502) interpreter.
//!
//! The 2A03 is an NMOS 6502 with the decimal-mode adder disconnected. This
//! crate executes the 151 documented opcodes one whole instruction at a
//! time against the NES CPU memory map:
//!
//! - `decode`: the 256-entry opcode table
//! - `memory`: 2KB internal RAM mirrored through $1FFF, flat above
//! - `addressing`: operand resolution, including the zero-page and JMP
//!   indirect wrap quirks
//! - `alu`: pure flag algebra for add, subtract and compare
//! - `cpu`: fetch/decode/execute with stack discipline and halting on
//!   undocumented opcodes
//!
//! ```
//! use ricoh_cpu_2a03::{NesMemory, Ricoh2A03};
//!
//! let mut memory = NesMemory::new();
//! memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
//! memory.load(0xFFFC, &[0x00, 0x80]);
//!
//! let mut cpu = Ricoh2A03::new(memory);
//! cpu.reset();
//! cpu.step().unwrap();
//! assert_eq!(cpu.regs.a, 0x42);
//! ```

mod addressing;
pub mod alu;
mod cpu;
mod decode;
mod disasm;
mod error;
pub mod flags;
mod memory;
mod registers;

pub use cpu::Ricoh2A03;
pub use decode::{AddressingMode, DECODE_TABLE, Instruction, Operation, decode};
pub use disasm::{disassemble, instruction_bytes};
pub use error::CpuError;
pub use flags::Status;
pub use memory::{IRQ_VECTOR, NesMemory, RAM_MASK, RAM_MIRROR_END, RESET_VECTOR};
pub use registers::{Registers, STACK_PAGE};
