//! 2A03 CPU implementation.
//!
//! Instruction-level execution: each `step()` fetches, decodes and retires
//! one whole instruction. There is no cycle model.

mod execute;

use emu_core::{Bus, Cpu, Observable, Value};

use crate::decode::{Instruction, decode};
use crate::flags::{C, D, I, N, V, Z};
use crate::memory::{NesMemory, RESET_VECTOR};
use crate::{CpuError, Registers};

/// Execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    /// Stopped on a fault; `step()` keeps reporting it until reset.
    Halted(CpuError),
}

/// The Ricoh 2A03 CPU core.
///
/// Owns its memory, so one value holds the whole machine state. Defaults
/// to the NES memory map; tests substitute a flat bus.
pub struct Ricoh2A03<M: Bus = NesMemory> {
    /// CPU registers.
    pub regs: Registers,

    pub(crate) memory: M,

    state: State,

    /// Instructions retired since the last reset.
    instructions: u64,
}

impl Default for Ricoh2A03 {
    fn default() -> Self {
        Self::new(NesMemory::new())
    }
}

impl<M: Bus> Ricoh2A03<M> {
    /// Create a CPU in power-up state around `memory`.
    ///
    /// PC is not loaded until [`reset`](Self::reset), so the host can place
    /// its image first.
    #[must_use]
    pub fn new(memory: M) -> Self {
        Self {
            regs: Registers::new(),
            memory,
            state: State::Running,
            instructions: 0,
        }
    }

    /// Reset: power-up registers, clear any fault, load PC from $FFFC.
    pub fn reset(&mut self) {
        self.regs = Registers::new();
        self.regs.pc = self.memory.read_word(RESET_VECTOR);
        self.state = State::Running;
        self.instructions = 0;
        log::debug!("reset, PC=${:04X}", self.regs.pc);
    }

    /// Execute one instruction and return what was executed.
    ///
    /// An undocumented opcode halts the CPU without touching any register.
    /// Once halted, every call returns the same fault until `reset()`.
    pub fn step(&mut self) -> Result<Instruction, CpuError> {
        if let State::Halted(fault) = self.state {
            return Err(fault);
        }

        let pc = self.regs.pc;
        let opcode = self.memory.read(pc);
        let instruction = decode(opcode);
        if !instruction.is_valid() {
            let fault = CpuError::InvalidOpcode { opcode, pc };
            log::warn!("{fault}, halting");
            self.state = State::Halted(fault);
            return Err(fault);
        }

        let operand = self.resolve(instruction.mode);
        log::trace!(
            "{pc:04X}  {:<3} {:?}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} S:{:02X}",
            instruction.op,
            operand,
            self.regs.a,
            self.regs.x,
            self.regs.y,
            self.regs.p.0,
            self.regs.s
        );

        self.regs.pc = pc.wrapping_add(u16::from(instruction.size));
        self.execute(instruction.op, operand);
        self.instructions += 1;
        Ok(instruction)
    }

    /// Step until a fault stops execution, then return the fault.
    pub fn run(&mut self) -> CpuError {
        loop {
            if let Err(fault) = self.step() {
                return fault;
            }
        }
    }

    /// Execute at most `limit` instructions. Returns how many ran.
    pub fn run_for(&mut self, limit: u64) -> Result<u64, CpuError> {
        for executed in 0..limit {
            if let Err(fault) = self.step() {
                log::debug!("stopped after {executed} instructions");
                return Err(fault);
            }
        }
        Ok(limit)
    }

    /// Instructions retired since the last reset.
    #[must_use]
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// True once an invalid opcode has stopped the CPU.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        matches!(self.state, State::Halted(_))
    }

    /// The fault that halted the CPU, if any.
    #[must_use]
    pub fn fault(&self) -> Option<CpuError> {
        match self.state {
            State::Running => None,
            State::Halted(fault) => Some(fault),
        }
    }

    #[must_use]
    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }
}

impl<M: Bus> Cpu for Ricoh2A03<M> {
    type Registers = Registers;
    type Error = CpuError;

    fn step(&mut self) -> Result<(), CpuError> {
        Self::step(self).map(|_| ())
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        Self::is_halted(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}

impl<M: Bus> Observable for Ricoh2A03<M> {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(hex) = path.strip_prefix("mem.$") {
            let address = u16::from_str_radix(hex, 16).ok()?;
            return Some(self.memory.peek(address).into());
        }
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(Value::Bits(self.regs.p.0)),
            "flags.c" => Some(self.regs.p.is_set(C).into()),
            "flags.z" => Some(self.regs.p.is_set(Z).into()),
            "flags.i" => Some(self.regs.p.is_set(I).into()),
            "flags.d" => Some(self.regs.p.is_set(D).into()),
            "flags.v" => Some(self.regs.p.is_set(V).into()),
            "flags.n" => Some(self.regs.p.is_set(N).into()),
            "instructions" => Some(self.instructions.into()),
            "halted" => Some(self.is_halted().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc",
            "a",
            "x",
            "y",
            "s",
            "p",
            "flags.c",
            "flags.z",
            "flags.i",
            "flags.d",
            "flags.v",
            "flags.n",
            "instructions",
            "halted",
        ]
    }
}
