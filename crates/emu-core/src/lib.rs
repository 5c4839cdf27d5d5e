//! Core traits and types for instruction-level emulation.
//!
//! A CPU steps one instruction at a time against a bus that owns the
//! address space. Everything a debugger needs is observable without
//! disturbing emulation state.

mod bus;
mod cpu;
mod observable;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
