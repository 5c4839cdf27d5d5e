//! Text views of CPU state: trace lines, register dump and memory listing.

use emu_core::{Bus, Observable, Value};
use ricoh_cpu_2a03::{Ricoh2A03, decode, disassemble, instruction_bytes};

/// Rows shown either side of PC in the listing.
pub const LISTING_RADIUS: u16 = 10;

/// Status register legend, most significant bit first.
pub const FLAG_LEGEND: &str = "NV-BDIZC";

/// One trace line for the instruction about to execute at PC.
#[must_use]
pub fn trace_line<M: Bus>(cpu: &Ricoh2A03<M>) -> String {
    let pc = cpu.regs.pc;
    let (text, _) = disassemble(cpu.memory(), pc);
    format!(
        "{pc:04X}  {:<8}  {text:<14}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
        instruction_bytes(cpu.memory(), pc),
        cpu.regs.a,
        cpu.regs.x,
        cpu.regs.y,
        cpu.regs.p.0,
        cpu.regs.s,
    )
}

/// Registers and the status bits under their legend.
#[must_use]
pub fn register_dump<M: Bus>(cpu: &Ricoh2A03<M>) -> Vec<String> {
    let field = |path: &str| cpu.query(path).map_or_else(String::new, |v| v.to_string());
    let mut lines = vec![format!(
        "A: {}  X: {}  Y: {}  SP: {}  PC: {}",
        field("a"),
        field("x"),
        field("y"),
        field("s"),
        field("pc"),
    )];
    lines.push(format!("P: {FLAG_LEGEND}"));
    lines.push(format!("   {}", field("p")));
    if let Some(Value::U64(count)) = cpu.query("instructions") {
        lines.push(format!("Instructions: {count}"));
    }
    lines
}

/// One row per byte from PC-10 to PC+10: address, byte, and what the byte
/// would mean as an opcode. The row at PC is marked.
#[must_use]
pub fn listing<B: Bus + ?Sized>(bus: &B, pc: u16) -> Vec<String> {
    let start = pc.wrapping_sub(LISTING_RADIUS);
    (0..=2 * LISTING_RADIUS)
        .map(|i| {
            let address = start.wrapping_add(i);
            let byte = bus.peek(address);
            let instr = decode(byte);
            let marker = if address == pc { '>' } else { ' ' };
            format!("{marker} ${address:04X}  {byte:02X}  {}  {}", instr.op, instr.mode)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use emu_core::SimpleBus;

    fn cpu_with(program: &[u8]) -> Ricoh2A03<SimpleBus> {
        let mut bus = SimpleBus::new();
        bus.load(0x8000, program);
        bus.load(0xFFFC, &[0x00, 0x80]);
        let mut cpu = Ricoh2A03::new(bus);
        cpu.reset();
        cpu
    }

    #[test]
    fn trace_shows_bytes_disassembly_and_registers() {
        let cpu = cpu_with(&[0x8D, 0x00, 0x02]);
        assert_eq!(
            trace_line(&cpu),
            "8000  8D 00 02  STA $0200       A:00 X:00 Y:00 P:24 SP:FD"
        );
    }

    #[test]
    fn dump_shows_flag_bits_under_legend() {
        let mut cpu = cpu_with(&[0x38]);
        cpu.step().unwrap();
        let lines = register_dump(&cpu);
        assert_eq!(lines[0], "A: $00  X: $00  Y: $00  SP: $FD  PC: $8001");
        assert_eq!(lines[1], "P: NV-BDIZC");
        assert_eq!(lines[2], "   00100101");
        assert_eq!(lines[3], "Instructions: 1");
    }

    #[test]
    fn listing_is_centred_on_pc() {
        let mut bus = SimpleBus::new();
        bus.load(0x8000, &[0xA9, 0x42]);
        let rows = listing(&bus, 0x8000);
        assert_eq!(rows.len(), 21);
        assert_eq!(rows[10], "> $8000  A9  LDA  immediate");
        assert_eq!(rows[11], "  $8001  42  ???  ---");
        assert!(rows[0].starts_with("  $7FF6"));
        assert!(rows[20].starts_with("  $800A"));
    }

    #[test]
    fn listing_wraps_around_address_space() {
        let bus = SimpleBus::new();
        let rows = listing(&bus, 0x0004);
        assert!(rows[0].starts_with("  $FFFA"));
        assert!(rows[10].starts_with("> $0004"));
    }
}
