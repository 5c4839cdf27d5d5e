//! `SingleStepTests` for the NES 6502 (2A03 variant, no decimal mode).
//!
//! Each documented opcode file holds 10,000 cases giving the register and
//! memory state before and after one instruction. Undocumented opcodes are
//! skipped: this core halts on them.
//!
//! Test data lives in `test-data/65x02/nes6502/v1/XX.json`.

use emu_core::{Bus, SimpleBus};
use ricoh_cpu_2a03::{Ricoh2A03, Status, decode};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// JSON test case format. Bus cycle traces are ignored.
#[derive(Deserialize)]
struct TestCase {
    name: String,
    initial: CpuState,
    #[serde(rename = "final")]
    final_state: CpuState,
}

#[derive(Deserialize)]
struct CpuState {
    pc: u16,
    s: u8,
    a: u8,
    x: u8,
    y: u8,
    p: u8,
    ram: Vec<(u16, u8)>,
}

fn setup(state: &CpuState) -> Ricoh2A03<SimpleBus> {
    let mut bus = SimpleBus::new();
    for &(addr, value) in &state.ram {
        bus.write(addr, value);
    }
    let mut cpu = Ricoh2A03::new(bus);
    cpu.regs.pc = state.pc;
    cpu.regs.s = state.s;
    cpu.regs.a = state.a;
    cpu.regs.x = state.x;
    cpu.regs.y = state.y;
    cpu.regs.p = Status::from_stack(state.p);
    cpu
}

fn compare(cpu: &Ricoh2A03<SimpleBus>, expected: &CpuState) -> Vec<String> {
    let mut errors = Vec::new();

    let registers = [
        ("A", cpu.regs.a, expected.a),
        ("X", cpu.regs.x, expected.x),
        ("Y", cpu.regs.y, expected.y),
        ("S", cpu.regs.s, expected.s),
    ];
    for (name, got, want) in registers {
        if got != want {
            errors.push(format!("{name}: got ${got:02X}, want ${want:02X}"));
        }
    }
    if cpu.regs.pc != expected.pc {
        errors.push(format!(
            "PC: got ${:04X}, want ${:04X}",
            cpu.regs.pc, expected.pc
        ));
    }

    // B is not a real register bit; only the pushed copy carries it.
    let actual_p = cpu.regs.p.0;
    let expected_p = Status::from_stack(expected.p).0;
    if actual_p != expected_p {
        errors.push(format!(
            "P: got ${actual_p:02X} ({actual_p:08b}), want ${expected_p:02X} ({expected_p:08b})"
        ));
    }

    for &(addr, want) in &expected.ram {
        let got = cpu.memory().peek(addr);
        if got != want {
            errors.push(format!("RAM[${addr:04X}]: got ${got:02X}, want ${want:02X}"));
        }
    }

    errors
}

#[test]
#[ignore = "requires test-data/65x02, run with --ignored"]
fn run_all() {
    let test_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("parent of crate dir")
        .parent()
        .expect("workspace root")
        .join("test-data/65x02/nes6502/v1");

    if !test_dir.exists() {
        eprintln!("Test data not found at {}", test_dir.display());
        eprintln!("Skipping SingleStepTests.");
        return;
    }

    let mut total_pass = 0u64;
    let mut total_fail = 0u64;

    for opcode in (0..=0xFF_u8).filter(|&op| decode(op).is_valid()) {
        let filename = format!("{opcode:02x}.json");
        let path = test_dir.join(&filename);
        if !path.exists() {
            continue;
        }

        let data = fs::read_to_string(&path).unwrap_or_else(|e| {
            panic!("Failed to read {}: {e}", path.display());
        });
        let tests: Vec<TestCase> = serde_json::from_str(&data).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {e}", path.display());
        });

        let mut file_pass = 0u32;
        let mut file_fail = 0u32;
        let mut first_failures = Vec::new();

        for test in &tests {
            let mut cpu = setup(&test.initial);
            let mut errors = match cpu.step() {
                Ok(_) => Vec::new(),
                Err(fault) => vec![fault.to_string()],
            };
            errors.extend(compare(&cpu, &test.final_state));

            if errors.is_empty() {
                file_pass += 1;
            } else {
                file_fail += 1;
                if first_failures.len() < 5 {
                    first_failures.push(format!("  FAIL [{}]: {}", test.name, errors.join(", ")));
                }
            }
        }

        let status = if file_fail == 0 { "PASS" } else { "FAIL" };
        println!(
            "Opcode ${opcode:02X} {:<3} ({filename}): {status} {file_pass}/{}",
            decode(opcode).op,
            file_pass + file_fail
        );
        for msg in &first_failures {
            println!("{msg}");
        }

        total_pass += u64::from(file_pass);
        total_fail += u64::from(file_fail);
    }

    println!();
    println!("=== SingleStepTests Summary ===");
    println!(
        "Total: {}, Pass: {total_pass}, Fail: {total_fail}",
        total_pass + total_fail
    );

    assert_eq!(total_fail, 0, "{total_fail} tests failed");
}
