//! Headless NES CPU stepper.
//!
//! Loads an iNES or raw program image, resets the 2A03 and executes up to
//! `--steps` instructions, optionally tracing each one. Execution stops
//! early when the CPU hits an undocumented opcode.
//!
//! Set `RUST_LOG=debug` (or `trace`) for core diagnostics.

mod config;
mod inspect;
mod rom;

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use ricoh_cpu_2a03::{NesMemory, Ricoh2A03};

use config::{DEFAULT_STEPS, ImageSource, StepperConfig, parse_address};

/// Step a NES program one instruction at a time.
#[derive(Parser, Debug)]
#[command(name = "nes-stepper", version)]
#[command(about = "Run a NES program image on an instruction-level 2A03 core")]
struct Args {
    /// iNES ROM file (.nes)
    #[arg(short, long, conflicts_with = "raw", required_unless_present = "raw")]
    rom: Option<PathBuf>,

    /// Flat binary image, placed at --load-address
    #[arg(long)]
    raw: Option<PathBuf>,

    /// Load address for --raw images
    #[arg(long, value_parser = parse_address, default_value = "$8000")]
    load_address: u16,

    /// Start here instead of at the reset vector
    #[arg(long, value_parser = parse_address)]
    start: Option<u16>,

    /// Maximum number of instructions to execute
    #[arg(short = 'n', long, default_value_t = DEFAULT_STEPS)]
    steps: u64,

    /// Print every instruction before it executes
    #[arg(short, long)]
    trace: bool,

    /// Print registers and a listing around PC at the end
    #[arg(short, long)]
    dump: bool,
}

impl Args {
    fn into_config(self) -> StepperConfig {
        let source = match (self.rom, self.raw) {
            (_, Some(path)) => ImageSource::Raw {
                path,
                load_address: self.load_address,
            },
            (Some(path), None) => ImageSource::Ines(path),
            (None, None) => unreachable!("clap requires --rom or --raw"),
        };
        StepperConfig {
            source,
            start: self.start,
            steps: self.steps,
            trace: self.trace,
            dump: self.dump,
        }
    }
}

fn main() {
    env_logger::init();
    let config = Args::parse().into_config();

    if let Err(e) = run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(config: &StepperConfig) -> Result<(), Box<dyn Error>> {
    let image = config.source.load()?;
    let mut memory = NesMemory::new();
    image.load_into(&mut memory);

    let mut cpu = Ricoh2A03::new(memory);
    cpu.reset();
    if let Some(start) = config.start {
        cpu.regs.pc = start;
    }
    log::info!(
        "loaded {} bytes, starting at ${:04X}",
        image.total_bytes(),
        cpu.regs.pc
    );

    let outcome = if config.trace {
        trace(&mut cpu, config.steps)
    } else {
        cpu.run_for(config.steps).map(|_| ())
    };

    println!("Executed {} instructions", cpu.instructions());
    if config.dump {
        dump(&cpu);
    }

    outcome.map_err(Into::into)
}

fn trace(cpu: &mut Ricoh2A03, steps: u64) -> Result<(), ricoh_cpu_2a03::CpuError> {
    for _ in 0..steps {
        println!("{}", inspect::trace_line(cpu));
        cpu.step()?;
    }
    Ok(())
}

fn dump(cpu: &Ricoh2A03) {
    println!();
    for line in inspect::register_dump(cpu) {
        println!("{line}");
    }
    println!();
    for row in inspect::listing(cpu.memory(), cpu.regs.pc) {
        println!("{row}");
    }
}
