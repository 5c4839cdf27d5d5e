//! NES CPU memory map.
//!
//! Memory map as seen by this core:
//! - $0000-$07FF: 2KB internal RAM
//! - $0800-$1FFF: Mirrors of RAM (only the low 11 address bits decode)
//! - $2000-$FFFF: Plain cells, addressed directly
//!
//! On hardware $2000-$3FFF holds the PPU registers mirrored every 8 bytes.
//! No PPU is attached here, so that range is ordinary memory.

use emu_core::Bus;

/// End of the mirrored internal RAM region.
pub const RAM_MIRROR_END: u16 = 0x2000;

/// Mask selecting one of the 2048 physical RAM bytes.
pub const RAM_MASK: u16 = 0x07FF;

/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// NES CPU address space.
pub struct NesMemory {
    cells: Box<[u8]>,
}

impl Default for NesMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl NesMemory {
    /// Create zero-filled memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![0; 0x1_0000].into_boxed_slice(),
        }
    }

    /// Map a CPU address to the cell that backs it.
    #[must_use]
    pub const fn decode(address: u16) -> u16 {
        if address < RAM_MIRROR_END {
            address & RAM_MASK
        } else {
            address
        }
    }

    /// Copy an image into memory, one byte at a time through the
    /// address decoder. Wraps past $FFFF.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }
}

impl Bus for NesMemory {
    fn read(&mut self, address: u16) -> u8 {
        self.peek(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        self.cells[usize::from(Self::decode(address))] = value;
    }

    fn peek(&self, address: u16) -> u8 {
        self.cells[usize::from(Self::decode(address))]
    }
}
