//! Memory bus interface.

/// Memory bus interface.
///
/// Components access memory through this trait. The bus handles address
/// decoding, including any mirroring of physical memory.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Read a byte without side effects, for debuggers and inspectors.
    fn peek(&self, address: u16) -> u8;

    /// Read a little-endian word.
    ///
    /// Each byte goes through `read` on its own, so address decoding is
    /// applied independently to both halves. The high byte address wraps
    /// from `$FFFF` to `$0000`.
    fn read_word(&mut self, address: u16) -> u16 {
        let lo = self.read(address);
        let hi = self.read(address.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }
}

/// Flat 64KB RAM with no address decoding.
///
/// Useful for CPU tests that need every address to be plain memory.
pub struct SimpleBus {
    ram: Box<[u8]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: vec![0; 0x1_0000].into_boxed_slice(),
        }
    }

    /// Copy `data` into memory starting at `address`, wrapping at `$FFFF`.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.ram[usize::from(addr)] = byte;
            addr = addr.wrapping_add(1);
        }
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[usize::from(address)] = value;
    }

    fn peek(&self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_word_is_little_endian() {
        let mut bus = SimpleBus::new();
        bus.load(0x1234, &[0xCD, 0xAB]);
        assert_eq!(bus.read_word(0x1234), 0xABCD);
    }

    #[test]
    fn read_word_wraps_at_top_of_memory() {
        let mut bus = SimpleBus::new();
        bus.write(0xFFFF, 0x34);
        bus.write(0x0000, 0x12);
        assert_eq!(bus.read_word(0xFFFF), 0x1234);
    }

    #[test]
    fn load_wraps_past_ffff() {
        let mut bus = SimpleBus::new();
        bus.load(0xFFFE, &[1, 2, 3]);
        assert_eq!(bus.peek(0xFFFE), 1);
        assert_eq!(bus.peek(0xFFFF), 2);
        assert_eq!(bus.peek(0x0000), 3);
    }
}
