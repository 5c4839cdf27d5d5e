//! Program image loading.
//!
//! Two formats are accepted:
//! - iNES: 16-byte header, optional 512-byte trainer, PRG then CHR data.
//!   Only the PRG banks matter to the CPU. One 16KB bank appears at both
//!   $8000 and $C000; two banks fill $8000-$FFFF. Bigger images need a
//!   bank-switching mapper and are rejected.
//! - Raw: a flat binary placed at a caller-chosen address.

use std::fmt;

use ricoh_cpu_2a03::NesMemory;

const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const PRG_BANK_LEN: usize = 16 * 1024;
const CHR_BANK_LEN: usize = 8 * 1024;

/// Where PRG ROM starts in the CPU address space.
pub const PRG_BASE: u16 = 0x8000;

/// Image loading failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RomError {
    /// File does not start with `NES\x1A`.
    BadMagic,
    /// File is shorter than its header claims.
    Truncated { expected: usize, actual: usize },
    /// PRG size that a mapperless CPU cannot place.
    UnsupportedPrgBanks(u8),
    /// Raw image would run past $FFFF.
    DoesNotFit { load_address: u16, len: usize },
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadMagic => write!(f, "invalid iNES magic (expected NES\\x1A)"),
            Self::Truncated { expected, actual } => {
                write!(f, "iNES file too short: expected {expected} bytes, got {actual}")
            }
            Self::UnsupportedPrgBanks(banks) => write!(
                f,
                "unsupported PRG size: {banks} x 16KB banks (only 1 or 2 fit without a mapper)"
            ),
            Self::DoesNotFit { load_address, len } => write!(
                f,
                "{len}-byte image does not fit at ${load_address:04X}"
            ),
        }
    }
}

impl std::error::Error for RomError {}

/// Fields of the iNES header this loader looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InesHeader {
    pub prg_banks: u8,
    pub chr_banks: u8,
    pub mapper: u8,
    pub has_trainer: bool,
}

/// A contiguous run of bytes to place in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub address: u16,
    pub data: Vec<u8>,
}

/// A loadable program image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub segments: Vec<Segment>,
}

impl Image {
    /// Flat binary at `load_address`.
    pub fn raw(data: Vec<u8>, load_address: u16) -> Result<Self, RomError> {
        if usize::from(load_address) + data.len() > 0x1_0000 {
            return Err(RomError::DoesNotFit {
                load_address,
                len: data.len(),
            });
        }
        Ok(Self {
            segments: vec![Segment {
                address: load_address,
                data,
            }],
        })
    }

    /// Copy every segment into memory.
    pub fn load_into(&self, memory: &mut NesMemory) {
        for segment in &self.segments {
            memory.load(segment.address, &segment.data);
        }
    }

    /// Total bytes across segments.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.segments.iter().map(|s| s.data.len()).sum()
    }
}

/// Parse the 16-byte iNES header.
pub fn parse_header(data: &[u8]) -> Result<InesHeader, RomError> {
    if data.len() < HEADER_LEN {
        return Err(RomError::Truncated {
            expected: HEADER_LEN,
            actual: data.len(),
        });
    }
    if &data[0..4] != b"NES\x1a" {
        return Err(RomError::BadMagic);
    }

    let flags6 = data[6];
    let flags7 = data[7];
    Ok(InesHeader {
        prg_banks: data[4],
        chr_banks: data[5],
        mapper: (flags7 & 0xF0) | (flags6 >> 4),
        has_trainer: flags6 & 0x04 != 0,
    })
}

/// Parse an iNES file into the image the CPU sees at $8000-$FFFF.
pub fn load_ines(data: &[u8]) -> Result<Image, RomError> {
    let header = parse_header(data)?;

    let prg_len = usize::from(header.prg_banks) * PRG_BANK_LEN;
    let prg_start = if header.has_trainer {
        HEADER_LEN + TRAINER_LEN
    } else {
        HEADER_LEN
    };
    let expected = prg_start + prg_len + usize::from(header.chr_banks) * CHR_BANK_LEN;
    if data.len() < expected {
        return Err(RomError::Truncated {
            expected,
            actual: data.len(),
        });
    }

    if header.mapper != 0 {
        log::warn!(
            "mapper {} is not emulated, loading PRG as plain ROM",
            header.mapper
        );
    }

    let prg = &data[prg_start..prg_start + prg_len];
    let segments = match header.prg_banks {
        1 => vec![
            Segment {
                address: PRG_BASE,
                data: prg.to_vec(),
            },
            Segment {
                address: 0xC000,
                data: prg.to_vec(),
            },
        ],
        2 => vec![Segment {
            address: PRG_BASE,
            data: prg.to_vec(),
        }],
        banks => return Err(RomError::UnsupportedPrgBanks(banks)),
    };

    log::info!(
        "iNES image: {} PRG bank(s), {} CHR bank(s), mapper {}",
        header.prg_banks,
        header.chr_banks,
        header.mapper
    );
    Ok(Image { segments })
}
