//! Stepper configuration.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::rom::{self, Image, RomError};

/// Default instruction budget for a run.
pub const DEFAULT_STEPS: u64 = 10_000;

/// Failure to produce an image from a source.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The file was read but is not a usable image.
    Rom(RomError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Rom(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Rom(_) => None,
        }
    }
}

impl From<RomError> for LoadError {
    fn from(e: RomError) -> Self {
        Self::Rom(e)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Where the program image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// iNES file (.nes).
    Ines(PathBuf),
    /// Flat binary placed at `load_address`.
    Raw { path: PathBuf, load_address: u16 },
}

impl ImageSource {
    /// Read and parse the image.
    pub fn load(&self) -> Result<Image, LoadError> {
        match self {
            Self::Ines(path) => Ok(rom::load_ines(&read(path)?)?),
            Self::Raw { path, load_address } => Ok(Image::raw(read(path)?, *load_address)?),
        }
    }
}

/// Stepper configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepperConfig {
    /// Program image.
    pub source: ImageSource,
    /// Start address used instead of the reset vector.
    pub start: Option<u16>,
    /// Maximum number of instructions to execute.
    pub steps: u64,
    /// Print one line per executed instruction.
    pub trace: bool,
    /// Print registers and a listing around PC when the run ends.
    pub dump: bool,
}

/// Parse a 16-bit address written as `$C000`, `0xC000` or `C000`.
pub fn parse_address(text: &str) -> Result<u16, String> {
    let digits = text
        .strip_prefix('$')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address {text:?}: {e}"))
}
