//! Opcode decode table.
//!
//! Maps every one of the 256 opcode values to an operation, an addressing
//! mode and an encoded size. The 151 documented opcodes are listed below;
//! everything else decodes to [`Operation::Invalid`].

use std::fmt;

/// Operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// No documented meaning.
    Invalid,
}

impl Operation {
    /// Three-letter assembler mnemonic (`???` for invalid opcodes).
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Invalid => "???",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

/// Addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// `A` - operates on the accumulator.
    Accumulator,
    /// `#$nn`
    Immediate,
    /// `$nn`
    ZeroPage,
    /// `$nn,X` - wraps within page zero.
    ZeroPageX,
    /// `$nn,Y` - wraps within page zero.
    ZeroPageY,
    /// `$nnnn`
    Absolute,
    /// `$nnnn,X`
    AbsoluteX,
    /// `$nnnn,Y`
    AbsoluteY,
    /// No operand.
    Implied,
    /// Signed branch displacement.
    Relative,
    /// `($nnnn)` - JMP only.
    Indirect,
    /// `($nn,X)`
    IndexedIndirect,
    /// `($nn),Y`
    IndirectIndexed,
    /// Sentinel for invalid opcodes.
    Invalid,
}

impl AddressingMode {
    /// Encoded instruction size in bytes, opcode included.
    #[must_use]
    pub const fn size(self) -> u8 {
        match self {
            Self::Accumulator | Self::Implied => 1,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::Relative
            | Self::IndexedIndirect
            | Self::IndirectIndexed => 2,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 3,
            Self::Invalid => 0,
        }
    }

    /// Human-readable mode name, as shown in listings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accumulator => "accumulator",
            Self::Immediate => "immediate",
            Self::ZeroPage => "zero page",
            Self::ZeroPageX => "zero page,X",
            Self::ZeroPageY => "zero page,Y",
            Self::Absolute => "absolute",
            Self::AbsoluteX => "absolute,X",
            Self::AbsoluteY => "absolute,Y",
            Self::Implied => "implied",
            Self::Relative => "relative",
            Self::Indirect => "indirect",
            Self::IndexedIndirect => "(indirect,X)",
            Self::IndirectIndexed => "(indirect),Y",
            Self::Invalid => "---",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Decoded instruction metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Operation,
    pub mode: AddressingMode,
    /// Encoded size in bytes; 0 for invalid opcodes.
    pub size: u8,
}

impl Instruction {
    /// Descriptor shared by every undocumented opcode.
    pub const INVALID: Self = Self::new(Operation::Invalid, AddressingMode::Invalid);

    #[must_use]
    pub const fn new(op: Operation, mode: AddressingMode) -> Self {
        Self {
            op,
            mode,
            size: mode.size(),
        }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self.op, Operation::Invalid)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.mode)
    }
}

use AddressingMode as M;
use Operation as O;

/// The documented instruction set: (opcode, operation, mode).
const DOCUMENTED: [(u8, Operation, AddressingMode); 151] = [
    // Loads
    (0xA9, O::Lda, M::Immediate),
    (0xA5, O::Lda, M::ZeroPage),
    (0xB5, O::Lda, M::ZeroPageX),
    (0xAD, O::Lda, M::Absolute),
    (0xBD, O::Lda, M::AbsoluteX),
    (0xB9, O::Lda, M::AbsoluteY),
    (0xA1, O::Lda, M::IndexedIndirect),
    (0xB1, O::Lda, M::IndirectIndexed),
    (0xA2, O::Ldx, M::Immediate),
    (0xA6, O::Ldx, M::ZeroPage),
    (0xB6, O::Ldx, M::ZeroPageY),
    (0xAE, O::Ldx, M::Absolute),
    (0xBE, O::Ldx, M::AbsoluteY),
    (0xA0, O::Ldy, M::Immediate),
    (0xA4, O::Ldy, M::ZeroPage),
    (0xB4, O::Ldy, M::ZeroPageX),
    (0xAC, O::Ldy, M::Absolute),
    (0xBC, O::Ldy, M::AbsoluteX),
    // Stores
    (0x85, O::Sta, M::ZeroPage),
    (0x95, O::Sta, M::ZeroPageX),
    (0x8D, O::Sta, M::Absolute),
    (0x9D, O::Sta, M::AbsoluteX),
    (0x99, O::Sta, M::AbsoluteY),
    (0x81, O::Sta, M::IndexedIndirect),
    (0x91, O::Sta, M::IndirectIndexed),
    (0x86, O::Stx, M::ZeroPage),
    (0x96, O::Stx, M::ZeroPageY),
    (0x8E, O::Stx, M::Absolute),
    (0x84, O::Sty, M::ZeroPage),
    (0x94, O::Sty, M::ZeroPageX),
    (0x8C, O::Sty, M::Absolute),
    // Arithmetic
    (0x69, O::Adc, M::Immediate),
    (0x65, O::Adc, M::ZeroPage),
    (0x75, O::Adc, M::ZeroPageX),
    (0x6D, O::Adc, M::Absolute),
    (0x7D, O::Adc, M::AbsoluteX),
    (0x79, O::Adc, M::AbsoluteY),
    (0x61, O::Adc, M::IndexedIndirect),
    (0x71, O::Adc, M::IndirectIndexed),
    (0xE9, O::Sbc, M::Immediate),
    (0xE5, O::Sbc, M::ZeroPage),
    (0xF5, O::Sbc, M::ZeroPageX),
    (0xED, O::Sbc, M::Absolute),
    (0xFD, O::Sbc, M::AbsoluteX),
    (0xF9, O::Sbc, M::AbsoluteY),
    (0xE1, O::Sbc, M::IndexedIndirect),
    (0xF1, O::Sbc, M::IndirectIndexed),
    // Compares
    (0xC9, O::Cmp, M::Immediate),
    (0xC5, O::Cmp, M::ZeroPage),
    (0xD5, O::Cmp, M::ZeroPageX),
    (0xCD, O::Cmp, M::Absolute),
    (0xDD, O::Cmp, M::AbsoluteX),
    (0xD9, O::Cmp, M::AbsoluteY),
    (0xC1, O::Cmp, M::IndexedIndirect),
    (0xD1, O::Cmp, M::IndirectIndexed),
    (0xE0, O::Cpx, M::Immediate),
    (0xE4, O::Cpx, M::ZeroPage),
    (0xEC, O::Cpx, M::Absolute),
    (0xC0, O::Cpy, M::Immediate),
    (0xC4, O::Cpy, M::ZeroPage),
    (0xCC, O::Cpy, M::Absolute),
    // Logical
    (0x29, O::And, M::Immediate),
    (0x25, O::And, M::ZeroPage),
    (0x35, O::And, M::ZeroPageX),
    (0x2D, O::And, M::Absolute),
    (0x3D, O::And, M::AbsoluteX),
    (0x39, O::And, M::AbsoluteY),
    (0x21, O::And, M::IndexedIndirect),
    (0x31, O::And, M::IndirectIndexed),
    (0x09, O::Ora, M::Immediate),
    (0x05, O::Ora, M::ZeroPage),
    (0x15, O::Ora, M::ZeroPageX),
    (0x0D, O::Ora, M::Absolute),
    (0x1D, O::Ora, M::AbsoluteX),
    (0x19, O::Ora, M::AbsoluteY),
    (0x01, O::Ora, M::IndexedIndirect),
    (0x11, O::Ora, M::IndirectIndexed),
    (0x49, O::Eor, M::Immediate),
    (0x45, O::Eor, M::ZeroPage),
    (0x55, O::Eor, M::ZeroPageX),
    (0x4D, O::Eor, M::Absolute),
    (0x5D, O::Eor, M::AbsoluteX),
    (0x59, O::Eor, M::AbsoluteY),
    (0x41, O::Eor, M::IndexedIndirect),
    (0x51, O::Eor, M::IndirectIndexed),
    (0x24, O::Bit, M::ZeroPage),
    (0x2C, O::Bit, M::Absolute),
    // Shifts and rotates
    (0x0A, O::Asl, M::Accumulator),
    (0x06, O::Asl, M::ZeroPage),
    (0x16, O::Asl, M::ZeroPageX),
    (0x0E, O::Asl, M::Absolute),
    (0x1E, O::Asl, M::AbsoluteX),
    (0x4A, O::Lsr, M::Accumulator),
    (0x46, O::Lsr, M::ZeroPage),
    (0x56, O::Lsr, M::ZeroPageX),
    (0x4E, O::Lsr, M::Absolute),
    (0x5E, O::Lsr, M::AbsoluteX),
    (0x2A, O::Rol, M::Accumulator),
    (0x26, O::Rol, M::ZeroPage),
    (0x36, O::Rol, M::ZeroPageX),
    (0x2E, O::Rol, M::Absolute),
    (0x3E, O::Rol, M::AbsoluteX),
    (0x6A, O::Ror, M::Accumulator),
    (0x66, O::Ror, M::ZeroPage),
    (0x76, O::Ror, M::ZeroPageX),
    (0x6E, O::Ror, M::Absolute),
    (0x7E, O::Ror, M::AbsoluteX),
    // Increments and decrements
    (0xE6, O::Inc, M::ZeroPage),
    (0xF6, O::Inc, M::ZeroPageX),
    (0xEE, O::Inc, M::Absolute),
    (0xFE, O::Inc, M::AbsoluteX),
    (0xC6, O::Dec, M::ZeroPage),
    (0xD6, O::Dec, M::ZeroPageX),
    (0xCE, O::Dec, M::Absolute),
    (0xDE, O::Dec, M::AbsoluteX),
    (0xE8, O::Inx, M::Implied),
    (0xC8, O::Iny, M::Implied),
    (0xCA, O::Dex, M::Implied),
    (0x88, O::Dey, M::Implied),
    // Register transfers
    (0xAA, O::Tax, M::Implied),
    (0xA8, O::Tay, M::Implied),
    (0x8A, O::Txa, M::Implied),
    (0x98, O::Tya, M::Implied),
    (0xBA, O::Tsx, M::Implied),
    (0x9A, O::Txs, M::Implied),
    // Branches
    (0x90, O::Bcc, M::Relative),
    (0xB0, O::Bcs, M::Relative),
    (0xF0, O::Beq, M::Relative),
    (0xD0, O::Bne, M::Relative),
    (0x30, O::Bmi, M::Relative),
    (0x10, O::Bpl, M::Relative),
    (0x50, O::Bvc, M::Relative),
    (0x70, O::Bvs, M::Relative),
    // Stack and control
    (0x48, O::Pha, M::Implied),
    (0x08, O::Php, M::Implied),
    (0x68, O::Pla, M::Implied),
    (0x28, O::Plp, M::Implied),
    (0x20, O::Jsr, M::Absolute),
    (0x60, O::Rts, M::Implied),
    (0x4C, O::Jmp, M::Absolute),
    (0x6C, O::Jmp, M::Indirect),
    (0x00, O::Brk, M::Implied),
    (0x40, O::Rti, M::Implied),
    // Flag sets and clears
    (0x38, O::Sec, M::Implied),
    (0x78, O::Sei, M::Implied),
    (0xF8, O::Sed, M::Implied),
    (0x18, O::Clc, M::Implied),
    (0x58, O::Cli, M::Implied),
    (0xD8, O::Cld, M::Implied),
    (0xB8, O::Clv, M::Implied),
    (0xEA, O::Nop, M::Implied),
];

const fn build_table() -> [Instruction; 256] {
    let mut table = [Instruction::INVALID; 256];
    let mut i = 0;
    while i < DOCUMENTED.len() {
        let (opcode, op, mode) = DOCUMENTED[i];
        table[opcode as usize] = Instruction::new(op, mode);
        i += 1;
    }
    table
}

/// Decode table indexed by opcode.
pub static DECODE_TABLE: [Instruction; 256] = build_table();

/// Decode an opcode. Total: undocumented opcodes yield
/// [`Instruction::INVALID`].
#[must_use]
pub fn decode(opcode: u8) -> Instruction {
    DECODE_TABLE[usize::from(opcode)]
}
