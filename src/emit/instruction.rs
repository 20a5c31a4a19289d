//! Concrete instructions as produced by the lowering pipeline.

use std::fmt;

use crate::emit::{OpCode, Token};

/// Identity of an instruction within a lowered program.
///
/// Lowering replaces every label with the identity of the instruction the
/// label denoted; an `InstructionId` is an index into
/// [`crate::emit::LoweredProgram::instructions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructionId(u32);

impl InstructionId {
    /// Create an identity from a flat-stream index.
    #[must_use]
    pub fn new(index: u32) -> Self {
        InstructionId(index)
    }

    /// Returns the flat-stream index this identity refers to.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IL_{:04}", self.0)
    }
}

/// An immediate value embedded in an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Immediate {
    /// Signed 8-bit immediate (`ldc.i4.s`).
    Int8(i8),
    /// Unsigned 8-bit immediate (short-form argument/local indices).
    UInt8(u8),
    /// Unsigned 16-bit immediate (wide-form argument/local indices).
    UInt16(u16),
    /// Signed 32-bit immediate (`ldc.i4`).
    Int32(i32),
}

/// A typed instruction operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// No operand.
    None,
    /// A constant embedded in the instruction.
    Immediate(Immediate),
    /// A resolved branch target.
    Target(InstructionId),
    /// A metadata token (call family, field access, `ldtoken`).
    Token(Token),
    /// A string literal (`ldstr`); interned by the binary writer.
    String(Box<str>),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Immediate(Immediate::Int8(value)) => write!(f, "{value}"),
            Operand::Immediate(Immediate::UInt8(value)) => write!(f, "{value}"),
            Operand::Immediate(Immediate::UInt16(value)) => write!(f, "{value}"),
            Operand::Immediate(Immediate::Int32(value)) => write!(f, "{value}"),
            Operand::Target(id) => write!(f, "{id}"),
            Operand::Token(token) => write!(f, "{token}"),
            Operand::String(value) => write!(f, "\"{value}\""),
        }
    }
}

/// A concrete instruction: opcode plus operand.
///
/// Instructions in a lowered program are fully resolved - branch operands
/// carry [`InstructionId`]s, never labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The opcode.
    pub opcode: OpCode,
    /// The operand; [`Operand::None`] for operand-free opcodes.
    pub operand: Operand,
}

impl Instruction {
    /// An instruction with no operand.
    #[must_use]
    pub fn new(opcode: OpCode) -> Self {
        Instruction {
            opcode,
            operand: Operand::None,
        }
    }

    /// An instruction with the given operand.
    #[must_use]
    pub fn with_operand(opcode: OpCode, operand: Operand) -> Self {
        Instruction { opcode, operand }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Operand::None => f.write_str(self.opcode.mnemonic),
            operand => write!(f, "{} {operand}", self.opcode.mnemonic),
        }
    }
}
