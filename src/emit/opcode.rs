//! The CIL opcode vocabulary of the symbolic emitter.
//!
//! Only the instructions the program model can produce are tabled here; this
//! is an emission vocabulary, not a disassembler's complete opcode map.
//! Encodings follow ECMA-335 Partition III. Wide forms carry the `0xFE`
//! prefix byte.

use std::fmt;

/// How an instruction affects control flow.
///
/// Used by lowering to distinguish branch-family opcodes (whose operands are
/// label targets until resolution) from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    /// Normal execution continues to the next instruction.
    Sequential,
    /// Conditional branch to another location.
    ConditionalBranch,
    /// Always branches to another location.
    UnconditionalBranch,
    /// Call to another method.
    Call,
    /// Returns from the current method.
    Return,
    /// Leaves a protected region, branching to its target.
    Leave,
    /// Ends a finally handler.
    EndFinally,
}

/// A CIL opcode: mnemonic, encoding, and control-flow classification.
///
/// All instances are the `const` table entries below; two opcodes are equal
/// exactly when their encodings are equal.
///
/// # Examples
///
/// ```rust
/// use ilweave::emit::{FlowType, OpCode};
///
/// assert_eq!(OpCode::RET.mnemonic, "ret");
/// assert_eq!(OpCode::LDFTN.prefix, 0xFE);
/// assert!(matches!(OpCode::BRTRUE.flow, FlowType::ConditionalBranch));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCode {
    /// Human-readable mnemonic, e.g. `"ldarg.s"`.
    pub mnemonic: &'static str,
    /// Prefix byte; 0 for single-byte encodings, `0xFE` for wide forms.
    pub prefix: u8,
    /// Primary opcode byte.
    pub code: u8,
    /// Control-flow classification.
    pub flow: FlowType,
}

impl OpCode {
    const fn single(mnemonic: &'static str, code: u8, flow: FlowType) -> OpCode {
        OpCode {
            mnemonic,
            prefix: 0x00,
            code,
            flow,
        }
    }

    const fn wide(mnemonic: &'static str, code: u8, flow: FlowType) -> OpCode {
        OpCode {
            mnemonic,
            prefix: 0xFE,
            code,
            flow,
        }
    }

    /// Returns `true` for opcodes whose operand is a branch target.
    #[must_use]
    pub fn is_branch(&self) -> bool {
        matches!(
            self.flow,
            FlowType::ConditionalBranch | FlowType::UnconditionalBranch | FlowType::Leave
        )
    }

    /// `nop`
    pub const NOP: OpCode = OpCode::single("nop", 0x00, FlowType::Sequential);
    /// `ldarg.0`
    pub const LDARG_0: OpCode = OpCode::single("ldarg.0", 0x02, FlowType::Sequential);
    /// `ldarg.1`
    pub const LDARG_1: OpCode = OpCode::single("ldarg.1", 0x03, FlowType::Sequential);
    /// `ldarg.2`
    pub const LDARG_2: OpCode = OpCode::single("ldarg.2", 0x04, FlowType::Sequential);
    /// `ldarg.3`
    pub const LDARG_3: OpCode = OpCode::single("ldarg.3", 0x05, FlowType::Sequential);
    /// `ldloc.0`
    pub const LDLOC_0: OpCode = OpCode::single("ldloc.0", 0x06, FlowType::Sequential);
    /// `ldloc.1`
    pub const LDLOC_1: OpCode = OpCode::single("ldloc.1", 0x07, FlowType::Sequential);
    /// `ldloc.2`
    pub const LDLOC_2: OpCode = OpCode::single("ldloc.2", 0x08, FlowType::Sequential);
    /// `ldloc.3`
    pub const LDLOC_3: OpCode = OpCode::single("ldloc.3", 0x09, FlowType::Sequential);
    /// `stloc.0`
    pub const STLOC_0: OpCode = OpCode::single("stloc.0", 0x0A, FlowType::Sequential);
    /// `stloc.1`
    pub const STLOC_1: OpCode = OpCode::single("stloc.1", 0x0B, FlowType::Sequential);
    /// `stloc.2`
    pub const STLOC_2: OpCode = OpCode::single("stloc.2", 0x0C, FlowType::Sequential);
    /// `stloc.3`
    pub const STLOC_3: OpCode = OpCode::single("stloc.3", 0x0D, FlowType::Sequential);
    /// `ldarg.s`
    pub const LDARG_S: OpCode = OpCode::single("ldarg.s", 0x0E, FlowType::Sequential);
    /// `ldarga.s`
    pub const LDARGA_S: OpCode = OpCode::single("ldarga.s", 0x0F, FlowType::Sequential);
    /// `starg.s`
    pub const STARG_S: OpCode = OpCode::single("starg.s", 0x10, FlowType::Sequential);
    /// `ldloc.s`
    pub const LDLOC_S: OpCode = OpCode::single("ldloc.s", 0x11, FlowType::Sequential);
    /// `ldloca.s`
    pub const LDLOCA_S: OpCode = OpCode::single("ldloca.s", 0x12, FlowType::Sequential);
    /// `stloc.s`
    pub const STLOC_S: OpCode = OpCode::single("stloc.s", 0x13, FlowType::Sequential);
    /// `ldnull`
    pub const LDNULL: OpCode = OpCode::single("ldnull", 0x14, FlowType::Sequential);
    /// `ldc.i4.m1`
    pub const LDC_I4_M1: OpCode = OpCode::single("ldc.i4.m1", 0x15, FlowType::Sequential);
    /// `ldc.i4.0`
    pub const LDC_I4_0: OpCode = OpCode::single("ldc.i4.0", 0x16, FlowType::Sequential);
    /// `ldc.i4.1`
    pub const LDC_I4_1: OpCode = OpCode::single("ldc.i4.1", 0x17, FlowType::Sequential);
    /// `ldc.i4.2`
    pub const LDC_I4_2: OpCode = OpCode::single("ldc.i4.2", 0x18, FlowType::Sequential);
    /// `ldc.i4.3`
    pub const LDC_I4_3: OpCode = OpCode::single("ldc.i4.3", 0x19, FlowType::Sequential);
    /// `ldc.i4.4`
    pub const LDC_I4_4: OpCode = OpCode::single("ldc.i4.4", 0x1A, FlowType::Sequential);
    /// `ldc.i4.5`
    pub const LDC_I4_5: OpCode = OpCode::single("ldc.i4.5", 0x1B, FlowType::Sequential);
    /// `ldc.i4.6`
    pub const LDC_I4_6: OpCode = OpCode::single("ldc.i4.6", 0x1C, FlowType::Sequential);
    /// `ldc.i4.7`
    pub const LDC_I4_7: OpCode = OpCode::single("ldc.i4.7", 0x1D, FlowType::Sequential);
    /// `ldc.i4.8`
    pub const LDC_I4_8: OpCode = OpCode::single("ldc.i4.8", 0x1E, FlowType::Sequential);
    /// `ldc.i4.s`
    pub const LDC_I4_S: OpCode = OpCode::single("ldc.i4.s", 0x1F, FlowType::Sequential);
    /// `ldc.i4`
    pub const LDC_I4: OpCode = OpCode::single("ldc.i4", 0x20, FlowType::Sequential);
    /// `dup`
    pub const DUP: OpCode = OpCode::single("dup", 0x25, FlowType::Sequential);
    /// `pop`
    pub const POP: OpCode = OpCode::single("pop", 0x26, FlowType::Sequential);
    /// `call`
    pub const CALL: OpCode = OpCode::single("call", 0x28, FlowType::Call);
    /// `ret`
    pub const RET: OpCode = OpCode::single("ret", 0x2A, FlowType::Return);
    /// `br.s`
    pub const BR_S: OpCode = OpCode::single("br.s", 0x2B, FlowType::UnconditionalBranch);
    /// `brfalse.s`
    pub const BRFALSE_S: OpCode = OpCode::single("brfalse.s", 0x2C, FlowType::ConditionalBranch);
    /// `brtrue.s`
    pub const BRTRUE_S: OpCode = OpCode::single("brtrue.s", 0x2D, FlowType::ConditionalBranch);
    /// `br`
    pub const BR: OpCode = OpCode::single("br", 0x38, FlowType::UnconditionalBranch);
    /// `brfalse`
    pub const BRFALSE: OpCode = OpCode::single("brfalse", 0x39, FlowType::ConditionalBranch);
    /// `brtrue`
    pub const BRTRUE: OpCode = OpCode::single("brtrue", 0x3A, FlowType::ConditionalBranch);
    /// `callvirt`
    pub const CALLVIRT: OpCode = OpCode::single("callvirt", 0x6F, FlowType::Call);
    /// `ldstr`
    pub const LDSTR: OpCode = OpCode::single("ldstr", 0x72, FlowType::Sequential);
    /// `newobj`
    pub const NEWOBJ: OpCode = OpCode::single("newobj", 0x73, FlowType::Call);
    /// `ldfld`
    pub const LDFLD: OpCode = OpCode::single("ldfld", 0x7B, FlowType::Sequential);
    /// `ldflda`
    pub const LDFLDA: OpCode = OpCode::single("ldflda", 0x7C, FlowType::Sequential);
    /// `stfld`
    pub const STFLD: OpCode = OpCode::single("stfld", 0x7D, FlowType::Sequential);
    /// `ldsfld`
    pub const LDSFLD: OpCode = OpCode::single("ldsfld", 0x7E, FlowType::Sequential);
    /// `ldsflda`
    pub const LDSFLDA: OpCode = OpCode::single("ldsflda", 0x7F, FlowType::Sequential);
    /// `stsfld`
    pub const STSFLD: OpCode = OpCode::single("stsfld", 0x80, FlowType::Sequential);
    /// `ldtoken`
    pub const LDTOKEN: OpCode = OpCode::single("ldtoken", 0xD0, FlowType::Sequential);
    /// `endfinally`
    pub const ENDFINALLY: OpCode = OpCode::single("endfinally", 0xDC, FlowType::EndFinally);
    /// `leave`
    pub const LEAVE: OpCode = OpCode::single("leave", 0xDD, FlowType::Leave);
    /// `leave.s`
    pub const LEAVE_S: OpCode = OpCode::single("leave.s", 0xDE, FlowType::Leave);
    /// `ldftn`
    pub const LDFTN: OpCode = OpCode::wide("ldftn", 0x06, FlowType::Sequential);
    /// `ldarg`
    pub const LDARG: OpCode = OpCode::wide("ldarg", 0x09, FlowType::Sequential);
    /// `ldarga`
    pub const LDARGA: OpCode = OpCode::wide("ldarga", 0x0A, FlowType::Sequential);
    /// `starg`
    pub const STARG: OpCode = OpCode::wide("starg", 0x0B, FlowType::Sequential);
    /// `ldloc`
    pub const LDLOC: OpCode = OpCode::wide("ldloc", 0x0C, FlowType::Sequential);
    /// `ldloca`
    pub const LDLOCA: OpCode = OpCode::wide("ldloca", 0x0D, FlowType::Sequential);
    /// `stloc`
    pub const STLOC: OpCode = OpCode::wide("stloc", 0x0E, FlowType::Sequential);
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)
    }
}
