//! Factory functions for building program elements.
//!
//! These mirror the instruction vocabulary a module-initializer weaver needs.
//! Index-taking factories pick the shortest encoding themselves: `ldarg(1)`
//! produces `ldarg.1`, `ldarg(200)` produces `ldarg.s 200`, and `ldarg(600)`
//! the wide form - callers never choose encodings by hand.

use crate::emit::{
    Immediate, Instruction, Label, OpCode, Operand, ProgramElement, Token,
};

fn direct(instruction: Instruction) -> ProgramElement {
    ProgramElement::Instruction(instruction)
}

fn branch(opcode: OpCode, target: Label) -> ProgramElement {
    ProgramElement::Branch { opcode, target }
}

fn deferred(opcode: OpCode, syntax: impl Into<Box<str>>) -> ProgramElement {
    ProgramElement::DeferredCall {
        opcode,
        syntax: syntax.into(),
    }
}

/// Marks `label` as denoting the next instruction.
#[must_use]
pub fn mark(label: Label) -> ProgramElement {
    ProgramElement::Mark(label)
}

/// `nop`
#[must_use]
pub fn nop() -> ProgramElement {
    direct(Instruction::new(OpCode::NOP))
}

/// `dup`
#[must_use]
pub fn dup() -> ProgramElement {
    direct(Instruction::new(OpCode::DUP))
}

/// `pop`
#[must_use]
pub fn pop() -> ProgramElement {
    direct(Instruction::new(OpCode::POP))
}

/// `ret`
#[must_use]
pub fn ret() -> ProgramElement {
    direct(Instruction::new(OpCode::RET))
}

/// `ldnull`
#[must_use]
pub fn ldnull() -> ProgramElement {
    direct(Instruction::new(OpCode::LDNULL))
}

/// `endfinally`
#[must_use]
pub fn endfinally() -> ProgramElement {
    direct(Instruction::new(OpCode::ENDFINALLY))
}

/// Load argument `index`, using the shortest available encoding.
#[must_use]
pub fn ldarg(index: u16) -> ProgramElement {
    let instruction = match index {
        0 => Instruction::new(OpCode::LDARG_0),
        1 => Instruction::new(OpCode::LDARG_1),
        2 => Instruction::new(OpCode::LDARG_2),
        3 => Instruction::new(OpCode::LDARG_3),
        index => match u8::try_from(index) {
            Ok(byte) => Instruction::with_operand(
                OpCode::LDARG_S,
                Operand::Immediate(Immediate::UInt8(byte)),
            ),
            Err(_) => Instruction::with_operand(
                OpCode::LDARG,
                Operand::Immediate(Immediate::UInt16(index)),
            ),
        },
    };
    direct(instruction)
}

/// Load the address of argument `index`.
#[must_use]
pub fn ldarga(index: u16) -> ProgramElement {
    let instruction = match u8::try_from(index) {
        Ok(byte) => {
            Instruction::with_operand(OpCode::LDARGA_S, Operand::Immediate(Immediate::UInt8(byte)))
        }
        Err(_) => {
            Instruction::with_operand(OpCode::LDARGA, Operand::Immediate(Immediate::UInt16(index)))
        }
    };
    direct(instruction)
}

/// Store into argument `index`.
#[must_use]
pub fn starg(index: u16) -> ProgramElement {
    let instruction = match u8::try_from(index) {
        Ok(byte) => {
            Instruction::with_operand(OpCode::STARG_S, Operand::Immediate(Immediate::UInt8(byte)))
        }
        Err(_) => {
            Instruction::with_operand(OpCode::STARG, Operand::Immediate(Immediate::UInt16(index)))
        }
    };
    direct(instruction)
}

/// Load local `index`, using the shortest available encoding.
#[must_use]
pub fn ldloc(index: u16) -> ProgramElement {
    let instruction = match index {
        0 => Instruction::new(OpCode::LDLOC_0),
        1 => Instruction::new(OpCode::LDLOC_1),
        2 => Instruction::new(OpCode::LDLOC_2),
        3 => Instruction::new(OpCode::LDLOC_3),
        index => match u8::try_from(index) {
            Ok(byte) => Instruction::with_operand(
                OpCode::LDLOC_S,
                Operand::Immediate(Immediate::UInt8(byte)),
            ),
            Err(_) => Instruction::with_operand(
                OpCode::LDLOC,
                Operand::Immediate(Immediate::UInt16(index)),
            ),
        },
    };
    direct(instruction)
}

/// Load the address of local `index`.
#[must_use]
pub fn ldloca(index: u16) -> ProgramElement {
    let instruction = match u8::try_from(index) {
        Ok(byte) => {
            Instruction::with_operand(OpCode::LDLOCA_S, Operand::Immediate(Immediate::UInt8(byte)))
        }
        Err(_) => {
            Instruction::with_operand(OpCode::LDLOCA, Operand::Immediate(Immediate::UInt16(index)))
        }
    };
    direct(instruction)
}

/// Store into local `index`, using the shortest available encoding.
#[must_use]
pub fn stloc(index: u16) -> ProgramElement {
    let instruction = match index {
        0 => Instruction::new(OpCode::STLOC_0),
        1 => Instruction::new(OpCode::STLOC_1),
        2 => Instruction::new(OpCode::STLOC_2),
        3 => Instruction::new(OpCode::STLOC_3),
        index => match u8::try_from(index) {
            Ok(byte) => Instruction::with_operand(
                OpCode::STLOC_S,
                Operand::Immediate(Immediate::UInt8(byte)),
            ),
            Err(_) => Instruction::with_operand(
                OpCode::STLOC,
                Operand::Immediate(Immediate::UInt16(index)),
            ),
        },
    };
    direct(instruction)
}

/// Load the 32-bit constant `value`, using the shortest available encoding.
#[must_use]
pub fn ldc_i4(value: i32) -> ProgramElement {
    let instruction = match value {
        -1 => Instruction::new(OpCode::LDC_I4_M1),
        0 => Instruction::new(OpCode::LDC_I4_0),
        1 => Instruction::new(OpCode::LDC_I4_1),
        2 => Instruction::new(OpCode::LDC_I4_2),
        3 => Instruction::new(OpCode::LDC_I4_3),
        4 => Instruction::new(OpCode::LDC_I4_4),
        5 => Instruction::new(OpCode::LDC_I4_5),
        6 => Instruction::new(OpCode::LDC_I4_6),
        7 => Instruction::new(OpCode::LDC_I4_7),
        8 => Instruction::new(OpCode::LDC_I4_8),
        value => match i8::try_from(value) {
            Ok(byte) => Instruction::with_operand(
                OpCode::LDC_I4_S,
                Operand::Immediate(Immediate::Int8(byte)),
            ),
            Err(_) => Instruction::with_operand(
                OpCode::LDC_I4,
                Operand::Immediate(Immediate::Int32(value)),
            ),
        },
    };
    direct(instruction)
}

/// `ldstr` with the given literal.
#[must_use]
pub fn ldstr(value: impl Into<Box<str>>) -> ProgramElement {
    direct(Instruction::with_operand(
        OpCode::LDSTR,
        Operand::String(value.into()),
    ))
}

/// `ldtoken` with a resolved type token.
#[must_use]
pub fn ldtoken(token: Token) -> ProgramElement {
    direct(Instruction::with_operand(
        OpCode::LDTOKEN,
        Operand::Token(token),
    ))
}

/// `ldfld` with a resolved field token.
#[must_use]
pub fn ldfld(field: Token) -> ProgramElement {
    direct(Instruction::with_operand(
        OpCode::LDFLD,
        Operand::Token(field),
    ))
}

/// `ldflda` with a resolved field token.
#[must_use]
pub fn ldflda(field: Token) -> ProgramElement {
    direct(Instruction::with_operand(
        OpCode::LDFLDA,
        Operand::Token(field),
    ))
}

/// `stfld` with a resolved field token.
#[must_use]
pub fn stfld(field: Token) -> ProgramElement {
    direct(Instruction::with_operand(
        OpCode::STFLD,
        Operand::Token(field),
    ))
}

/// `ldsfld` with a resolved field token.
#[must_use]
pub fn ldsfld(field: Token) -> ProgramElement {
    direct(Instruction::with_operand(
        OpCode::LDSFLD,
        Operand::Token(field),
    ))
}

/// `ldsflda` with a resolved field token.
#[must_use]
pub fn ldsflda(field: Token) -> ProgramElement {
    direct(Instruction::with_operand(
        OpCode::LDSFLDA,
        Operand::Token(field),
    ))
}

/// `stsfld` with a resolved field token.
#[must_use]
pub fn stsfld(field: Token) -> ProgramElement {
    direct(Instruction::with_operand(
        OpCode::STSFLD,
        Operand::Token(field),
    ))
}

/// `br` to `target`.
#[must_use]
pub fn br(target: Label) -> ProgramElement {
    branch(OpCode::BR, target)
}

/// `br.s` to `target`.
#[must_use]
pub fn br_s(target: Label) -> ProgramElement {
    branch(OpCode::BR_S, target)
}

/// `brtrue` to `target`.
#[must_use]
pub fn brtrue(target: Label) -> ProgramElement {
    branch(OpCode::BRTRUE, target)
}

/// `brtrue.s` to `target`.
#[must_use]
pub fn brtrue_s(target: Label) -> ProgramElement {
    branch(OpCode::BRTRUE_S, target)
}

/// `brfalse` to `target`.
#[must_use]
pub fn brfalse(target: Label) -> ProgramElement {
    branch(OpCode::BRFALSE, target)
}

/// `brfalse.s` to `target`.
#[must_use]
pub fn brfalse_s(target: Label) -> ProgramElement {
    branch(OpCode::BRFALSE_S, target)
}

/// `leave` to `target`.
#[must_use]
pub fn leave(target: Label) -> ProgramElement {
    branch(OpCode::LEAVE, target)
}

/// `leave.s` to `target`.
#[must_use]
pub fn leave_s(target: Label) -> ProgramElement {
    branch(OpCode::LEAVE_S, target)
}

/// `call` of the method named by `method_syntax`, resolved during lowering.
#[must_use]
pub fn call(method_syntax: impl Into<Box<str>>) -> ProgramElement {
    deferred(OpCode::CALL, method_syntax)
}

/// `callvirt` of the method named by `method_syntax`, resolved during lowering.
#[must_use]
pub fn callvirt(method_syntax: impl Into<Box<str>>) -> ProgramElement {
    deferred(OpCode::CALLVIRT, method_syntax)
}

/// `newobj` of the constructor named by `method_syntax`, resolved during lowering.
#[must_use]
pub fn newobj(method_syntax: impl Into<Box<str>>) -> ProgramElement {
    deferred(OpCode::NEWOBJ, method_syntax)
}

/// `ldftn` of the method named by `method_syntax`, resolved during lowering.
#[must_use]
pub fn ldftn(method_syntax: impl Into<Box<str>>) -> ProgramElement {
    deferred(OpCode::LDFTN, method_syntax)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opcode_of(element: &ProgramElement) -> OpCode {
        match element {
            ProgramElement::Instruction(instruction) => instruction.opcode,
            _ => panic!("expected a direct instruction"),
        }
    }

    #[test]
    fn ldarg_selects_the_shortest_form() {
        assert_eq!(opcode_of(&ldarg(0)), OpCode::LDARG_0);
        assert_eq!(opcode_of(&ldarg(3)), OpCode::LDARG_3);
        assert_eq!(
            ldarg(4),
            ProgramElement::Instruction(Instruction::with_operand(
                OpCode::LDARG_S,
                Operand::Immediate(Immediate::UInt8(4))
            ))
        );
        assert_eq!(
            ldarg(255),
            ProgramElement::Instruction(Instruction::with_operand(
                OpCode::LDARG_S,
                Operand::Immediate(Immediate::UInt8(255))
            ))
        );
        assert_eq!(
            ldarg(256),
            ProgramElement::Instruction(Instruction::with_operand(
                OpCode::LDARG,
                Operand::Immediate(Immediate::UInt16(256))
            ))
        );
    }

    #[test]
    fn stloc_selects_the_shortest_form() {
        assert_eq!(opcode_of(&stloc(2)), OpCode::STLOC_2);
        assert_eq!(opcode_of(&stloc(9)), OpCode::STLOC_S);
        assert_eq!(opcode_of(&stloc(1000)), OpCode::STLOC);
    }

    #[test]
    fn ldc_i4_selects_the_shortest_form() {
        assert_eq!(opcode_of(&ldc_i4(-1)), OpCode::LDC_I4_M1);
        assert_eq!(opcode_of(&ldc_i4(0)), OpCode::LDC_I4_0);
        assert_eq!(opcode_of(&ldc_i4(8)), OpCode::LDC_I4_8);
        assert_eq!(opcode_of(&ldc_i4(9)), OpCode::LDC_I4_S);
        assert_eq!(opcode_of(&ldc_i4(-128)), OpCode::LDC_I4_S);
        assert_eq!(opcode_of(&ldc_i4(-129)), OpCode::LDC_I4);
        assert_eq!(opcode_of(&ldc_i4(40_000)), OpCode::LDC_I4);
    }

    #[test]
    fn deferred_calls_carry_their_syntax() {
        let element = newobj("instance void class Foo::.ctor()");
        assert_eq!(
            element,
            ProgramElement::DeferredCall {
                opcode: OpCode::NEWOBJ,
                syntax: "instance void class Foo::.ctor()".into(),
            }
        );
    }
}
