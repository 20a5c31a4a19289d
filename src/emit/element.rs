//! The symbolic program model consumed by the lowering pipeline.

use crate::emit::{Instruction, Label, OpCode};

/// One element of a symbolic instruction sequence.
///
/// A program is a `Vec<ProgramElement>` built by the caller (usually through
/// the factories in [`crate::emit::elements`]) and consumed, not mutated, by
/// the lowering pipeline. Two element kinds are symbolic: a [`Branch`] names
/// its target by [`Label`], and a [`DeferredCall`] names its callee by ILAsm
/// syntax; both are replaced by concrete [`Instruction`]s during lowering.
///
/// [`Branch`]: ProgramElement::Branch
/// [`DeferredCall`]: ProgramElement::DeferredCall
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramElement {
    /// A concrete instruction, passed through lowering unchanged.
    Instruction(Instruction),

    /// A call-family instruction whose callee is an ILAsm method-reference
    /// string, resolved to a metadata token during lowering.
    DeferredCall {
        /// The call-family opcode: `call`, `callvirt`, `newobj`, or `ldftn`.
        opcode: OpCode,
        /// The ILAsm method-reference syntax to resolve.
        syntax: Box<str>,
    },

    /// Marks a position: the label denotes the next instruction that follows.
    ///
    /// A given label identity may be marked at most once per program, and a
    /// mark must be followed by at least one instruction.
    Mark(Label),

    /// A branch-family instruction targeting a label.
    Branch {
        /// The branch opcode (`br`/`brtrue`/`brfalse`/`leave` families).
        opcode: OpCode,
        /// The label this branch jumps to.
        target: Label,
    },

    /// A try/finally region over nested element sequences.
    ///
    /// Lowering flattens the region into marked label triples plus an
    /// exception-handler descriptor; nested regions are supported.
    TryFinally {
        /// The protected body.
        try_body: Vec<ProgramElement>,
        /// The finally handler body.
        finally_body: Vec<ProgramElement>,
    },
}

/// Fluent builder for try/finally regions.
///
/// # Examples
///
/// ```rust
/// use ilweave::emit::{elements, TryBlock};
///
/// let region = TryBlock::new(vec![elements::nop()])
///     .finally(vec![elements::endfinally()]);
/// ```
#[derive(Debug, Clone)]
pub struct TryBlock {
    body: Vec<ProgramElement>,
}

impl TryBlock {
    /// Start a protected region over the given body.
    #[must_use]
    pub fn new(body: Vec<ProgramElement>) -> Self {
        TryBlock { body }
    }

    /// Attach the finally handler, producing the region element.
    #[must_use]
    pub fn finally(self, finally_body: Vec<ProgramElement>) -> ProgramElement {
        ProgramElement::TryFinally {
            try_body: self.body,
            finally_body,
        }
    }
}
