//! The three-pass lowering pipeline.
//!
//! Lowering turns a symbolic element sequence into a flat instruction list
//! plus resolved exception handlers. The passes run in a fixed order, each
//! producing a new sequence:
//!
//! 1. **Region lowering** - recursively flattens every try/finally element
//!    into `[try-start mark, try body, finally-start mark, finally body,
//!    finally-end mark]` with three fresh labels, recording an unresolved
//!    handler descriptor per region (try-end coincides with finally-start)
//! 2. **Deferred-reference resolution** - replaces every deferred call with a
//!    concrete instruction by resolving its syntax through the caller's
//!    [`MemberResolver`]
//! 3. **Label resolution** - a single forward scan binds every marked label
//!    to the next instruction; branches are materialized with a placeholder
//!    operand and back-patched once the scan completes, and the handler
//!    descriptors from pass 1 are finalized against the same label map
//!
//! Structural violations - a label marked twice, a mark with no following
//! instruction, a branch or handler bound whose label is never marked - are
//! programming errors in the caller's program model and surface as dedicated
//! [`Error`](crate::Error) variants.

use std::collections::HashMap;

use crate::{
    emit::{
        handler::HandlerLabels, ExceptionHandler, HandlerKind, Instruction, InstructionId, Label,
        LabelPool, MemberResolver, Operand, ProgramElement,
    },
    Error, Result,
};

/// The fully lowered artifacts of one [`Emitter::emit`] call.
///
/// The caller appends `instructions` to its target method body and
/// `handlers` to the body's exception-handler table; binary encoding itself
/// is the writer's concern, not this crate's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredProgram {
    /// The flat, fully resolved instruction list.
    pub instructions: Vec<Instruction>,
    /// Resolved exception handlers, innermost regions first.
    pub handlers: Vec<ExceptionHandler>,
}

/// Lowers symbolic element sequences through the three-pass pipeline.
///
/// An `Emitter` is scoped to one [`Emitter::emit`] call. It borrows the
/// [`LabelPool`] the caller's labels came from, so the synthetic labels it
/// allocates for try/finally regions can never collide with caller labels.
///
/// # Examples
///
/// ```rust
/// use ilweave::emit::{elements, Emitter, LabelPool, MemberResolver, Token};
///
/// struct NullResolver;
/// impl MemberResolver for NullResolver {
///     fn type_token(&self, _: &str) -> ilweave::Result<Token> { Ok(Token::new(0x0100_0001)) }
///     fn field_token(&self, _: &str) -> ilweave::Result<Token> { Ok(Token::new(0x0400_0001)) }
///     fn method_token(&self, _: &str) -> ilweave::Result<Token> { Ok(Token::new(0x0A00_0001)) }
/// }
///
/// let mut labels = LabelPool::new();
/// let program = Emitter::new(&NullResolver, &mut labels)
///     .emit(vec![elements::ldnull(), elements::ret()])?;
/// assert_eq!(program.instructions.len(), 2);
/// # Ok::<(), ilweave::Error>(())
/// ```
pub struct Emitter<'a, R: MemberResolver> {
    resolver: &'a R,
    labels: &'a mut LabelPool,
}

impl<'a, R: MemberResolver> Emitter<'a, R> {
    /// Create an emitter over the caller's resolver and label pool.
    pub fn new(resolver: &'a R, labels: &'a mut LabelPool) -> Self {
        Emitter { resolver, labels }
    }

    /// Run the three lowering passes over `elements`.
    ///
    /// # Errors
    ///
    /// - any error the [`MemberResolver`] returns for a deferred call
    /// - [`Error::DuplicateLabel`], [`Error::TrailingLabel`],
    ///   [`Error::UnboundLabel`] for structural violations of the program
    ///   model
    pub fn emit(mut self, elements: Vec<ProgramElement>) -> Result<LoweredProgram> {
        let mut flattened = Vec::with_capacity(elements.len());
        let mut handlers = Vec::new();
        self.lower_regions(elements, &mut flattened, &mut handlers);

        let resolved = self.resolve_deferred(flattened)?;

        self.resolve_labels(resolved, handlers)
    }

    /// Pass 1: flatten try/finally regions into marked spans, innermost first.
    fn lower_regions(
        &mut self,
        elements: Vec<ProgramElement>,
        output: &mut Vec<ProgramElement>,
        handlers: &mut Vec<HandlerLabels>,
    ) {
        for element in elements {
            match element {
                ProgramElement::TryFinally {
                    try_body,
                    finally_body,
                } => {
                    let try_start = self.labels.create_label();
                    let handler_start = self.labels.create_label();
                    let handler_end = self.labels.create_label();

                    output.push(ProgramElement::Mark(try_start));
                    self.lower_regions(try_body, output, handlers);
                    output.push(ProgramElement::Mark(handler_start));
                    self.lower_regions(finally_body, output, handlers);
                    output.push(ProgramElement::Mark(handler_end));

                    handlers.push(HandlerLabels {
                        kind: HandlerKind::Finally,
                        try_start,
                        try_end: handler_start,
                        handler_start,
                        handler_end,
                    });
                }
                other => output.push(other),
            }
        }
    }

    /// Pass 2: resolve every deferred call through the member resolver.
    fn resolve_deferred(&self, elements: Vec<ProgramElement>) -> Result<Vec<ProgramElement>> {
        elements
            .into_iter()
            .map(|element| match element {
                ProgramElement::DeferredCall { opcode, syntax } => {
                    let token = self.resolver.method_token(&syntax)?;
                    Ok(ProgramElement::Instruction(Instruction::with_operand(
                        opcode,
                        Operand::Token(token),
                    )))
                }
                other => Ok(other),
            })
            .collect()
    }

    /// Pass 3: bind labels to instruction identities, back-patch branches,
    /// and finalize exception handlers.
    fn resolve_labels(
        self,
        elements: Vec<ProgramElement>,
        pending_handlers: Vec<HandlerLabels>,
    ) -> Result<LoweredProgram> {
        let mut instructions: Vec<Instruction> = Vec::with_capacity(elements.len());
        let mut targets: HashMap<Label, u32> = HashMap::new();
        let mut pending: Vec<Label> = Vec::new();
        let mut fixups: Vec<(usize, Label)> = Vec::new();

        for element in elements {
            let instruction = match element {
                ProgramElement::Mark(label) => {
                    pending.push(label);
                    continue;
                }
                ProgramElement::Instruction(instruction) => instruction,
                ProgramElement::Branch { opcode, target } => {
                    fixups.push((instructions.len(), target));
                    // Placeholder operand until every label is bound.
                    Instruction::new(opcode)
                }
                ProgramElement::DeferredCall { .. } | ProgramElement::TryFinally { .. } => {
                    return Err(Error::UnexpectedElement)
                }
            };

            #[allow(clippy::cast_possible_truncation)]
            let id = instructions.len() as u32;
            for label in pending.drain(..) {
                if targets.insert(label, id).is_some() {
                    return Err(Error::DuplicateLabel);
                }
            }

            instructions.push(instruction);
        }

        if !pending.is_empty() {
            return Err(Error::TrailingLabel);
        }

        for (index, label) in fixups {
            let target = resolve(&targets, label)?;
            instructions[index].operand = Operand::Target(target);
        }

        let handlers = pending_handlers
            .into_iter()
            .map(|handler| {
                Ok(ExceptionHandler {
                    kind: handler.kind,
                    try_start: resolve(&targets, handler.try_start)?,
                    try_end: resolve(&targets, handler.try_end)?,
                    handler_start: resolve(&targets, handler.handler_start)?,
                    handler_end: resolve(&targets, handler.handler_end)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LoweredProgram {
            instructions,
            handlers,
        })
    }
}

fn resolve(targets: &HashMap<Label, u32>, label: Label) -> Result<InstructionId> {
    targets
        .get(&label)
        .copied()
        .map(InstructionId::new)
        .ok_or(Error::UnboundLabel)
}
