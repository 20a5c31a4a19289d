//! Accumulating front-end over the lowering pipeline.

use crate::{
    emit::{Emitter, Label, LabelPool, LoweredProgram, MemberResolver, ProgramElement},
    Result,
};

/// Accumulates program elements and labels, then lowers them in one call.
///
/// A `ProgramBuilder` owns the [`LabelPool`] its labels come from, so the
/// pipeline's synthetic region labels stay distinct from the caller's by
/// construction.
///
/// # Examples
///
/// ```rust
/// use ilweave::emit::{elements, MemberResolver, ProgramBuilder, Token};
///
/// struct NullResolver;
/// impl MemberResolver for NullResolver {
///     fn type_token(&self, _: &str) -> ilweave::Result<Token> { Ok(Token::new(0x0100_0001)) }
///     fn field_token(&self, _: &str) -> ilweave::Result<Token> { Ok(Token::new(0x0400_0001)) }
///     fn method_token(&self, _: &str) -> ilweave::Result<Token> { Ok(Token::new(0x0A00_0001)) }
/// }
///
/// let mut builder = ProgramBuilder::new(&NullResolver);
/// let skip = builder.create_label();
/// builder.append(elements::ldarg(0));
/// builder.append(elements::brtrue(skip));
/// builder.append(elements::ret());
/// builder.append(elements::mark(skip));
/// builder.append(elements::ret());
///
/// let program = builder.emit()?;
/// assert_eq!(program.instructions.len(), 4);
/// # Ok::<(), ilweave::Error>(())
/// ```
pub struct ProgramBuilder<'a, R: MemberResolver> {
    resolver: &'a R,
    labels: LabelPool,
    elements: Vec<ProgramElement>,
}

impl<'a, R: MemberResolver> ProgramBuilder<'a, R> {
    /// Create an empty builder over the given resolver.
    #[must_use]
    pub fn new(resolver: &'a R) -> Self {
        ProgramBuilder {
            resolver,
            labels: LabelPool::new(),
            elements: Vec::new(),
        }
    }

    /// Allocate a fresh label for use in this builder's program.
    pub fn create_label(&mut self) -> Label {
        self.labels.create_label()
    }

    /// Append one element.
    pub fn append(&mut self, element: ProgramElement) {
        self.elements.push(element);
    }

    /// Append a sequence of elements in order.
    pub fn extend(&mut self, elements: impl IntoIterator<Item = ProgramElement>) {
        self.elements.extend(elements);
    }

    /// Lower the accumulated program through the three-pass pipeline.
    ///
    /// # Errors
    ///
    /// Propagates resolver failures and the pipeline's structural errors; see
    /// [`Emitter::emit`].
    pub fn emit(self) -> Result<LoweredProgram> {
        let mut labels = self.labels;
        Emitter::new(self.resolver, &mut labels).emit(self.elements)
    }
}
