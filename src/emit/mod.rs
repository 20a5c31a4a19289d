//! Symbolic CIL instruction-stream building and lowering.
//!
//! Callers describe code as a sequence of [`ProgramElement`]s - concrete
//! instructions, label marks, label-targeted branches, try/finally regions,
//! and calls named by ILAsm syntax strings - and the three-pass pipeline in
//! [`Emitter`] lowers that description into a flat [`LoweredProgram`]: fully
//! resolved instructions plus exception-handler descriptors. Writing the
//! result into a binary method body is the caller's side of the boundary.
//!
//! # Key Types
//! - [`ProgramElement`] / [`TryBlock`] - The symbolic program model
//! - [`elements`] - Factory functions with shortest-encoding selection
//! - [`Label`] / [`LabelPool`] - Opaque position markers and their allocator
//! - [`OpCode`] / [`Instruction`] / [`Operand`] - The concrete instruction model
//! - [`Token`] - Metadata tokens, the resolver's currency
//! - [`MemberResolver`] - Capability resolving ILAsm syntax to tokens
//! - [`Emitter`] / [`ProgramBuilder`] - The lowering pipeline and its
//!   accumulating front-end
//! - [`ExceptionHandler`] - Resolved finally-region descriptors
//!
//! # Example
//! ```rust
//! use ilweave::emit::{elements, MemberResolver, ProgramBuilder, Token, TryBlock};
//!
//! struct NullResolver;
//! impl MemberResolver for NullResolver {
//!     fn type_token(&self, _: &str) -> ilweave::Result<Token> { Ok(Token::new(0x0100_0001)) }
//!     fn field_token(&self, _: &str) -> ilweave::Result<Token> { Ok(Token::new(0x0400_0001)) }
//!     fn method_token(&self, _: &str) -> ilweave::Result<Token> { Ok(Token::new(0x0A00_0001)) }
//! }
//!
//! let mut builder = ProgramBuilder::new(&NullResolver);
//! let done = builder.create_label();
//! builder.append(TryBlock::new(vec![
//!     elements::call("void class Worker::Run()"),
//!     elements::leave(done),
//! ]).finally(vec![
//!     elements::endfinally(),
//! ]));
//! builder.append(elements::mark(done));
//! builder.append(elements::ret());
//!
//! let program = builder.emit()?;
//! assert_eq!(program.handlers.len(), 1);
//! # Ok::<(), ilweave::Error>(())
//! ```

mod builder;
mod element;
pub mod elements;
mod emitter;
mod handler;
mod instruction;
mod label;
mod opcode;
mod resolver;
mod token;

pub use builder::ProgramBuilder;
pub use element::{ProgramElement, TryBlock};
pub use emitter::{Emitter, LoweredProgram};
pub use handler::{ExceptionHandler, HandlerKind};
pub use instruction::{Immediate, Instruction, InstructionId, Operand};
pub use label::{Label, LabelPool};
pub use opcode::{FlowType, OpCode};
pub use resolver::MemberResolver;
pub use token::Token;
