//! Exception-handler descriptors produced by try/finally lowering.

use crate::emit::{InstructionId, Label};

/// The kind of protected region a handler guards.
///
/// The program model only builds finally regions; the closed enum leaves the
/// vocabulary explicit at every use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// A finally handler: runs on normal exit and on exception.
    Finally,
}

/// A fully resolved exception-handler descriptor.
///
/// All bounds are instruction identities in the lowered stream. End bounds
/// are exclusive: they identify the first instruction after their region,
/// and `try_end == handler_start` for finally regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionHandler {
    /// What kind of handler this is.
    pub kind: HandlerKind,
    /// First instruction of the protected region.
    pub try_start: InstructionId,
    /// First instruction after the protected region.
    pub try_end: InstructionId,
    /// First instruction of the handler.
    pub handler_start: InstructionId,
    /// First instruction after the handler.
    pub handler_end: InstructionId,
}

/// An unresolved descriptor carrying label identities, produced by region
/// lowering and finalized once every label has a concrete instruction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HandlerLabels {
    pub(crate) kind: HandlerKind,
    pub(crate) try_start: Label,
    pub(crate) try_end: Label,
    pub(crate) handler_start: Label,
    pub(crate) handler_end: Label,
}
