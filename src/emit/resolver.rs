//! The member-resolution capability consumed by the lowering pipeline.

use crate::{emit::Token, Result};

/// Resolves ILAsm member syntax to metadata tokens.
///
/// This is the pipeline's boundary to the metadata backend: pass 2 hands
/// every deferred call's syntax string to [`MemberResolver::method_token`],
/// and callers resolve field/type syntax up front when building elements
/// that carry token operands.
///
/// Production implementations parse the syntax through
/// [`crate::syntax::parse_type`] /
/// [`crate::syntax::parse_field_reference`] /
/// [`crate::syntax::parse_method_reference`] against their own
/// [`crate::syntax::TypeProvider`], then intern the result in their metadata
/// tables. Implementations surface their own failures (an unknown member, an
/// unregistered assembly moniker) as [`crate::Error`] values.
pub trait MemberResolver {
    /// Resolve ILAsm type syntax to a token.
    fn type_token(&self, syntax: &str) -> Result<Token>;

    /// Resolve ILAsm field-reference syntax to a token.
    fn field_token(&self, syntax: &str) -> Result<Token>;

    /// Resolve ILAsm method-reference syntax to a token.
    fn method_token(&self, syntax: &str) -> Result<Token>;
}
