use thiserror::Error;

macro_rules! format_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Format {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Format {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants fall into three groups that are never conflated:
///
/// # Parse Errors
/// - [`Error::Argument`] - A required textual input was empty or whitespace-only
/// - [`Error::Format`] - Input does not match the ILAsm grammar at some position
/// - [`Error::NotSupported`] - A recognized grammar construct that is intentionally unimplemented
///
/// # Lowering Errors
/// Structural invariant violations in a caller-built program model. These indicate a
/// programming error, not a data-quality issue, and should never be caught and retried:
/// - [`Error::DuplicateLabel`] - The same label marked at more than one position
/// - [`Error::TrailingLabel`] - A label marker with no following instruction
/// - [`Error::UnboundLabel`] - A branch or handler bound whose label was never marked
/// - [`Error::UnexpectedElement`] - A program element reached a pass that cannot accept it
///
/// # Backend Errors
/// - [`Error::Error`] - Failures surfaced by caller-supplied type providers or member
///   resolvers (unknown assembly monikers, missing members, and the like)
///
/// # Examples
///
/// ```rust
/// use ilweave::{Error, syntax::parse_type, typespec::TypeSpecProvider};
///
/// match parse_type("bool[1]", &TypeSpecProvider) {
///     Err(Error::NotSupported(feature)) => {
///         assert_eq!(feature, "Specifying array bounds");
///     }
///     other => panic!("expected NotSupported, got {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A required textual input was empty or consisted only of whitespace.
    ///
    /// Raised by the parse entry points before any lexing happens. The field
    /// names the offending parameter (`type_syntax`, `field_syntax`, or
    /// `method_syntax`) so callers assembling syntax strings can tell which
    /// one was missing.
    #[error("{param} must be specified")]
    Argument {
        /// Name of the parameter that was empty
        param: &'static str,
    },

    /// The input was non-empty but does not match the ILAsm grammar.
    ///
    /// Carries a human-readable expectation message describing what the
    /// parser was looking for (for example `Expected ',' or '>'.`), plus the
    /// source location where the mismatch was detected for debugging.
    #[error("Format - {file}:{line}: {message}")]
    Format {
        /// The expectation message describing what would have been valid here
        message: String,
        /// The source file in which this error was raised
        file: &'static str,
        /// The source line in which this error was raised
        line: u32,
    },

    /// The input matches a grammar production that is recognized but intentionally
    /// unimplemented.
    ///
    /// Carries the name of the unsupported construct (array bounds, custom
    /// modifiers, method pointers, `.module` scopes, vararg/unmanaged calling
    /// conventions, scope-qualified type specs, declaring-type-less method
    /// syntax, or variable argument lists). It is the caller's decision
    /// whether such an input is a hard failure or should be skipped.
    #[error("{0} is not supported")]
    NotSupported(String),

    /// The same label was marked at more than one position in a program.
    #[error("The same label must not appear in the program more than once")]
    DuplicateLabel,

    /// A label marker appeared after the final instruction of a program.
    ///
    /// Labels denote the instruction that follows them; a label with nothing
    /// following it can never resolve.
    #[error("Labels must not appear after the final instruction")]
    TrailingLabel,

    /// A branch or exception-handler bound references a label that was never
    /// marked anywhere in the program.
    #[error("The label of a branch instruction was not added to the program")]
    UnboundLabel,

    /// A program element reached a lowering pass that cannot accept it.
    ///
    /// Raised when label resolution encounters an element that should have
    /// been eliminated by an earlier pass.
    #[error("Invalid program element for this lowering pass")]
    UnexpectedElement,

    /// Generic error for miscellaneous failures.
    ///
    /// Used by caller-supplied [`crate::syntax::TypeProvider`] and
    /// [`crate::emit::MemberResolver`] implementations to surface
    /// backend-specific failures through the common error type.
    #[error("{0}")]
    Error(String),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
