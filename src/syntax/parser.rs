//! Recursive-descent parser for ILAsm type, field-reference, and method-reference syntax.
//!
//! The parser consumes tokens from [`crate::syntax::Lexer`] and produces values of the
//! caller's type representation by calling into a [`crate::syntax::TypeProvider`]. Every
//! decision point consumes at most one token of lookahead; there is no backtracking.
//!
//! # Grammar
//!
//! ```text
//! Type          := TypeKeyword Postfix*
//! TypeKeyword   := primitive | '!' n | '!!' n | ('class'|'valuetype') TypeReference
//! Postfix       := '&' | '*' | 'pinned' | '[' ','* ']' | '<' Type (',' Type)* '>'
//! TypeReference := ('[' DottedName ']')? DottedName ('/' DottedName)*
//! Field         := Type TypeSpec '::' identifier
//! Method        := ('instance' 'explicit'?)? 'default'? Type TypeSpec '::' MethodName
//!                  ('<' Type (',' Type)* '>')? '(' (Type (',' Type)*)? ')'
//! TypeSpec      := TypeKeyword-form Type | bare DottedName ('/' DottedName)*
//! MethodName    := '.ctor' | '.cctor' | DottedName
//! ```
//!
//! Constructs the grammar recognizes but deliberately rejects (array bounds, custom
//! modifiers, method pointers, `.module` scopes, `vararg`/`unmanaged` conventions,
//! scope-qualified type specs, declaring-type-less methods, `...` parameter sentinels)
//! raise [`crate::Error::NotSupported`]; any other mismatch raises
//! [`crate::Error::Format`] with an expectation message.

use crate::{
    syntax::{
        FieldReference, Lexer, MethodCallingConvention, MethodReference, PrimitiveTypeCode,
        SyntaxToken, TypeProvider,
    },
    Error, Result,
};

const EXPECTED_TYPE_KEYWORD: &str = "Expected valid type keyword.";
const EXPECTED_AFTER_TYPE: &str = "Expected '&', '*', 'pinned', '[', '<', or end to follow type.";

/// Parse a standalone ILAsm type.
///
/// Produces exactly one value of the provider's type representation, built
/// bottom-up through the provider's factory operations.
///
/// # Errors
///
/// - [`Error::Argument`] when `type_syntax` is empty or whitespace-only
/// - [`Error::Format`] when the input does not match the type grammar
/// - [`Error::NotSupported`] for recognized-but-unimplemented constructs
///
/// # Examples
///
/// ```rust
/// use ilweave::{syntax::parse_type, typespec::TypeSpecProvider};
///
/// let ty = parse_type("class [mscorlib]System.Collections.Generic.List`1<int32>", &TypeSpecProvider)?;
/// assert_eq!(ty.to_string(), "class [mscorlib]System.Collections.Generic.List`1<int32>");
/// # Ok::<(), ilweave::Error>(())
/// ```
pub fn parse_type<P: TypeProvider>(type_syntax: &str, provider: &P) -> Result<P::Type> {
    require_input(type_syntax, "type_syntax")?;
    TypeParser::new(type_syntax, provider).parse_type_entry()
}

/// Parse an ILAsm field reference: `FieldType DeclaringType::field_name`.
///
/// # Errors
///
/// - [`Error::Argument`] when `field_syntax` is empty or whitespace-only
/// - [`Error::Format`] when the input does not match the field grammar
/// - [`Error::NotSupported`] for recognized-but-unimplemented constructs
///
/// # Examples
///
/// ```rust
/// use ilweave::{syntax::parse_field_reference, typespec::TypeSpecProvider};
///
/// let field = parse_field_reference(
///     "class System.Collections.Generic.Dictionary`2<string, string> class Resolver::map",
///     &TypeSpecProvider,
/// )?;
/// assert_eq!(field.field_name, "map");
/// # Ok::<(), ilweave::Error>(())
/// ```
pub fn parse_field_reference<P: TypeProvider>(
    field_syntax: &str,
    provider: &P,
) -> Result<FieldReference<P::Type>> {
    require_input(field_syntax, "field_syntax")?;
    TypeParser::new(field_syntax, provider).parse_field_entry()
}

/// Parse an ILAsm method reference:
/// `[instance [explicit]] ReturnType DeclaringType::Name[<GenericArgs>](Params)`.
///
/// # Errors
///
/// - [`Error::Argument`] when `method_syntax` is empty or whitespace-only
/// - [`Error::Format`] when the input does not match the method grammar
/// - [`Error::NotSupported`] for recognized-but-unimplemented constructs,
///   including method syntax without a `DeclaringType::` prefix
///
/// # Examples
///
/// ```rust
/// use ilweave::{syntax::parse_method_reference, typespec::TypeSpecProvider};
///
/// let method = parse_method_reference(
///     "instance void class System.AppDomain::add_AssemblyResolve(class System.ResolveEventHandler)",
///     &TypeSpecProvider,
/// )?;
/// assert!(method.is_instance());
/// assert_eq!(method.method_name, "add_AssemblyResolve");
/// assert_eq!(method.parameters.len(), 1);
/// # Ok::<(), ilweave::Error>(())
/// ```
pub fn parse_method_reference<P: TypeProvider>(
    method_syntax: &str,
    provider: &P,
) -> Result<MethodReference<P::Type>> {
    require_input(method_syntax, "method_syntax")?;
    TypeParser::new(method_syntax, provider).parse_method_entry()
}

fn require_input(syntax: &str, param: &'static str) -> Result<()> {
    if syntax.trim().is_empty() {
        return Err(Error::Argument { param });
    }
    Ok(())
}

/// Outcome of the type production.
///
/// `Partial` carries the one token that terminated the production without
/// belonging to it, together with the expectation message valid at that
/// point; the caller decides whether the token opens its own production or is
/// a format error.
enum Progress<T> {
    /// The production consumed the input through end-of-input.
    Complete(T),
    /// A type was produced; the given token follows it.
    Partial(T, SyntaxToken, &'static str),
    /// The first token did not start the production.
    Unmatched(SyntaxToken, &'static str),
}

enum Keyword<T> {
    Matched(T),
    Unmatched(SyntaxToken),
}

#[derive(Clone, Copy)]
enum MemberKind {
    Field,
    Method,
}

struct TypeParser<'s, 'p, P: TypeProvider> {
    lexer: Lexer<'s>,
    provider: &'p P,
}

impl<'s, 'p, P: TypeProvider> TypeParser<'s, 'p, P> {
    fn new(syntax: &'s str, provider: &'p P) -> Self {
        TypeParser {
            lexer: Lexer::new(syntax),
            provider,
        }
    }

    fn parse_type_entry(mut self) -> Result<P::Type> {
        match self.parse_type_production()? {
            Progress::Complete(ty) => Ok(ty),
            Progress::Partial(_, _, message) | Progress::Unmatched(_, message) => {
                Err(format_error!("{}", message))
            }
        }
    }

    fn parse_field_entry(mut self) -> Result<FieldReference<P::Type>> {
        let field_type =
            self.parse_member_type("Expected declaring type to follow the field type.")?;
        let declaring_type = self.parse_declaring_type(MemberKind::Field)?;

        let field_name = match self.lexer.next_token() {
            SyntaxToken::Identifier(name) => name.into_string(),
            _ => return Err(format_error!("Expected field name to follow '::'.")),
        };

        self.expect_end("field reference")?;

        Ok(FieldReference {
            field_type,
            declaring_type,
            field_name,
        })
    }

    fn parse_method_entry(mut self) -> Result<MethodReference<P::Type>> {
        let calling_convention = self.parse_calling_convention()?;
        let return_type =
            self.parse_member_type("Expected declaring type to follow the return type.")?;
        let declaring_type = self.parse_declaring_type(MemberKind::Method)?;
        let method_name = self.parse_method_name()?;

        let generic_arguments = if matches!(self.lexer.peek(), SyntaxToken::OpenAngle) {
            self.lexer.next_token();
            self.parse_generic_arguments()?
        } else {
            Vec::new()
        };

        if !matches!(self.lexer.next_token(), SyntaxToken::OpenParen) {
            return Err(format_error!("Expected '(' to follow the method name."));
        }
        let parameters = self.parse_parameter_list()?;

        self.expect_end("method reference")?;

        Ok(MethodReference {
            calling_convention,
            return_type,
            declaring_type,
            method_name,
            generic_arguments,
            parameters,
        })
    }

    /// The full type production: a type keyword followed by zero or more
    /// postfix modifiers applied in source order.
    fn parse_type_production(&mut self) -> Result<Progress<P::Type>> {
        let mut ty = match self.parse_type_keyword()? {
            Keyword::Matched(ty) => ty,
            Keyword::Unmatched(token) => {
                return Ok(Progress::Unmatched(token, EXPECTED_TYPE_KEYWORD))
            }
        };

        loop {
            match self.lexer.next_token() {
                SyntaxToken::End => return Ok(Progress::Complete(ty)),
                SyntaxToken::Ampersand => ty = self.provider.byref_type(ty)?,
                SyntaxToken::Asterisk => ty = self.provider.pointer_type(ty)?,
                SyntaxToken::Pinned => ty = self.provider.pinned_type(ty)?,
                SyntaxToken::OpenSquare => {
                    let rank = self.read_array_rank()?;
                    ty = self.provider.array_type(ty, rank)?;
                }
                SyntaxToken::OpenAngle => {
                    let arguments = self.parse_generic_arguments()?;
                    ty = self.provider.generic_instantiation(ty, arguments)?;
                }
                token => return Ok(Progress::Partial(ty, token, EXPECTED_AFTER_TYPE)),
            }
        }
    }

    /// Rank of an array postfix: 1 plus the number of interior commas.
    /// Any bound specifier inside the brackets is recognized but unsupported.
    fn read_array_rank(&mut self) -> Result<u32> {
        let mut rank = 1;

        loop {
            match self.lexer.next_token() {
                SyntaxToken::CloseSquare => return Ok(rank),
                SyntaxToken::Comma => rank += 1,
                SyntaxToken::Ellipsis | SyntaxToken::Number(_) => {
                    return Err(Error::NotSupported("Specifying array bounds".to_string()))
                }
                _ => {
                    return Err(format_error!("Expected ',', ']', '...', or Int32 literal."))
                }
            }
        }
    }

    /// Comma-separated generic arguments; the opening `<` has been consumed.
    /// Each argument is fully consumed before the `,`/`>` decision.
    fn parse_generic_arguments(&mut self) -> Result<Vec<P::Type>> {
        let mut arguments = Vec::new();

        loop {
            match self.parse_type_production()? {
                Progress::Unmatched(_, message) => return Err(format_error!("{}", message)),
                Progress::Partial(ty, SyntaxToken::CloseAngle, _) => {
                    arguments.push(ty);
                    return Ok(arguments);
                }
                Progress::Partial(ty, SyntaxToken::Comma, _) => arguments.push(ty),
                Progress::Partial(..) | Progress::Complete(_) => {
                    return Err(format_error!("Expected ',' or '>'."))
                }
            }
        }
    }

    fn parse_type_keyword(&mut self) -> Result<Keyword<P::Type>> {
        let provider = self.provider;
        let primitive = |code| -> Result<P::Type> { provider.primitive_type(code) };

        let ty = match self.lexer.next_token() {
            token @ (SyntaxToken::Exclamation | SyntaxToken::DoubleExclamation) => {
                let is_method = token == SyntaxToken::DoubleExclamation;

                match self.lexer.next_token() {
                    SyntaxToken::Number(index) => {
                        if is_method {
                            self.provider.generic_method_parameter(index)?
                        } else {
                            self.provider.generic_type_parameter(index)?
                        }
                    }
                    _ => {
                        let syntax = if is_method { "!!" } else { "!" };
                        return Err(format_error!("Expected numeric literal to follow '{}'.", syntax));
                    }
                }
            }

            SyntaxToken::Bool => primitive(PrimitiveTypeCode::Boolean)?,
            SyntaxToken::Char => primitive(PrimitiveTypeCode::Char)?,
            SyntaxToken::Float32 => primitive(PrimitiveTypeCode::R4)?,
            SyntaxToken::Float64 => primitive(PrimitiveTypeCode::R8)?,
            SyntaxToken::Int8 => primitive(PrimitiveTypeCode::I1)?,
            SyntaxToken::Int16 => primitive(PrimitiveTypeCode::I2)?,
            SyntaxToken::Int32 => primitive(PrimitiveTypeCode::I4)?,
            SyntaxToken::Int64 => primitive(PrimitiveTypeCode::I8)?,
            SyntaxToken::Object => primitive(PrimitiveTypeCode::Object)?,
            SyntaxToken::String => primitive(PrimitiveTypeCode::String)?,
            SyntaxToken::Typedref => primitive(PrimitiveTypeCode::TypedReference)?,
            SyntaxToken::Void => primitive(PrimitiveTypeCode::Void)?,

            SyntaxToken::Native => match self.lexer.next_token() {
                SyntaxToken::Int => primitive(PrimitiveTypeCode::I)?,
                SyntaxToken::Unsigned => {
                    if !matches!(self.lexer.next_token(), SyntaxToken::Int) {
                        return Err(format_error!("Expected 'int' to follow 'native unsigned'."));
                    }
                    primitive(PrimitiveTypeCode::U)?
                }
                _ => {
                    return Err(format_error!(
                        "Expected 'int' or 'unsigned int' to follow 'native'."
                    ))
                }
            },

            SyntaxToken::Unsigned => match self.lexer.next_token() {
                SyntaxToken::Int8 => primitive(PrimitiveTypeCode::U1)?,
                SyntaxToken::Int16 => primitive(PrimitiveTypeCode::U2)?,
                SyntaxToken::Int32 => primitive(PrimitiveTypeCode::U4)?,
                SyntaxToken::Int64 => primitive(PrimitiveTypeCode::U8)?,
                _ => {
                    return Err(format_error!(
                        "Expected 'int8', 'int16', 'int32', or 'int64' to follow 'unsigned'."
                    ))
                }
            },

            SyntaxToken::Class => self.parse_user_defined_type(false)?,
            SyntaxToken::Valuetype => self.parse_user_defined_type(true)?,

            SyntaxToken::Modopt | SyntaxToken::Modreq => {
                return Err(Error::NotSupported("Custom modifiers".to_string()))
            }
            SyntaxToken::Method => {
                return Err(Error::NotSupported("Method pointers".to_string()))
            }

            token => return Ok(Keyword::Unmatched(token)),
        };

        Ok(Keyword::Matched(ty))
    }

    /// A `class`/`valuetype` type reference: optional `[moniker]`, dotted
    /// top-level name, optional `/`-separated nested chain.
    fn parse_user_defined_type(&mut self, is_value_type: bool) -> Result<P::Type> {
        let (assembly, name) = self.parse_top_level_start(is_value_type)?;
        let (namespace, name) = self.parse_dotted_name(name)?;

        let nested = if matches!(self.lexer.peek(), SyntaxToken::Slash) {
            self.parse_nested_names()?
        } else {
            Vec::new()
        };

        self.provider.user_defined_type(
            Some(is_value_type),
            assembly.as_deref(),
            &namespace,
            &name,
            &nested,
        )
    }

    fn parse_top_level_start(&mut self, is_value_type: bool) -> Result<(Option<String>, String)> {
        match self.lexer.next_token() {
            SyntaxToken::OpenSquare => {
                let first = match self.lexer.next_token() {
                    SyntaxToken::Identifier(part) => part.into_string(),
                    SyntaxToken::DotModule => {
                        return Err(Error::NotSupported("'.module' scope syntax".to_string()))
                    }
                    _ => {
                        return Err(format_error!(
                            "Expected identifier or '.module' to follow '['."
                        ))
                    }
                };

                let mut parts = vec![first];
                loop {
                    match self.lexer.next_token() {
                        SyntaxToken::CloseSquare => break,
                        SyntaxToken::Dot => match self.lexer.next_token() {
                            SyntaxToken::Identifier(part) => parts.push(part.into_string()),
                            _ => return Err(format_error!("Expected identifier to follow '.'.")),
                        },
                        _ => {
                            return Err(format_error!("Expected '.' or ']' to follow identifier."))
                        }
                    }
                }

                let name = match self.lexer.next_token() {
                    SyntaxToken::Identifier(name) => name.into_string(),
                    _ => return Err(format_error!("Expected identifier to follow ']'.")),
                };

                Ok((Some(parts.join(".")), name))
            }

            SyntaxToken::Identifier(name) => Ok((None, name.into_string())),

            _ => {
                let keyword = if is_value_type { "valuetype" } else { "class" };
                Err(format_error!("Expected identifier or '[' to follow '{}'.", keyword))
            }
        }
    }

    /// Greedy dotted-name folding: every but the last dotted segment becomes
    /// namespace, the final segment stays the type name.
    fn parse_dotted_name(&mut self, mut name: String) -> Result<(String, String)> {
        let mut namespace_segments: Vec<String> = Vec::new();

        while matches!(self.lexer.peek(), SyntaxToken::Dot) {
            self.lexer.next_token();
            match self.lexer.next_token() {
                SyntaxToken::Identifier(segment) => {
                    namespace_segments.push(std::mem::replace(&mut name, segment.into_string()));
                }
                _ => return Err(format_error!("Expected identifier to follow '.'.")),
            }
        }

        Ok((namespace_segments.join("."), name))
    }

    /// `/`-separated nested type names, outer to inner; each segment is
    /// itself dot-splittable. Entered with `/` peeked.
    fn parse_nested_names(&mut self) -> Result<Vec<String>> {
        let mut nested = Vec::new();
        let mut more = true;

        while more {
            self.lexer.next_token();

            let first = match self.lexer.next_token() {
                SyntaxToken::Identifier(segment) => segment.into_string(),
                _ => return Err(format_error!("Expected identifier to follow '/'.")),
            };

            let mut segments = vec![first];
            more = false;

            loop {
                match self.lexer.peek() {
                    SyntaxToken::Dot => {
                        self.lexer.next_token();
                        match self.lexer.next_token() {
                            SyntaxToken::Identifier(segment) => {
                                segments.push(segment.into_string());
                            }
                            _ => return Err(format_error!("Expected identifier to follow '.'.")),
                        }
                    }
                    SyntaxToken::Slash => {
                        more = true;
                        break;
                    }
                    _ => break,
                }
            }

            nested.push(segments.join("."));
        }

        Ok(nested)
    }

    /// The leading type of a member reference. It must be followed by the
    /// declaring type, so reaching end-of-input here is a format error; the
    /// terminating token is handed back to the lexer for the next production.
    fn parse_member_type(&mut self, expectation: &'static str) -> Result<P::Type> {
        match self.parse_type_production()? {
            Progress::Partial(ty, token, _) => {
                self.lexer.unread(token);
                Ok(ty)
            }
            Progress::Complete(_) => Err(format_error!("{}", expectation)),
            Progress::Unmatched(_, message) => Err(format_error!("{}", message)),
        }
    }

    /// The declaring-type spec of a member reference, including its `::`.
    ///
    /// Supported forms are a type-keyword production or a bare dotted
    /// identifier (whose value-type-ness is unknown to the grammar); a
    /// bracketed scope-qualified reference is recognized but unsupported.
    fn parse_declaring_type(&mut self, kind: MemberKind) -> Result<P::Type> {
        let (declaring, next) = match self.lexer.next_token() {
            SyntaxToken::OpenSquare => {
                return Err(Error::NotSupported(
                    "Scope-qualified type specifications".to_string(),
                ))
            }

            SyntaxToken::Identifier(name) => {
                let ty = self.parse_bare_named_type(name.into_string())?;
                let next = self.lexer.next_token();
                (ty, next)
            }

            token => {
                self.lexer.unread(token);
                match self.parse_type_production()? {
                    Progress::Partial(ty, token, _) => (ty, token),
                    Progress::Complete(ty) => (ty, SyntaxToken::End),
                    Progress::Unmatched(_, message) => return Err(format_error!("{}", message)),
                }
            }
        };

        match next {
            SyntaxToken::DoubleColon => Ok(declaring),
            SyntaxToken::OpenParen if matches!(kind, MemberKind::Method) => Err(
                Error::NotSupported("Method references without a declaring type".to_string()),
            ),
            _ => Err(format_error!("Expected '::' to follow the declaring type.")),
        }
    }

    fn parse_bare_named_type(&mut self, name: String) -> Result<P::Type> {
        let (namespace, name) = self.parse_dotted_name(name)?;

        let nested = if matches!(self.lexer.peek(), SyntaxToken::Slash) {
            self.parse_nested_names()?
        } else {
            Vec::new()
        };

        self.provider
            .user_defined_type(None, None, &namespace, &name, &nested)
    }

    fn parse_calling_convention(&mut self) -> Result<MethodCallingConvention> {
        let mut flags = MethodCallingConvention::empty();

        if matches!(self.lexer.peek(), SyntaxToken::Instance) {
            self.lexer.next_token();
            flags |= MethodCallingConvention::HAS_THIS;

            if matches!(self.lexer.peek(), SyntaxToken::Explicit) {
                self.lexer.next_token();
                flags |= MethodCallingConvention::EXPLICIT_THIS;
            }
        }

        match self.lexer.peek() {
            SyntaxToken::Default => {
                self.lexer.next_token();
            }
            SyntaxToken::Vararg => {
                return Err(Error::NotSupported(
                    "The 'vararg' calling convention".to_string(),
                ))
            }
            SyntaxToken::Unmanaged => {
                return Err(Error::NotSupported(
                    "Unmanaged calling conventions".to_string(),
                ))
            }
            _ => {}
        }

        Ok(flags)
    }

    fn parse_method_name(&mut self) -> Result<String> {
        match self.lexer.next_token() {
            SyntaxToken::DotCtor => Ok(".ctor".to_string()),
            SyntaxToken::DotCctor => Ok(".cctor".to_string()),
            SyntaxToken::Identifier(name) => {
                let mut name = name.into_string();

                while matches!(self.lexer.peek(), SyntaxToken::Dot) {
                    self.lexer.next_token();
                    match self.lexer.next_token() {
                        SyntaxToken::Identifier(segment) => {
                            name.push('.');
                            name.push_str(&segment);
                        }
                        _ => return Err(format_error!("Expected identifier to follow '.'.")),
                    }
                }

                Ok(name)
            }
            _ => Err(format_error!("Expected method name to follow '::'.")),
        }
    }

    /// Parenthesized parameter list; the `(` has been consumed. A literal
    /// `...` sentinel (variable arguments) is recognized but unsupported.
    fn parse_parameter_list(&mut self) -> Result<Vec<P::Type>> {
        if matches!(self.lexer.peek(), SyntaxToken::CloseParen) {
            self.lexer.next_token();
            return Ok(Vec::new());
        }

        let mut parameters = Vec::new();

        loop {
            if matches!(self.lexer.peek(), SyntaxToken::Ellipsis) {
                return Err(Error::NotSupported("Variable argument lists".to_string()));
            }

            match self.parse_type_production()? {
                Progress::Partial(ty, SyntaxToken::CloseParen, _) => {
                    parameters.push(ty);
                    return Ok(parameters);
                }
                Progress::Partial(ty, SyntaxToken::Comma, _) => parameters.push(ty),
                Progress::Partial(..) | Progress::Complete(_) => {
                    return Err(format_error!("Expected ',' or ')'."))
                }
                Progress::Unmatched(_, message) => return Err(format_error!("{}", message)),
            }
        }
    }

    fn expect_end(&mut self, production: &'static str) -> Result<()> {
        if matches!(self.lexer.next_token(), SyntaxToken::End) {
            return Ok(());
        }
        Err(format_error!("Expected end to follow the {}.", production))
    }
}
