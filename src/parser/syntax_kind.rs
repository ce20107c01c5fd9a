//! Syntax kinds for the rowan-based CST.
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! The grammar covers the expression/type/directive surface the rebind
//! engines operate on: qualified expressions, calls, callable references,
//! operator expressions, user types, imports, and package directives.

/// All syntax kinds (tokens and nodes).
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (expressions, types, directives).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,

    // =========================================================================
    // LITERALS / NAMES
    // =========================================================================
    IDENT,          // identifier
    BACKTICK_IDENT, // `quoted identifier`
    INTEGER,        // 42

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    DOT,         // .
    COLON_COLON, // ::
    COMMA,       // ,
    L_PAREN,     // (
    R_PAREN,     // )
    L_ANGLE,     // <
    R_ANGLE,     // >
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    EQ,          // =
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    PLUS_EQ,     // +=
    MINUS_EQ,    // -=

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    IMPORT_KW,
    PACKAGE_KW,
    AS_KW,
    THIS_KW,
    SUPER_KW,

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    // Root
    SOURCE_FILE,

    // Directives
    PACKAGE_DIRECTIVE,
    IMPORT_DIRECTIVE,
    IMPORT_ALIAS,

    // Expressions
    NAME_REF,      // simple name in reference position
    OPERATION_REF, // operator token in operation position
    DOT_EXPR,      // receiver '.' selector
    CALL_EXPR,     // callee '(' args ')'
    ARG_LIST,
    CALLABLE_REF, // receiver? '::' name
    THIS_EXPR,
    SUPER_EXPR,
    BIN_EXPR, // lhs op rhs
    PAREN_EXPR,
    LITERAL_EXPR,

    // Types
    USER_TYPE, // (qualifier '.')? name typeArgs?
    TYPE_ARG_LIST,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT)
    }

    /// Check if this is a keyword.
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::IMPORT_KW as u16) && (self as u16) <= (Self::SUPER_KW as u16)
    }

    /// Check if this is a punctuation token.
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::DOT as u16) && (self as u16) <= (Self::MINUS_EQ as u16)
    }

    /// Check if this token can occupy a name position in a reference.
    pub fn is_name_token(self) -> bool {
        matches!(self, Self::IDENT | Self::BACKTICK_IDENT)
    }

    /// Check if this is an operator token that has a named-function form.
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            Self::PLUS
                | Self::MINUS
                | Self::STAR
                | Self::SLASH
                | Self::EQ_EQ
                | Self::BANG_EQ
                | Self::PLUS_EQ
                | Self::MINUS_EQ
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceLanguage {}

impl rowan::Language for SourceLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<SourceLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SourceLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SourceLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<SourceLanguage>;
