//! Logos-based lexer for the source language.
//!
//! Fast tokenization using the logos crate. Trivia is kept so the CST
//! stays lossless.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    // =========================================================================
    // KEYWORDS (before Ident so logos prefers the exact token)
    // =========================================================================
    #[token("import")]
    ImportKw,

    #[token("package")]
    PackageKw,

    #[token("as")]
    AsKw,

    #[token("this")]
    ThisKw,

    #[token("super")]
    SuperKw,

    // =========================================================================
    // LITERALS / NAMES
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"`[^`\n]*`")]
    BacktickIdent,

    #[regex(r"[0-9]+")]
    Integer,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("::")]
    ColonColon,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Eq,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::ImportKw => SyntaxKind::IMPORT_KW,
            LogosToken::PackageKw => SyntaxKind::PACKAGE_KW,
            LogosToken::AsKw => SyntaxKind::AS_KW,
            LogosToken::ThisKw => SyntaxKind::THIS_KW,
            LogosToken::SuperKw => SyntaxKind::SUPER_KW,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::BacktickIdent => SyntaxKind::BACKTICK_IDENT,
            LogosToken::Integer => SyntaxKind::INTEGER,
            LogosToken::ColonColon => SyntaxKind::COLON_COLON,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::PlusEq => SyntaxKind::PLUS_EQ,
            LogosToken::MinusEq => SyntaxKind::MINUS_EQ,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::LAngle => SyntaxKind::L_ANGLE,
            LogosToken::RAngle => SyntaxKind::R_ANGLE,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Eq => SyntaxKind::EQ,
        }
    }
}
