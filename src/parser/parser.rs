//! Recursive descent parser for the source language.
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse a full source file (package directive, imports, expressions).
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Parse a single expression, wrapped in a SOURCE_FILE root so surrounding
/// trivia has somewhere to live. The expression is the file's only child.
pub fn parse_expression(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_expr_root();
    parser.finish()
}

/// Parse a single type, wrapped in a SOURCE_FILE root.
pub fn parse_type(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_type_root();
    parser.finish()
}

/// Parse a single name reference, wrapped in a SOURCE_FILE root.
pub fn parse_name(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_name_root();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Look ahead `n` non-trivia tokens.
    fn nth(&self, n: usize) -> SyntaxKind {
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    /// True when only trivia remains.
    fn at_trailing_trivia(&self) -> bool {
        self.tokens[self.pos..].iter().all(|t| t.kind.is_trivia())
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_and_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        if !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// SourceFile = PackageDirective? ImportDirective* expression*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        self.skip_trivia();
        if self.at(SyntaxKind::PACKAGE_KW) {
            self.parse_package_directive();
        }

        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            if !self.at(SyntaxKind::IMPORT_KW) {
                break;
            }
            self.parse_import_directive();
        }

        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            self.parse_expr();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    fn parse_expr_root(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_expr();
        if !self.at_trailing_trivia() {
            self.error("trailing tokens after expression");
        }
        self.skip_trivia();
        self.finish_node();
    }

    fn parse_type_root(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_user_type();
        if !self.at_trailing_trivia() {
            self.error("trailing tokens after type");
        }
        self.skip_trivia();
        self.finish_node();
    }

    fn parse_name_root(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.skip_trivia();
        if self.current_kind().is_name_token() {
            self.parse_name_ref();
        } else {
            self.error("expected an identifier");
        }
        if !self.at_trailing_trivia() {
            self.error("trailing tokens after name");
        }
        self.skip_trivia();
        self.finish_node();
    }

    // =========================================================================
    // Directives
    // =========================================================================

    /// PackageDirective = 'package' Name ('.' Name)*
    fn parse_package_directive(&mut self) {
        self.start_node(SyntaxKind::PACKAGE_DIRECTIVE);
        self.bump(); // package
        self.parse_dotted_path();
        self.finish_node();
    }

    /// ImportDirective = 'import' Name ('.' Name)* ('as' ImportAlias)?
    fn parse_import_directive(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DIRECTIVE);
        self.bump(); // import
        self.parse_dotted_path();
        if self.nth(0) == SyntaxKind::AS_KW {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.start_node(SyntaxKind::IMPORT_ALIAS);
            self.parse_name_ref();
            self.finish_node();
        }
        self.finish_node();
    }

    fn parse_dotted_path(&mut self) {
        self.skip_trivia();
        self.parse_name_ref();
        while self.nth(0) == SyntaxKind::DOT {
            self.skip_trivia();
            self.bump(); // .
            self.skip_trivia();
            self.parse_name_ref();
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expr(&mut self) {
        self.parse_assignment();
    }

    /// assignment = equality (('=' | '+=' | '-=') assignment)?   (right assoc)
    fn parse_assignment(&mut self) {
        self.skip_trivia();
        let cp = self.checkpoint();
        self.parse_equality();
        if matches!(
            self.nth(0),
            SyntaxKind::EQ | SyntaxKind::PLUS_EQ | SyntaxKind::MINUS_EQ
        ) {
            self.skip_trivia();
            self.start_node_at(cp, SyntaxKind::BIN_EXPR);
            self.parse_operation_ref();
            self.parse_assignment();
            self.finish_node();
        }
    }

    /// equality = additive (('==' | '!=') additive)*
    fn parse_equality(&mut self) {
        self.skip_trivia();
        let cp = self.checkpoint();
        self.parse_additive();
        while matches!(self.nth(0), SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ) {
            self.skip_trivia();
            self.start_node_at(cp, SyntaxKind::BIN_EXPR);
            self.parse_operation_ref();
            self.parse_additive();
            self.finish_node();
        }
    }

    /// additive = multiplicative (('+' | '-') multiplicative)*
    fn parse_additive(&mut self) {
        self.skip_trivia();
        let cp = self.checkpoint();
        self.parse_multiplicative();
        while matches!(self.nth(0), SyntaxKind::PLUS | SyntaxKind::MINUS) {
            self.skip_trivia();
            self.start_node_at(cp, SyntaxKind::BIN_EXPR);
            self.parse_operation_ref();
            self.parse_multiplicative();
            self.finish_node();
        }
    }

    /// multiplicative = postfix (('*' | '/') postfix)*
    fn parse_multiplicative(&mut self) {
        self.skip_trivia();
        let cp = self.checkpoint();
        self.parse_postfix();
        while matches!(self.nth(0), SyntaxKind::STAR | SyntaxKind::SLASH) {
            self.skip_trivia();
            self.start_node_at(cp, SyntaxKind::BIN_EXPR);
            self.parse_operation_ref();
            self.parse_postfix();
            self.finish_node();
        }
    }

    fn parse_operation_ref(&mut self) {
        self.start_node(SyntaxKind::OPERATION_REF);
        self.bump(); // the operator token
        self.finish_node();
        self.skip_trivia();
    }

    /// postfix = primary ('.' selector | ArgList | '::' Name)*
    fn parse_postfix(&mut self) {
        self.skip_trivia();
        let cp = self.checkpoint();

        // Leading '::name' — callable reference with no receiver
        if self.at(SyntaxKind::COLON_COLON) {
            self.start_node(SyntaxKind::CALLABLE_REF);
            self.bump(); // ::
            self.skip_trivia();
            self.parse_name_ref();
            self.finish_node();
            return;
        }

        self.parse_primary();

        loop {
            match self.nth(0) {
                SyntaxKind::DOT => {
                    self.skip_trivia();
                    self.start_node_at(cp, SyntaxKind::DOT_EXPR);
                    self.bump(); // .
                    self.skip_trivia();
                    self.parse_selector();
                    self.finish_node();
                }
                SyntaxKind::L_PAREN => {
                    self.skip_trivia();
                    self.start_node_at(cp, SyntaxKind::CALL_EXPR);
                    self.parse_arg_list();
                    self.finish_node();
                }
                SyntaxKind::COLON_COLON => {
                    self.skip_trivia();
                    self.start_node_at(cp, SyntaxKind::CALLABLE_REF);
                    self.bump(); // ::
                    self.skip_trivia();
                    self.parse_name_ref();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// selector = Name ArgList?   (a call selector keeps the call nested
    /// inside the dot expression, mirroring `a.b(x)` → Dot(a, Call(b, x)))
    fn parse_selector(&mut self) {
        let cp = self.checkpoint();
        self.parse_name_ref();
        if self.nth(0) == SyntaxKind::L_PAREN {
            self.skip_trivia();
            self.start_node_at(cp, SyntaxKind::CALL_EXPR);
            self.parse_arg_list();
            self.finish_node();
        }
    }

    fn parse_primary(&mut self) {
        match self.current_kind() {
            k if k.is_name_token() => self.parse_name_ref(),
            SyntaxKind::THIS_KW => {
                self.start_node(SyntaxKind::THIS_EXPR);
                self.start_node(SyntaxKind::NAME_REF);
                self.bump();
                self.finish_node();
                self.finish_node();
            }
            SyntaxKind::SUPER_KW => {
                self.start_node(SyntaxKind::SUPER_EXPR);
                self.start_node(SyntaxKind::NAME_REF);
                self.bump();
                self.finish_node();
                self.finish_node();
            }
            SyntaxKind::INTEGER => {
                self.start_node(SyntaxKind::LITERAL_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump(); // (
                self.parse_expr();
                self.skip_trivia();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            _ => self.error_and_bump("expected an expression"),
        }
    }

    fn parse_name_ref(&mut self) {
        if self.current_kind().is_name_token() {
            self.start_node(SyntaxKind::NAME_REF);
            self.bump();
            self.finish_node();
        } else {
            self.error_and_bump("expected an identifier");
        }
    }

    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.expect(SyntaxKind::L_PAREN);
        self.skip_trivia();
        if !self.at(SyntaxKind::R_PAREN) && !self.at_eof() {
            self.parse_expr();
            while self.nth(0) == SyntaxKind::COMMA {
                self.skip_trivia();
                self.bump(); // ,
                self.parse_expr();
            }
        }
        self.skip_trivia();
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// UserType = Name TypeArgList? ('.' Name TypeArgList?)*
    ///
    /// Each qualification level nests: `a.b.C` is
    /// UserType(UserType(UserType(a), b), C).
    fn parse_user_type(&mut self) {
        self.skip_trivia();
        let cp = self.checkpoint();

        self.start_node(SyntaxKind::USER_TYPE);
        self.parse_name_ref();
        if self.nth(0) == SyntaxKind::L_ANGLE {
            self.skip_trivia();
            self.parse_type_arg_list();
        }
        self.finish_node();

        while self.nth(0) == SyntaxKind::DOT {
            self.skip_trivia();
            self.start_node_at(cp, SyntaxKind::USER_TYPE);
            self.bump(); // .
            self.skip_trivia();
            self.parse_name_ref();
            if self.nth(0) == SyntaxKind::L_ANGLE {
                self.skip_trivia();
                self.parse_type_arg_list();
            }
            self.finish_node();
        }
    }

    fn parse_type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_ARG_LIST);
        self.expect(SyntaxKind::L_ANGLE);
        self.skip_trivia();
        self.parse_user_type();
        while self.nth(0) == SyntaxKind::COMMA {
            self.skip_trivia();
            self.bump(); // ,
            self.skip_trivia();
            self.parse_user_type();
        }
        self.skip_trivia();
        self.expect(SyntaxKind::R_ANGLE);
        self.finish_node();
    }
}
