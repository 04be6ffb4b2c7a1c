//! Recursive descent parser for the C-simple grammar
//!
//! One method per grammar production, a single lookahead [`Lexeme`] pulled
//! lazily from the [`Scanner`], and control flow decided purely by the
//! lookahead's category. The grammar is LL(1); no backtracking is needed.
//!
//! ```text
//! program     := stmt_list
//! stmt_list   := stmt*
//! stmt        := decl | assign_stmt | if_stmt | for_stmt | block | ';'
//! decl        := ('int' | 'float') ID ';'
//! assign_stmt := assign_expr ';'
//! assign_expr := ID '=' expr
//! if_stmt     := 'if' '(' expr ')' stmt ['else' stmt]
//! for_stmt    := 'for' '(' assign_expr ';' expr ';' assign_expr ')' stmt
//! block       := '{' stmt_list '}'
//! expr        := simple_expr [('==' | '<' | '>') simple_expr]
//! simple_expr := term (('+' | '-') term)*
//! term        := factor (('*' | '/') factor)*
//! factor      := '(' expr ')' | NUM | FLOATNUM | ID
//! ```
//!
//! Symbol-table checking is optional. When enabled, declarations insert into
//! the innermost scope, uses are looked up the moment the identifier becomes
//! the lookahead, and blocks push/pop scopes in lockstep with the parser's
//! recursion into `block` -- the pop runs on every exit path, error unwinds
//! included. When disabled, identifiers are accepted by category alone.

use log::debug;

use super::errors::{FrontError, SymbolError, SyntaxError};
use super::lexer::{Keyword, Lexeme, Scanner, TokenKind};
use super::symbols::{SymbolInfo, SymbolTable, VarType};

/// Categories that can start a statement; `stmt_list` repeats while the
/// lookahead stays inside this set.
const STMT_TRIGGERS: [TokenKind; 7] = [
    TokenKind::Keyword(Keyword::Int),
    TokenKind::Keyword(Keyword::Float),
    TokenKind::Ident,
    TokenKind::Keyword(Keyword::If),
    TokenKind::Keyword(Keyword::For),
    TokenKind::LBrace,
    TokenKind::Semi,
];

/// Predictive recursive descent recognizer for C-simple.
///
/// Owns one scanner and, when checking is enabled, one symbol table, both
/// for the duration of a single [`Parser::parse`] invocation.
pub struct Parser<'src> {
    scanner: Scanner<'src>,
    lookahead: Option<Lexeme>,
    symbols: Option<SymbolTable>,
}

impl<'src> Parser<'src> {
    /// Create a parser over `source`, priming the lookahead with the first
    /// lexeme. `check_symbols` enables declared/undeclared checking.
    pub fn new(source: &'src str, check_symbols: bool) -> Result<Self, FrontError> {
        let mut scanner = Scanner::new(source);
        let lookahead = scanner.next_lexeme()?;
        Ok(Self {
            scanner,
            lookahead,
            symbols: check_symbols.then(SymbolTable::new),
        })
    }

    /// Run the full grammar from the start symbol. Succeeds silently or
    /// fails on the first violation; the whole input must be consumed.
    pub fn parse(&mut self) -> Result<(), FrontError> {
        debug!(
            "parsing (symbol checking {})",
            if self.symbols.is_some() { "on" } else { "off" }
        );

        self.program()?;

        // stmt_list stops on anything outside its trigger set; accepting
        // here would let trailing garbage pass silently.
        if self.lookahead.is_some() {
            return Err(self.syntax_error(STMT_TRIGGERS.to_vec()));
        }

        debug!("parse accepted");
        Ok(())
    }

    fn program(&mut self) -> Result<(), FrontError> {
        self.stmt_list()
    }

    fn stmt_list(&mut self) -> Result<(), FrontError> {
        while self
            .lookahead_kind()
            .is_some_and(|kind| STMT_TRIGGERS.contains(&kind))
        {
            self.stmt()?;
        }
        Ok(())
    }

    fn stmt(&mut self) -> Result<(), FrontError> {
        match self.lookahead_kind() {
            Some(TokenKind::Keyword(Keyword::Int) | TokenKind::Keyword(Keyword::Float)) => {
                self.decl()
            }
            Some(TokenKind::Ident) => self.assign_stmt(),
            Some(TokenKind::Keyword(Keyword::If)) => self.if_stmt(),
            Some(TokenKind::Keyword(Keyword::For)) => self.for_stmt(),
            Some(TokenKind::LBrace) => self.block(),
            Some(TokenKind::Semi) => self.expect(TokenKind::Semi),
            _ => Err(self.syntax_error(STMT_TRIGGERS.to_vec())),
        }
    }

    /// `decl := ('int' | 'float') ID ';'`
    ///
    /// The binding is inserted before the semicolon is consumed, so it is
    /// visible to anything that could follow on the same statement.
    fn decl(&mut self) -> Result<(), FrontError> {
        let (keyword, ty) = match self.lookahead_kind() {
            Some(TokenKind::Keyword(Keyword::Int)) => (Keyword::Int, VarType::Int),
            Some(TokenKind::Keyword(Keyword::Float)) => (Keyword::Float, VarType::Float),
            _ => {
                return Err(self.syntax_error(vec![
                    TokenKind::Keyword(Keyword::Int),
                    TokenKind::Keyword(Keyword::Float),
                ]))
            }
        };
        self.expect(TokenKind::Keyword(keyword))?;

        let name = self.lookahead_ident_text();
        let line = self.scanner.line();
        self.expect(TokenKind::Ident)?;

        if let Some(table) = &mut self.symbols {
            // `name` is present whenever expect(Ident) succeeded.
            if let Some(name) = name {
                table.insert(&name, SymbolInfo { ty, line })?;
            }
        }

        self.expect(TokenKind::Semi)
    }

    /// `assign_stmt := assign_expr ';'`
    fn assign_stmt(&mut self) -> Result<(), FrontError> {
        self.assign_expr()?;
        self.expect(TokenKind::Semi)
    }

    /// `assign_expr := ID '=' expr`
    fn assign_expr(&mut self) -> Result<(), FrontError> {
        self.resolve_lookahead_ident()?;
        self.expect(TokenKind::Ident)?;
        self.expect(TokenKind::Assign)?;
        self.expr()
    }

    /// `if_stmt := 'if' '(' expr ')' stmt ['else' stmt]`
    ///
    /// Each `if` greedily takes the immediately following `else`, so there
    /// is no dangling-else ambiguity.
    fn if_stmt(&mut self) -> Result<(), FrontError> {
        self.expect(TokenKind::Keyword(Keyword::If))?;
        self.expect(TokenKind::LPar)?;
        self.expr()?;
        self.expect(TokenKind::RPar)?;
        self.stmt()?;

        if self.lookahead_kind() == Some(TokenKind::Keyword(Keyword::Else)) {
            self.expect(TokenKind::Keyword(Keyword::Else))?;
            self.stmt()?;
        }
        Ok(())
    }

    /// `for_stmt := 'for' '(' assign_expr ';' expr ';' assign_expr ')' stmt`
    fn for_stmt(&mut self) -> Result<(), FrontError> {
        self.expect(TokenKind::Keyword(Keyword::For))?;
        self.expect(TokenKind::LPar)?;
        self.assign_expr()?;
        self.expect(TokenKind::Semi)?;
        self.expr()?;
        self.expect(TokenKind::Semi)?;
        self.assign_expr()?;
        self.expect(TokenKind::RPar)?;
        self.stmt()
    }

    /// `block := '{' stmt_list '}'`
    ///
    /// Scope lifetime is tied to this call: the scope pushed on `{` is
    /// popped whether the body parses or not.
    fn block(&mut self) -> Result<(), FrontError> {
        self.expect(TokenKind::LBrace)?;

        if let Some(table) = &mut self.symbols {
            table.push_scope();
        }

        let body = self
            .stmt_list()
            .and_then(|()| self.expect(TokenKind::RBrace));

        if let Some(table) = &mut self.symbols {
            table.pop_scope();
        }

        body
    }

    /// `expr := simple_expr [('==' | '<' | '>') simple_expr]`
    fn expr(&mut self) -> Result<(), FrontError> {
        self.simple_expr()?;

        if let Some(op @ (TokenKind::Eq | TokenKind::Lt | TokenKind::Gt)) = self.lookahead_kind() {
            self.expect(op)?;
            self.simple_expr()?;
        }
        Ok(())
    }

    /// `simple_expr := term (('+' | '-') term)*`
    fn simple_expr(&mut self) -> Result<(), FrontError> {
        self.term()?;

        while let Some(op @ (TokenKind::Plus | TokenKind::Minus)) = self.lookahead_kind() {
            self.expect(op)?;
            self.term()?;
        }
        Ok(())
    }

    /// `term := factor (('*' | '/') factor)*`
    fn term(&mut self) -> Result<(), FrontError> {
        self.factor()?;

        while let Some(op @ (TokenKind::Star | TokenKind::Slash)) = self.lookahead_kind() {
            self.expect(op)?;
            self.factor()?;
        }
        Ok(())
    }

    /// `factor := '(' expr ')' | NUM | FLOATNUM | ID`
    fn factor(&mut self) -> Result<(), FrontError> {
        match self.lookahead_kind() {
            Some(TokenKind::LPar) => {
                self.expect(TokenKind::LPar)?;
                self.expr()?;
                self.expect(TokenKind::RPar)
            }
            Some(kind @ (TokenKind::Num | TokenKind::Float)) => self.expect(kind),
            Some(TokenKind::Ident) => {
                self.resolve_lookahead_ident()?;
                self.expect(TokenKind::Ident)
            }
            _ => Err(self.syntax_error(vec![
                TokenKind::LPar,
                TokenKind::Num,
                TokenKind::Float,
                TokenKind::Ident,
            ])),
        }
    }

    // ===== Helper methods =====

    fn lookahead_kind(&self) -> Option<TokenKind> {
        self.lookahead.as_ref().map(|lexeme| lexeme.kind)
    }

    fn lookahead_ident_text(&self) -> Option<String> {
        match &self.lookahead {
            Some(lexeme) if lexeme.kind == TokenKind::Ident => Some(lexeme.text.clone()),
            _ => None,
        }
    }

    /// Consume the lookahead if its category equals `expected` and pull the
    /// next lexeme; otherwise fail with the expected/actual pair.
    fn expect(&mut self, expected: TokenKind) -> Result<(), FrontError> {
        match &self.lookahead {
            Some(lexeme) if lexeme.kind == expected => {
                self.lookahead = self.scanner.next_lexeme()?;
                Ok(())
            }
            _ => Err(self.syntax_error(vec![expected])),
        }
    }

    /// Look the lookahead identifier up before it is consumed, when symbol
    /// checking is enabled. An undeclared use fails here, independent of
    /// whatever syntax follows. Non-identifier lookaheads pass through and
    /// are left to [`Parser::expect`].
    fn resolve_lookahead_ident(&self) -> Result<(), FrontError> {
        let Some(table) = &self.symbols else {
            return Ok(());
        };

        if let Some(lexeme) = &self.lookahead {
            if lexeme.kind == TokenKind::Ident && table.lookup(&lexeme.text).is_none() {
                return Err(SymbolError::Undeclared {
                    line: self.scanner.line(),
                    name: lexeme.text.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn syntax_error(&self, expected: Vec<TokenKind>) -> FrontError {
        SyntaxError {
            line: self.scanner.line(),
            expected,
            found: self.lookahead.clone(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str, check_symbols: bool) -> Result<(), FrontError> {
        Parser::new(source, check_symbols)?.parse()
    }

    #[test]
    fn empty_input_is_accepted() {
        assert_eq!(parse("", false), Ok(()));
        assert_eq!(parse("  \n // nothing\n", true), Ok(()));
    }

    #[test]
    fn statement_forms_parse_without_checking() {
        let source = "
            int x;
            float y;
            x = 1;
            if (x < 2) x = 2; else { y = 0.5; }
            for (x = 0; x < 10; x = x + 1) ;
            { ; ; }
        ";
        assert_eq!(parse(source, false), Ok(()));
    }

    #[test]
    fn expression_grammar_nests() {
        assert_eq!(parse("int x; x = (1 + 2) * 3 - 4 / (x + 1);", true), Ok(()));
    }

    #[test]
    fn missing_semicolon_is_a_syntax_error() {
        let err = parse("int x x;", false).unwrap_err();
        match err {
            FrontError::Syntax(syntax) => {
                assert_eq!(syntax.line, 1);
                assert_eq!(syntax.expected, vec![TokenKind::Semi]);
                assert_eq!(syntax.found, Some(Lexeme::new(TokenKind::Ident, "x")));
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_block_reports_end_of_input() {
        let err = parse("{ int x;", false).unwrap_err();
        match err {
            FrontError::Syntax(syntax) => assert_eq!(syntax.found, None),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn trailing_input_after_valid_prefix_is_rejected() {
        let err = parse("int x; )", false).unwrap_err();
        assert!(matches!(err, FrontError::Syntax(_)));
    }

    #[test]
    fn undeclared_use_only_fails_with_checking_on() {
        assert_eq!(parse("x = 1;", false), Ok(()));
        let err = parse("x = 1;", true).unwrap_err();
        assert_eq!(
            err,
            FrontError::Symbol(SymbolError::Undeclared {
                line: 1,
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn use_in_expression_is_checked_before_syntax_that_follows() {
        // `y` is undeclared; the garbage after it must not matter.
        let err = parse("int x; x = y + ;;;", true).unwrap_err();
        assert_eq!(
            err,
            FrontError::Symbol(SymbolError::Undeclared {
                line: 1,
                name: "y".to_string()
            })
        );
    }

    #[test]
    fn redeclaration_in_same_scope_fails() {
        let err = parse("int x; int x;", true).unwrap_err();
        assert!(matches!(
            err,
            FrontError::Symbol(SymbolError::Redeclared { .. })
        ));
    }

    #[test]
    fn shadowing_in_nested_block_is_allowed() {
        assert_eq!(parse("int x; { int x; x = 1; } x = 2;", true), Ok(()));
    }

    #[test]
    fn block_scope_closes_on_error_unwind() {
        // The inner block fails mid-statement; parse() still terminates with
        // that error rather than corrupting scope state.
        let err = parse("{ int x; x = @; }", true).unwrap_err();
        assert!(matches!(err, FrontError::Lexical(_)));
    }

    #[test]
    fn for_loop_clauses_are_symbol_checked() {
        assert_eq!(
            parse("int i; int n; n = 3; for (i = 0; i < n; i = i + 1) ;", true),
            Ok(())
        );
        let err = parse("int i; for (i = 0; i < n; i = i + 1) ;", true).unwrap_err();
        assert_eq!(
            err,
            FrontError::Symbol(SymbolError::Undeclared {
                line: 1,
                name: "n".to_string()
            })
        );
    }
}
