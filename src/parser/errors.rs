//! Front-end error types
//!
//! Three disjoint error kinds, each fatal to the parse in progress:
//! - [`LexicalError`]: no lexical rule matches the remaining input
//! - [`SyntaxError`]: the lookahead fits no grammar alternative
//! - [`SymbolError`]: a duplicate declaration or an undeclared use
//!
//! All three carry the 1-based line number of the offence and bubble up
//! through [`FrontError`] with no recovery and no multi-error collection.

use thiserror::Error;

use super::lexer::{Lexeme, TokenKind};

/// No rule in the scanner's table matches the remaining input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("scanner error on line {line}")]
pub struct LexicalError {
    pub line: usize,
}

/// The current lookahead does not match any category the grammar permits
/// at this point. `found: None` marks end of input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "parser error on line {line}: expected one of {}, got {}",
    describe_expected(.expected),
    describe_found(.found)
)]
pub struct SyntaxError {
    pub line: usize,
    pub expected: Vec<TokenKind>,
    pub found: Option<Lexeme>,
}

fn describe_expected(expected: &[TokenKind]) -> String {
    expected
        .iter()
        .map(TokenKind::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_found(found: &Option<Lexeme>) -> String {
    match found {
        Some(lexeme) => lexeme.to_string(),
        None => "end of input".to_string(),
    }
}

/// A declaration or use of an identifier that the scoped symbol table
/// rejects. Only produced when symbol-table checking is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("symbol table error on line {line}: `{name}` already declared in this scope")]
    Redeclared { line: usize, name: String },

    #[error("symbol table error on line {line}: undeclared ID `{name}`")]
    Undeclared { line: usize, name: String },
}

impl SymbolError {
    pub fn line(&self) -> usize {
        match self {
            Self::Redeclared { line, .. } | Self::Undeclared { line, .. } => *line,
        }
    }
}

/// Any error the front end can surface. The caller decides how to print it
/// and what exit code to pick; the library only produces the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Symbol(#[from] SymbolError),
}

impl FrontError {
    /// 1-based line the diagnostic points at.
    pub fn line(&self) -> usize {
        match self {
            Self::Lexical(err) => err.line,
            Self::Syntax(err) => err.line,
            Self::Symbol(err) => err.line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Keyword;

    #[test]
    fn syntax_error_message_lists_expected_and_found() {
        let err = SyntaxError {
            line: 3,
            expected: vec![TokenKind::Semi, TokenKind::Assign],
            found: Some(Lexeme::new(TokenKind::Ident, "x")),
        };
        assert_eq!(
            err.to_string(),
            "parser error on line 3: expected one of ';', '=', got (ID, \"x\")"
        );
    }

    #[test]
    fn syntax_error_message_marks_end_of_input() {
        let err = SyntaxError {
            line: 1,
            expected: vec![TokenKind::RBrace],
            found: None,
        };
        assert_eq!(
            err.to_string(),
            "parser error on line 1: expected one of '}', got end of input"
        );
    }

    #[test]
    fn front_error_reports_line_for_all_kinds() {
        let lexical: FrontError = LexicalError { line: 7 }.into();
        assert_eq!(lexical.line(), 7);

        let symbol: FrontError = SymbolError::Undeclared {
            line: 9,
            name: "y".to_string(),
        }
        .into();
        assert_eq!(symbol.line(), 9);

        let syntax: FrontError = SyntaxError {
            line: 2,
            expected: vec![TokenKind::Keyword(Keyword::Int)],
            found: None,
        }
        .into();
        assert_eq!(syntax.line(), 2);
    }
}
