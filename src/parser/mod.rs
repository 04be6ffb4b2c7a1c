//! C-simple front end
//!
//! This module turns C-simple source text into an accept/reject decision:
//! - [`lexer`]: pull-based scanner (source text → lexemes on demand)
//! - [`parser`]: recursive descent recognizer driving the scanner
//! - [`symbols`]: lexically-scoped symbol table for declared/undeclared checks
//! - [`errors`]: the three diagnostic kinds and the [`errors::FrontError`] wrapper
//!
//! # Supported language
//!
//! A small imperative C subset: `int`/`float` declarations, assignment,
//! `if`/`else`, `for`, nested blocks, and arithmetic/relational expressions.
//! This is a recognizer, not a compiler backend: no AST is built and nothing
//! is generated or evaluated.
//!
//! # Implementation
//!
//! Hand-written recursive descent with one lexeme of lookahead. The scanner
//! is lazy; the parser pulls one lexeme at a time and never sees more than
//! the current lookahead. Symbol-table checking is an optional mode chosen
//! when the parser is constructed.

pub mod errors;
pub mod lexer;
pub mod parser;
pub mod symbols;
