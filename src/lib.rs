//! # Introduction
//!
//! minic is a front end for "C-simple", a small imperative language with
//! declarations, assignment, conditionals, loops, blocks, and
//! arithmetic/relational expressions. It recognizes programs; it does not
//! compile or run them.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Parser (+ optional Symbol Table) → accept / diagnostic
//! ```
//!
//! 1. [`parser::lexer`] — tokenizes on demand using an ordered rule table
//!    with longest-match disambiguation and keyword reclassification.
//! 2. [`parser::parser`] — LL(1) recursive descent over the lexeme stream,
//!    one lexeme of lookahead, no backtracking.
//! 3. [`parser::symbols`] — a stack of scopes the parser consults at
//!    declaration and use sites when symbol checking is enabled.
//!
//! On success the parser returns silently; on the first violation it returns
//! one structured [`parser::errors::FrontError`] carrying the offending line.

pub mod parser;
