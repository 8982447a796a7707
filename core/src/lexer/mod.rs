//! Pattern-driven tokenizer.
//!
//! The lexer holds an ordered table of `(pattern, kind)` rules. Tokenizing is
//! first-match in registration order, with an extra constraint: some token
//! kinds demand a specific kind immediately after them (see
//! [`TokenKind::requires_next`]).

mod lexer;
mod patterns;
mod token;


pub use lexer::Lexer;
pub use patterns::{literal_pattern, literal_text};
pub use token::{Token, TokenKind};
