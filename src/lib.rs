//! # From bare text to a checked IR
//!
//! User's source code:
//!
//! ``` kotlin
//! fun main() {
//!     var total = (1 + 2) * 3;
//!     when (total) {
//!         in 0..9 -> total += 1;
//!         10, 11 -> { val big: Char = 'b'; }
//!     }
//! }
//! ```

//! ## Scanning
//!
//! A five-state machine turns characters into tokens. Keywords and operators
//! get a fixed tag from their table; identifiers and literals are numbered in
//! the order they first appear. Identifiers are cut to eight characters.
//! Scanning never fails: problems become lexical diagnostics.

//! ## Analysis
//!
//! One recursive-descent pass recognizes the grammar and checks it at the
//! same time. Names resolve through a stack of scopes, every expression gets
//! a type, and arithmetic is broken into temporaries:
//!
//! ``` markdown
//! OPERATION: '+' (result in: T1, result type: Int)
//! OPERATION: '*' (result in: T2, result type: Int)
//! DECLARE_VARIABLE: total
//! └── INITIAL_VALUE: T2
//! ```
//!
//! The first syntax error stops the pass. Semantic errors do not: the
//! offending value gets type `Unknown` and analysis goes on, so one mistake is
//! reported once.

//! ## Intermediate representation
//!
//! Each checked construct is a [`ir::Block`]. Blocks are emitted into one flat
//! sequence as they complete; the bodies of `when` branches are lifted back
//! out of it and attached to their branch. [`Analysis::render_ir`] prints the
//! sequence as indented text.

pub mod cli;
pub mod diagnostic;
mod environment;
mod error;
pub mod ir;
mod parser;
mod scanner;
mod whenc;

pub use diagnostic::{Category, Diagnostic, Diagnostics};
pub use error::{
	WhencError,
	parser::{SyntaxError, SyntaxErrorCode, SyntaxErrorType},
	scanner::{LexicalError, LexicalErrorType},
	semantic::{SemanticError, SemanticErrorType},
};
pub use scanner::{Token, TokenKind, TokenType};
pub use whenc::{Analysis, Options, Whenc, analyze};
