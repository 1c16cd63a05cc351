//! A streaming, line-breaking pretty-printing engine.
//!
//! This is an implementation of the classic Oppen box-and-break algorithm:
//! the caller feeds an abstract stream of tokens (literal text, breakable
//! whitespace, and nested `begin`/`end` group markers) and the printer
//! renders them within a fixed line-width budget, deciding in a single
//! forward pass (with bounded lookahead) whether each group fits on the
//! current line and, if not, where to break.
//!
//! The printer does not understand the text it prints. It only knows token
//! kinds, rendered widths, and the grouping and breaking hints of the
//! producer, which makes it equally suited to source-code generators,
//! schema-to-code tools, and structured-data dumpers.
//!
//! ```
//! use pretty_stream::{Breaks, Printer};
//!
//! let mut p = Printer::with_margin(Vec::new(), 12);
//! p.cbox(2).unwrap();
//! p.word("let xs = [").unwrap();
//! p.zerobreak().unwrap();
//! p.word("1, 2, 3").unwrap();
//! p.break_offset(0, -2).unwrap();
//! p.word("];").unwrap();
//! p.end().unwrap();
//! let out = String::from_utf8(p.finish().unwrap()).unwrap();
//! assert_eq!(out, "let xs = [\n  1, 2, 3\n];");
//! ```

mod geometry;
mod printer;
mod ring;
mod token;

pub use geometry::{str_width, Width, SIZE_INFINITY};
pub use printer::{Options, PrintError, Printer};
pub use token::{BeginToken, BreakToken, Breaks, Token};
