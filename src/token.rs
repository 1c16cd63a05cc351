use crate::geometry::Width;
use std::borrow::Cow;

/// How a group behaves once the printer has decided it cannot fit on one line.
///
/// A `Consistent` group commits once, at its `Begin`: either every break
/// inside it becomes a newline, or none do. Breaking
///
/// ```text
/// foo(hello, there, good, friends)
/// ```
///
/// consistently yields
///
/// ```text
/// foo(hello,
///     there,
///     good,
///     friends)
/// ```
///
/// An `Inconsistent` group re-evaluates at each break, flowing as much onto
/// each line as fits:
///
/// ```text
/// foo(hello, there,
///     good, friends)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Breaks {
    Consistent,
    Inconsistent,
}

/// A point where a line break may be taken.
///
/// Rendered flat it is `blank_space` spaces; rendered broken it is a newline
/// followed by indentation to the enclosing group's base plus `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakToken {
    pub offset: Width,
    pub blank_space: Width,
}

/// Opens a group. `offset` is how far to indent past the current column when
/// a break inside this group is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeginToken {
    pub offset: Width,
    pub breaks: Breaks,
}

/// One element of the abstract formatting stream fed to the printer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// Literal text together with its rendered width. The width is normally
    /// the text's display width, but may be set artificially large to force
    /// the text onto its own line (see `Printer::text_with_width`).
    Text(Cow<'static, str>, Width),
    Break(BreakToken),
    Begin(BeginToken),
    End,
}
