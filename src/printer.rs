//! The printing engine: a single forward pass over the token stream with
//! bounded lookahead.
//!
//! The engine is two cooperating halves sharing one ring buffer.
//!
//! The *scan* half buffers incoming tokens and works out their sizes. The
//! size of a `Text` or `Break` is known on arrival, but the size of a `Begin`
//! is the width of everything up to its matching `End` rendered flat, which
//! lies arbitrarily far in the future. While pending, a size is stored as the
//! negated running total of columns seen so far (`-right_total`); when enough
//! stream has been observed the final total is added back in, leaving exactly
//! the width of the span in between. Entries with non-negative sizes at the
//! front of the buffer are retired to the print half immediately.
//!
//! The *print* half consumes resolved `(token, size)` pairs in order. At each
//! `Begin` it decides whether `size` fits in the space left on this line and
//! pushes a frame recording the outcome; each `Break` then
//! consults the innermost frame to decide between spaces and a newline.
//!
//! Lookahead is bounded by the two running totals: as soon as the buffered
//! window (`right_total - left_total`) is wider than the space remaining on
//! the line, the oldest pending size can be resolved to "infinity" without
//! waiting for its `End`, because a group already wider than the line must
//! break no matter what follows.

use crate::geometry::{str_width, Width, SIZE_INFINITY};
use crate::ring::RingBuffer;
use crate::token::{BeginToken, BreakToken, Breaks, Token};
use log::{debug, trace};
use std::borrow::Cow;
use std::cmp;
use std::collections::VecDeque;
use std::io;
use std::io::Write;

/// An error produced while printing.
///
/// Group imbalance is deliberately *not* a variant: mismatched `begin`/`end`
/// calls are a bug in the producer, not a runtime condition, and panic.
#[derive(thiserror::Error, Debug)]
pub enum PrintError {
    #[error("failed to write to output sink: {0}")]
    Io(#[from] io::Error),
}

/// Printing session configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum output line width, in columns.
    pub margin: Width,
    /// Minimum line budget guaranteed after any break, even when deeply
    /// indented. Zero means indentation may consume the whole margin. A
    /// nonzero value trades the width bound for readability: heavily nested
    /// output keeps at least this much room per line, overflowing the margin
    /// on the right instead of breaking at every opportunity.
    pub min_space: Width,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            margin: 78,
            min_space: 0,
        }
    }
}

#[derive(Clone, Debug)]
struct BufEntry {
    token: Token,
    /// Flat rendered width. Negative while still pending resolution.
    size: Width,
}

#[derive(Clone, Copy, Debug)]
enum PrintFrame {
    /// The group fit on the current line; render its breaks as spaces.
    Fits,
    /// The group did not fit. The `Width` is the base indentation column for
    /// breaks taken inside it.
    Broken(Width, Breaks),
}

/// A single printing session: consumes a stream of tokens and writes the
/// rendered text to its sink.
///
/// ```
/// use pretty_stream::{Breaks, Printer};
///
/// let mut p = Printer::with_margin(Vec::new(), 10);
/// p.begin(Breaks::Consistent, 2).unwrap();
/// p.text("aa").unwrap();
/// p.break_offset(1, 0).unwrap();
/// p.text("bb").unwrap();
/// p.end().unwrap();
/// let out = p.finish().unwrap();
/// assert_eq!(out, b"aa bb");
/// ```
pub struct Printer<W: Write> {
    out: W,
    /// Width of lines we're constrained to.
    margin: Width,
    /// See `Options::min_space`.
    min_space: Width,
    /// Number of columns left on the current line.
    space: Width,
    /// Tokens whose fate is not yet decided, paired with their sizes.
    buf: RingBuffer<BufEntry>,
    /// Running width of everything retired to the print half.
    left_total: Width,
    /// Running width of everything scanned so far, resolved or not.
    right_total: Width,
    /// Logical buffer indices of entries with pending sizes, oldest first.
    scan_stack: VecDeque<usize>,
    /// Fit decisions for the groups the print half is currently inside.
    print_stack: Vec<PrintFrame>,
    /// Indentation owed before the next text, buffered so that lines ending
    /// in a break never carry trailing spaces.
    pending_indentation: Width,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, options: Options) -> Printer<W> {
        debug!("new printer with margin {}", options.margin);
        Printer {
            out,
            margin: options.margin,
            min_space: options.min_space,
            space: options.margin,
            buf: RingBuffer::new(),
            left_total: 0,
            right_total: 0,
            scan_stack: VecDeque::new(),
            print_stack: Vec::new(),
            pending_indentation: 0,
        }
    }

    pub fn with_margin(out: W, margin: Width) -> Printer<W> {
        Printer::new(
            out,
            Options {
                margin,
                ..Options::default()
            },
        )
    }

    pub fn margin(&self) -> Width {
        self.margin
    }

    /// Opens a group. Breaks directly inside it share one fit decision; when
    /// a break is taken, the line indents to the column the group started at
    /// plus `offset`.
    pub fn begin(&mut self, breaks: Breaks, offset: Width) -> Result<(), PrintError> {
        self.scan_begin(BeginToken { offset, breaks })
    }

    /// Closes the innermost open group.
    ///
    /// # Panics
    ///
    /// Panics if there is no open group.
    pub fn end(&mut self) -> Result<(), PrintError> {
        self.scan_end()
    }

    /// Emits literal text. Its width is the string's display width.
    pub fn text(&mut self, content: impl Into<Cow<'static, str>>) -> Result<(), PrintError> {
        let content = content.into();
        let width = str_width(&content);
        self.scan_text(content, width)
    }

    /// Emits literal text with an explicitly declared width.
    ///
    /// Declaring a width far larger than the text (`SIZE_INFINITY`) forces
    /// the token onto a line of its own: the printer cannot fit it anywhere,
    /// so it breaks both around it rather than pair it with neighbors. Used
    /// for comments and blank lines; bracket the token with two
    /// `zerobreak`s so there is a legal place to break on each side.
    pub fn text_with_width(
        &mut self,
        content: impl Into<Cow<'static, str>>,
        width: Width,
    ) -> Result<(), PrintError> {
        self.scan_text(content.into(), width)
    }

    /// Emits a break point rendering as `blank_space` spaces if not taken,
    /// or as a newline indented `offset` past the enclosing group's base.
    pub fn break_offset(&mut self, blank_space: Width, offset: Width) -> Result<(), PrintError> {
        self.scan_break(BreakToken {
            offset,
            blank_space,
        })
    }

    /// Emits a break that is always taken.
    pub fn hardbreak(&mut self) -> Result<(), PrintError> {
        self.scan_break(BreakToken {
            offset: 0,
            blank_space: SIZE_INFINITY,
        })
    }

    /// Opens an inconsistent group ("i-box").
    pub fn ibox(&mut self, offset: Width) -> Result<(), PrintError> {
        self.begin(Breaks::Inconsistent, offset)
    }

    /// Opens a consistent group ("c-box").
    pub fn cbox(&mut self, offset: Width) -> Result<(), PrintError> {
        self.begin(Breaks::Consistent, offset)
    }

    /// Alias for [`text`](Printer::text), for producers that read better
    /// word-by-word.
    pub fn word(&mut self, content: impl Into<Cow<'static, str>>) -> Result<(), PrintError> {
        self.text(content)
    }

    /// A break rendering as one space if not taken.
    pub fn space(&mut self) -> Result<(), PrintError> {
        self.break_offset(1, 0)
    }

    /// A break rendering as nothing if not taken.
    pub fn zerobreak(&mut self) -> Result<(), PrintError> {
        self.break_offset(0, 0)
    }

    /// Flushes everything still buffered, flushes the sink, and returns it.
    ///
    /// # Panics
    ///
    /// Panics if any group is still open.
    pub fn finish(mut self) -> Result<W, PrintError> {
        if !self.scan_stack.is_empty() {
            self.check_stack(0);
            self.advance_left()?;
        }
        assert!(
            self.buf.is_empty() && self.print_stack.is_empty(),
            "unbalanced stream: group(s) still open at finish()"
        );
        self.out.flush()?;
        Ok(self.out)
    }

    fn scan_begin(&mut self, token: BeginToken) -> Result<(), PrintError> {
        trace!("scan Begin({:?}, {})", token.breaks, token.offset);
        if self.scan_stack.is_empty() {
            self.left_total = 1;
            self.right_total = 1;
            self.buf.clear();
        }
        let right = self.buf.push(BufEntry {
            token: Token::Begin(token),
            size: -self.right_total,
        });
        self.scan_stack.push_back(right);
        Ok(())
    }

    fn scan_end(&mut self) -> Result<(), PrintError> {
        trace!("scan End");
        if self.scan_stack.is_empty() {
            self.print_end();
        } else {
            let right = self.buf.push(BufEntry {
                token: Token::End,
                size: -1,
            });
            self.scan_stack.push_back(right);
        }
        Ok(())
    }

    fn scan_break(&mut self, token: BreakToken) -> Result<(), PrintError> {
        trace!("scan Break({}, {})", token.blank_space, token.offset);
        if self.scan_stack.is_empty() {
            self.left_total = 1;
            self.right_total = 1;
            self.buf.clear();
        } else {
            self.check_stack(0);
        }
        let right = self.buf.push(BufEntry {
            token: Token::Break(token),
            size: -self.right_total,
        });
        self.scan_stack.push_back(right);
        self.right_total += token.blank_space;
        Ok(())
    }

    fn scan_text(&mut self, content: Cow<'static, str>, width: Width) -> Result<(), PrintError> {
        trace!("scan Text({:?}, {})", content, width);
        if self.scan_stack.is_empty() {
            self.print_text(&content, width)
        } else {
            self.buf.push(BufEntry {
                token: Token::Text(content, width),
                size: width,
            });
            self.right_total += width;
            self.check_stream()
        }
    }

    /// Keeps lookahead bounded. Whenever the buffered window is wider than
    /// the space left on the line, the oldest pending size, if it is the
    /// buffer front, can be resolved to `SIZE_INFINITY` without waiting:
    /// a span already wider than the line must break regardless of how wide
    /// it finally turns out to be.
    fn check_stream(&mut self) -> Result<(), PrintError> {
        while self.right_total - self.left_total > self.space {
            debug!(
                "window {} exceeds remaining space {}",
                self.right_total - self.left_total,
                self.space
            );
            if let Some(&bottom) = self.scan_stack.front() {
                if bottom == self.buf.index_of_first() {
                    self.scan_stack.pop_front();
                    self.buf.first_mut().size = SIZE_INFINITY;
                }
            }
            self.advance_left()?;
            if self.buf.is_empty() {
                break;
            }
        }
        Ok(())
    }

    /// Retires resolved entries from the buffer front to the print half.
    fn advance_left(&mut self) -> Result<(), PrintError> {
        while !self.buf.is_empty() && self.buf.first().size >= 0 {
            let entry = self.buf.pop_first();
            match entry.token {
                Token::Text(content, width) => {
                    self.left_total += entry.size;
                    self.print_text(&content, width)?;
                }
                Token::Break(token) => {
                    self.left_total += token.blank_space;
                    self.print_break(token, entry.size)?;
                }
                Token::Begin(token) => self.print_begin(token, entry.size),
                Token::End => self.print_end(),
            }
        }
        Ok(())
    }

    /// Resolves pending sizes from the top of the scan stack down, now that a
    /// break (or the end of the stream) bounds the span they cover. `depth`
    /// counts `End`s seen so far: a `Begin` is only resolvable once its
    /// matching `End` has arrived.
    fn check_stack(&mut self, mut depth: usize) {
        while let Some(&index) = self.scan_stack.back() {
            let entry = &mut self.buf[index];
            match entry.token {
                Token::Begin(_) => {
                    if depth == 0 {
                        break;
                    }
                    self.scan_stack.pop_back();
                    entry.size += self.right_total;
                    depth -= 1;
                }
                Token::End => {
                    // The paper resolves End to "+1", but "=1" is what its
                    // own arithmetic needs.
                    self.scan_stack.pop_back();
                    entry.size = 1;
                    depth += 1;
                }
                _ => {
                    self.scan_stack.pop_back();
                    entry.size += self.right_total;
                    if depth == 0 {
                        break;
                    }
                }
            }
        }
    }

    fn print_begin(&mut self, token: BeginToken, size: Width) {
        if size > self.space {
            let col = self.margin - self.space + token.offset;
            trace!("print Begin: does not fit, base indent {}", col);
            self.print_stack.push(PrintFrame::Broken(col, token.breaks));
        } else {
            trace!("print Begin: fits in {}", self.space);
            self.print_stack.push(PrintFrame::Fits);
        }
    }

    fn print_end(&mut self) {
        self.print_stack
            .pop()
            .expect("unbalanced stream: end() with no open group");
    }

    fn print_break(&mut self, token: BreakToken, size: Width) -> Result<(), PrintError> {
        let broken_indent = match self.top_frame() {
            PrintFrame::Fits => None,
            PrintFrame::Broken(indent, Breaks::Consistent) => Some(indent),
            PrintFrame::Broken(indent, Breaks::Inconsistent) => {
                // Break only if what follows, up to the next break at this
                // level, no longer fits.
                if size > self.space {
                    Some(indent)
                } else {
                    None
                }
            }
        };
        if let Some(indent) = broken_indent {
            let indent = indent + token.offset;
            trace!("print Break: newline, indent to {}", indent);
            self.out.write_all(b"\n")?;
            self.pending_indentation = indent;
            self.space = cmp::max(self.margin - indent, self.min_space);
        } else {
            trace!("print Break: {} space(s)", token.blank_space);
            self.pending_indentation += token.blank_space;
            self.space -= token.blank_space;
        }
        Ok(())
    }

    fn print_text(&mut self, content: &str, width: Width) -> Result<(), PrintError> {
        trace!("print Text({:?}) with {} columns left", content, self.space);
        self.print_indent()?;
        self.out.write_all(content.as_bytes())?;
        self.space -= width;
        Ok(())
    }

    fn print_indent(&mut self) -> Result<(), PrintError> {
        const BLANKS: &str = "                                ";
        let mut remaining = self.pending_indentation;
        self.pending_indentation = 0;
        while remaining > 0 {
            let chunk = cmp::min(remaining, BLANKS.len() as Width);
            self.out.write_all(&BLANKS.as_bytes()[..chunk as usize])?;
            remaining -= chunk;
        }
        Ok(())
    }

    fn top_frame(&self) -> PrintFrame {
        // Everything outside the outermost group flows like an already-broken
        // inconsistent group at indent zero.
        self.print_stack
            .last()
            .copied()
            .unwrap_or(PrintFrame::Broken(0, Breaks::Inconsistent))
    }
}
