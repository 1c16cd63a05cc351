use unicode_width::UnicodeWidthStr;

/// A width or size, measured in output columns.
///
/// Signed, not unsigned: while a group's size is still being resolved it is
/// stored as a negated running total, and intermediate arithmetic legitimately
/// goes negative. Never clamp or wrap these.
pub type Width = isize;

/// Sentinel width for content that must never fit on a line: hardbreaks and
/// text that has to be isolated on its own line.
///
/// Deliberately a large *finite* value rather than `Width::MAX`, so that the
/// running-total arithmetic on it cannot overflow.
pub const SIZE_INFINITY: Width = 0xffff;

/// The display width of a string, in columns.
///
/// This is the number of columns a terminal will advance when showing the
/// string, which differs from both its byte length and its char count for
/// full-width and combining characters.
pub fn str_width(s: &str) -> Width {
    s.width() as Width
}
