#[allow(unused)] // Not actually unused
mod common;

use common::{assert_pp, print_with};
use pretty_stream::{Breaks, Options, Printer, SIZE_INFINITY};

#[test]
fn test_consistent_group_fits_flat() {
    // size 5 <= margin 10, so the break renders as a space
    assert_pp(
        10,
        |p| {
            p.begin(Breaks::Consistent, 2)?;
            p.text("aa")?;
            p.break_offset(1, 0)?;
            p.text("bb")?;
            p.end()
        },
        &["aa bb"],
    );
}

#[test]
fn test_consistent_group_breaks() {
    // the same stream at margin 4 no longer fits
    assert_pp(
        4,
        |p| {
            p.begin(Breaks::Consistent, 2)?;
            p.text("aa")?;
            p.break_offset(1, 0)?;
            p.text("bb")?;
            p.end()
        },
        &["aa", "  bb"],
    );
}

#[test]
fn test_consistent_breaks_are_all_or_nothing() {
    // Once a consistent group breaks, every break in it becomes a newline,
    // even ones whose following content would have fit.
    assert_pp(
        8,
        |p| {
            p.cbox(0)?;
            p.word("aaaaaaa")?;
            p.space()?;
            p.word("b")?;
            p.space()?;
            p.word("c")?;
            p.end()
        },
        &["aaaaaaa", "b", "c"],
    );
}

#[test]
fn test_inconsistent_group_flows() {
    // An inconsistent group fills each line before breaking.
    assert_pp(
        10,
        |p| {
            p.ibox(2)?;
            p.word("aaa")?;
            p.space()?;
            p.word("bbb")?;
            p.space()?;
            p.word("ccc")?;
            p.end()
        },
        &["aaa bbb", "  ccc"],
    );
}

#[test]
fn test_inconsistent_no_needless_breaks() {
    assert_pp(
        20,
        |p| {
            p.ibox(0)?;
            p.word("aaa")?;
            p.space()?;
            p.word("bbb")?;
            p.end()
        },
        &["aaa bbb"],
    );
}

#[test]
fn test_nested_group_fits_inside_broken_outer() {
    assert_pp(
        6,
        |p| {
            p.cbox(2)?;
            p.word("foo(")?;
            p.zerobreak()?;
            p.ibox(0)?;
            p.word("a")?;
            p.space()?;
            p.word("b")?;
            p.end()?;
            p.break_offset(0, -2)?;
            p.word(")")?;
            p.end()
        },
        &["foo(", "  a b", ")"],
    );
}

#[test]
fn test_hardbreak_always_breaks() {
    // both words together are narrower than the margin
    assert_pp(
        10,
        |p| {
            p.text("aa")?;
            p.hardbreak()?;
            p.text("bb")
        },
        &["aa", "bb"],
    );
}

#[test]
fn test_hardbreak_inside_fitting_sized_group() {
    // A hardbreak poisons every enclosing group's flat size, so the group
    // breaks even though its visible content is tiny.
    assert_pp(
        40,
        |p| {
            p.cbox(2)?;
            p.word("a")?;
            p.hardbreak()?;
            p.word("b")?;
            p.end()
        },
        &["a", "  b"],
    );
}

#[test]
fn test_oversized_text_isolated_on_own_line() {
    // Declaring an infinite width forces "X" onto its own line even though
    // the actual text is one column wide.
    assert_pp(
        10,
        |p| {
            p.ibox(0)?;
            p.word("before")?;
            p.zerobreak()?;
            p.text_with_width("X", SIZE_INFINITY)?;
            p.zerobreak()?;
            p.word("after")?;
            p.end()
        },
        &["before", "X", "after"],
    );
}

#[test]
fn test_oversized_text_overflows_margin() {
    // An atomic token wider than the margin is printed anyway; there is no
    // sub-token splitting.
    assert_pp(
        4,
        |p| {
            p.ibox(0)?;
            p.word("abcdefgh")?;
            p.space()?;
            p.word("x")?;
            p.end()
        },
        &["abcdefgh", "x"],
    );
}

#[test]
fn test_indent_offsets_accumulate() {
    assert_pp(
        8,
        |p| {
            p.cbox(2)?;
            p.word("if x {")?;
            p.break_offset(1, 2)?;
            p.word("body")?;
            p.break_offset(1, -2)?;
            p.word("}")?;
            p.end()
        },
        &["if x {", "    body", "}"],
    );
}

#[test]
fn test_unbroken_stream_of_plain_words() {
    assert_pp(
        80,
        |p| {
            p.word("one")?;
            p.word(" ")?;
            p.word("two")
        },
        &["one two"],
    );
}

#[test]
fn test_no_trailing_whitespace_from_unprinted_break() {
    // The trailing space() never materializes because no text follows it.
    let out = print_with(20, |p| {
        p.text("aa")?;
        p.space()
    });
    assert_eq!(out, "aa");
}

#[test]
fn test_determinism() {
    let build = |p: &mut Printer<Vec<u8>>| {
        p.cbox(2)?;
        p.word("one")?;
        p.space()?;
        p.word("two")?;
        p.space()?;
        p.word("three")?;
        p.end()
    };
    let first = print_with(7, build);
    let second = print_with(7, build);
    assert_eq!(first, second);
}

#[test]
fn test_min_space_reserves_line_budget() {
    // With six columns guaranteed per line, the second break keeps "dd" on
    // the "cc" line (overflowing the margin) instead of breaking again.
    let mut p = Printer::new(
        Vec::new(),
        Options {
            margin: 10,
            min_space: 6,
        },
    );
    let build = |p: &mut Printer<Vec<u8>>| {
        p.text("aaaaaa")?;
        p.ibox(2)?;
        p.word("bb")?;
        p.space()?;
        p.word("cc")?;
        p.space()?;
        p.word("dd")?;
        p.end()
    };
    build(&mut p).unwrap();
    let clamped = String::from_utf8(p.finish().unwrap()).unwrap();
    assert_eq!(clamped, "aaaaaabb\n        cc dd");

    // Without the guarantee the same stream breaks at both breaks.
    let unclamped = print_with(10, build);
    assert_eq!(unclamped, "aaaaaabb\n        cc\n        dd");
}

#[test]
#[should_panic(expected = "no open group")]
fn test_end_without_begin_panics() {
    let mut p = Printer::with_margin(Vec::new(), 10);
    p.end().unwrap();
}

#[test]
#[should_panic(expected = "unbalanced stream")]
fn test_unclosed_group_panics_at_finish() {
    let mut p = Printer::with_margin(Vec::new(), 10);
    p.begin(Breaks::Consistent, 2).unwrap();
    p.text("aa").unwrap();
    let _ = p.finish();
}

#[test]
fn test_wide_unicode_text_measured_in_columns() {
    // Each ideograph is two columns, so the group is size 9 and breaks at
    // margin 8 even though the byte count is much larger.
    assert_pp(
        8,
        |p| {
            p.cbox(2)?;
            p.text("日本語")?;
            p.break_offset(1, 0)?;
            p.text("文字")?;
            p.end()
        },
        &["日本語", "  文字"],
    );
}
