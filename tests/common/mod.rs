use pretty_stream::{PrintError, Printer, Width};

/// Runs `build` against a fresh printer and returns the rendered output.
pub fn print_with(
    margin: Width,
    build: impl FnOnce(&mut Printer<Vec<u8>>) -> Result<(), PrintError>,
) -> String {
    let mut printer = Printer::with_margin(Vec::new(), margin);
    build(&mut printer).expect("print failed");
    let out = printer.finish().expect("finish failed");
    String::from_utf8(out).expect("output was not utf-8")
}

#[track_caller]
pub fn assert_pp(
    margin: Width,
    build: impl FnOnce(&mut Printer<Vec<u8>>) -> Result<(), PrintError>,
    expected_lines: &[&str],
) {
    let actual = print_with(margin, build);
    let expected = expected_lines.join("\n");
    if actual != expected {
        eprintln!("EXPECTED:\n{}\nACTUAL:\n{}\n=========", expected, actual);
        assert_eq!(actual, expected);
    }
}
