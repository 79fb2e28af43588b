//! Fuzz target for pattern formatting.
//!
//! Tests that formatting never panics on arbitrary patterns and input.

#![no_main]

use arbitrary::Arbitrary;
use cardview::format::Pattern;
use cardview::NumberFormat;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FormatInput<'a> {
    pattern: &'a str,
    input: &'a str,
    show_extra_digits: bool,
}

fuzz_target!(|data: FormatInput| {
    // These should never panic
    let format = NumberFormat::new(data.pattern).with_show_extra_digits(data.show_extra_digits);
    let result = format.format(data.input);
    let _ = format.format_number(data.input.len());

    // Formatting is a pure function of its inputs
    assert_eq!(result, format.format(data.input), "Formatting should be deterministic");

    // Printing a parsed pattern and parsing it again changes nothing
    let pattern = Pattern::parse(data.pattern);
    let reparsed = Pattern::parse(&pattern.to_string());
    assert_eq!(
        pattern.apply(data.input, data.show_extra_digits),
        reparsed.apply(data.input, data.show_extra_digits),
        "Display of a pattern should format the same way"
    );

    // %r returns the input as is
    assert_eq!(NumberFormat::new("%r").format(data.input).as_deref(), Ok(data.input));
});
