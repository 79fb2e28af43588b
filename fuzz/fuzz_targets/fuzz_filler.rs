//! Fuzz target for fillers and filler loaders.
//!
//! Tests that filling and configuration parsing never panic.

#![no_main]

use arbitrary::Arbitrary;
use cardview::filler::{CsvFillerLoader, JsonFillerLoader};
use cardview::{DisplayConfig, Filler, FillerList};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FillInput<'a> {
    fillers: Vec<(u8, char)>,
    input: &'a str,
    config: &'a str,
}

fuzz_target!(|data: FillInput| {
    let list: FillerList = data
        .fillers
        .iter()
        .filter_map(|&(length, fill)| Filler::new(length as usize, fill))
        .collect();

    let filled = list.fill(data.input);
    assert!(filled.starts_with(data.input), "Filling should only append");

    if let Some(filler) = list.select(data.input.chars().count()) {
        assert_eq!(filled.chars().count(), filler.length());
    }

    // These should never panic
    let _ = JsonFillerLoader::parse(data.config);
    let _ = CsvFillerLoader::parse(data.config);
    let _ = DisplayConfig::from_json(data.config);
    let _ = data.config.parse::<Filler>();
});
