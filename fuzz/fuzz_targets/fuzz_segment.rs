#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for sentence in af_text::segment(text) {
        assert!(!sentence.is_empty());
        assert_eq!(sentence.trim(), sentence);
    }

    let label = af_text::minimize(text, 4);
    if !text.trim().is_empty() {
        assert!(!label.is_empty());
    }
    let _ = af_text::extract_list(text);
});
