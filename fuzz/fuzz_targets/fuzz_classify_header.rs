#![no_main]

use libfuzzer_sys::fuzz_target;
use magicguard::classifier::{header_hex, HEADER_LEN};
use magicguard::{Classifier, describe};

fuzz_target!(|data: &[u8]| {
    let classifier = Classifier::default();
    let header = &data[..data.len().min(HEADER_LEN)];

    let by_bytes = classifier.classify_bytes(header);
    let by_hex = classifier.classify_hex(&header_hex(header));
    assert_eq!(by_bytes, by_hex);

    if let Some(score) = by_bytes.danger_score() {
        let _ = describe(score);
    }
});
