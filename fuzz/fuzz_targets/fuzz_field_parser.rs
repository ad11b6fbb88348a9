#![no_main]

use dd_shape_builder::app::tools::common::{format_value, parse_value, FieldMirror};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(value) = parse_value(text) {
        assert!(value.is_finite());
        // Komma nur als einzelnes Dezimalzeichen
        assert!(!(text.contains(',') && text.contains('.')));
        assert!(text.matches(',').count() <= 1);
        let _ = format_value(value);
    }

    let mut mirror = FieldMirror::default();
    let _ = mirror.take_text(text);
    assert_eq!(mirror.text(), text);
});
