#![no_main]

use libfuzzer_sys::fuzz_target;
use zkhuman_crypto::FieldElement;

// Any hex that parses must re-encode to the canonical form and parse back.
fuzz_target!(|input: &str| {
    if let Ok(value) = FieldElement::from_hex(input) {
        let encoded = value.to_hex();
        assert_eq!(FieldElement::from_hex(&encoded).ok(), Some(value));
    }
});
