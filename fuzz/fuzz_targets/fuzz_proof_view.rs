#![no_main]

use libfuzzer_sys::fuzz_target;
use zkhuman_types::VerificationParams;
use zkhuman_verification::{ProofEngine, ProofView};

// Untrusted proof views must be rejected, never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(view) = serde_json::from_slice::<ProofView>(data) else {
        return;
    };
    let engine = ProofEngine::new(VerificationParams::default());
    let _ = engine.verify_view(&view, "pattern:true|cognitive:true");
});
