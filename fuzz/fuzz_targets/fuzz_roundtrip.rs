#![no_main]
use bmpgrid::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    let encoder = EncodeRequest::new(decoded.variant);
    let Ok(reencoded) = encoder.encode(&decoded.grid, enough::Unstoppable) else {
        return;
    };
    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };
    assert!(decoded2.warnings.is_empty(), "re-encoded data produced warnings");

    let same_bits = decoded
        .grid
        .rows()
        .iter()
        .zip(decoded2.grid.rows())
        .all(|(a, b)| a.iter().map(|p| p.high).eq(b.iter().map(|p| p.high)));
    assert!(same_bits, "roundtrip on/off mismatch");
    if decoded.variant == BmpVariant::Truecolor {
        assert_eq!(decoded.grid, decoded2.grid, "roundtrip pixel mismatch");
    }
    assert_eq!(decoded.grid.width(), decoded2.grid.width());
    assert_eq!(decoded.grid.height(), decoded2.grid.height());
});
