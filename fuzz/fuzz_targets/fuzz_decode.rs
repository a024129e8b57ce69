#![no_main]
use bmpgrid::BmpVariant;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header-declared layout and each forced layout — must never panic
    let _ = bmpgrid::decode_bmp(data, enough::Unstoppable);
    let _ = bmpgrid::ImageInfo::from_bytes(data);
    for variant in [
        BmpVariant::Truecolor,
        BmpVariant::Monochrome,
        BmpVariant::MonochromeSingleEntry,
    ] {
        let _ = bmpgrid::decode_bmp_as(data, variant, enough::Unstoppable);
    }
});
