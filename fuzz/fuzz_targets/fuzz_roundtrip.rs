#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpgm::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive re-encoding at its own precision
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    for mode in [EncodingMode::Ascii, EncodingMode::Binary] {
        let Ok(reencoded) = encode(&decoded.image, decoded.precision, mode, enough::Unstoppable)
        else {
            panic!("decoded image failed to encode");
        };
        let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
            panic!("re-encoded data failed to decode");
        };
        assert_eq!(decoded.image, decoded2.image, "roundtrip sample mismatch");
        assert_eq!(decoded.precision, decoded2.precision);
    }
});
