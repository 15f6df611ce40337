#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpgm::{DecodeRequest, SampleParsing};

fuzz_target!(|data: &[u8]| {
    // Both parsing policies must reject or accept without panicking
    let _ = zenpgm::probe(data);
    let _ = zenpgm::decode(data, enough::Unstoppable);
    let _ = DecodeRequest::new(data)
        .with_sample_parsing(SampleParsing::Lenient)
        .decode(enough::Unstoppable);
});
