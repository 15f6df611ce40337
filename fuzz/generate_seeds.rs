#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // P2 3x1, 8-bit
    fs::write(format!("{dir}/p2_3x1.pgm"), b"P2\n# seed\n3 1\n255\n0\n128\n255\n").unwrap();

    // P2 2x2, odd precision
    fs::write(format!("{dir}/p2_2x2_p15.pgm"), b"P2\n# seed\n2 2\n15\n0 5\n10 15\n").unwrap();

    // P5 3x2, 8-bit
    let p5 = b"P5\n# seed\n3 2\n255\n\x00\x40\x80\xc0\xff\x64";
    fs::write(format!("{dir}/p5_3x2.pgm"), p5).unwrap();

    // P5 2x1, 16-bit big-endian
    let p5_16 = b"P5\n# seed\n2 1\n65535\n\x01\x00\xff\xff";
    fs::write(format!("{dir}/p5_2x1_16bit.pgm"), p5_16).unwrap();

    // P5 at the byte-depth boundary
    let p5_256 = b"P5\n# seed\n1 1\n256\n\x01\x00";
    fs::write(format!("{dir}/p5_1x1_p256.pgm"), p5_256).unwrap();

    println!("Seeds written to {dir}");
}
