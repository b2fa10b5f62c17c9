//! Reads a file of unknown encoding and prints it as text.
//!
//! Usage: `cargo run --example normalize_file [--features detect] -- <path> [--unescape]`

use encnorm::{Normalizer, filesystem_encoding_name, read_binary, to_filesystem_text};

fn main() {
    let mut args = std::env::args_os().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: normalize_file <path> [--unescape]");
        std::process::exit(2);
    };
    let unescape = args.any(|arg| arg == "--unescape");

    let normalizer = build_normalizer();
    println!("Normalizer: {:?}", normalizer);
    println!("Filesystem encoding: {}", filesystem_encoding_name());
    println!("Reading: {}", to_filesystem_text(path.as_os_str()));

    let bytes = read_binary(&path).expect("Failed to read file");
    println!("File size: {} bytes", bytes.len());
    println!("Valid UTF-8: {}", std::str::from_utf8(&bytes).is_ok());

    let text = if unescape {
        normalizer.unescape_to_text(bytes)
    } else {
        normalizer.to_text(bytes)
    };

    let replacements = text.chars().filter(|&c| c == '\u{FFFD}').count();
    println!("Characters: {}", text.chars().count());
    println!("Replacement characters: {}", replacements);
    println!("\n=== Contents ===");
    let preview: String = text.chars().take(2000).collect();
    println!("{}", preview);
}

#[cfg(feature = "detect")]
fn build_normalizer() -> Normalizer {
    Normalizer::new().with_detector(encnorm::ChardetDetector)
}

#[cfg(not(feature = "detect"))]
fn build_normalizer() -> Normalizer {
    Normalizer::new()
}
