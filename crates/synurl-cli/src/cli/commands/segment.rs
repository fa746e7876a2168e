//! `synurl segment` – show how a URL is tokenized.

use anyhow::Result;
use synurl_core::segment::segment;

pub fn run_segment(url: &str) -> Result<()> {
    let seq = segment(url)?;
    println!("{:<4} {:<9} {}", "POS", "KIND", "TEXT");
    for s in &seq {
        println!("{:<4} {:<9} {}", s.position, s.kind.as_str(), s.text);
    }
    Ok(())
}
