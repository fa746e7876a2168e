//! `synurl trie` – print a URL trie, optionally compressed.

use anyhow::Result;
use std::path::Path;
use synurl_core::trie::UrlTrie;

use super::input::read_urls;

pub fn run_trie(path: &Path, depth: Option<usize>) -> Result<()> {
    let mut trie = UrlTrie::new();
    for url in read_urls(path)? {
        if let Err(e) = trie.insert(&url) {
            tracing::warn!("rejected: {}", e);
            eprintln!("rejected: {}", e);
        }
    }
    let trie = match depth {
        Some(d) => trie.compressed(d),
        None => trie,
    };
    print!("{}", trie.render());
    println!("# elements: {}", trie.count());
    Ok(())
}
