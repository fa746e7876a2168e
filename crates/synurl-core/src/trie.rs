//! URL trie keyed by the six URL parts.
//!
//! Levels are scheme, netloc, path, params, query and fragment; the node
//! under the fragment is a leaf holding how many times that exact URL was
//! inserted. Used to eyeball how a host's URLs spread out.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::segment::{SegmentError, UrlParts};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieNode {
    Leaf(usize),
    Branch(BTreeMap<String, TrieNode>),
}

impl TrieNode {
    /// Sum of all leaf counts below (or at) this node.
    pub fn count(&self) -> usize {
        match self {
            TrieNode::Leaf(n) => *n,
            TrieNode::Branch(children) => children.values().map(TrieNode::count).sum(),
        }
    }

    fn compressed(&self, depth: usize) -> TrieNode {
        match self {
            TrieNode::Leaf(n) => TrieNode::Leaf(*n),
            TrieNode::Branch(children) => TrieNode::Branch(
                children
                    .iter()
                    .map(|(key, child)| {
                        let node = if depth == 0 {
                            TrieNode::Leaf(child.count())
                        } else {
                            child.compressed(depth - 1)
                        };
                        (key.clone(), node)
                    })
                    .collect(),
            ),
        }
    }

    fn render_into(&self, level: usize, out: &mut String) {
        match self {
            TrieNode::Leaf(n) => {
                let _ = writeln!(out, "{:indent$}occurrences: {}", "", n, indent = level);
            }
            TrieNode::Branch(children) => {
                for (key, child) in children {
                    let _ = writeln!(out, "{:indent$}{}:", "", key, indent = level);
                    child.render_into(level + 1, out);
                }
            }
        }
    }
}

fn insert_keys(node: &mut TrieNode, keys: &[&str]) {
    match (node, keys.split_first()) {
        (TrieNode::Leaf(n), None) => *n += 1,
        (TrieNode::Branch(children), Some((key, rest))) => {
            let child = children.entry(key.to_string()).or_insert_with(|| {
                if rest.is_empty() {
                    TrieNode::Leaf(0)
                } else {
                    TrieNode::Branch(BTreeMap::new())
                }
            });
            insert_keys(child, rest);
        }
        // All inserts walk the same number of levels.
        _ => {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTrie {
    root: TrieNode,
}

impl Default for UrlTrie {
    fn default() -> Self {
        Self {
            root: TrieNode::Branch(BTreeMap::new()),
        }
    }
}

impl UrlTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_urls<I, S>(urls: I) -> Result<Self, SegmentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for url in urls {
            trie.insert(url.as_ref())?;
        }
        Ok(trie)
    }

    pub fn insert(&mut self, url: &str) -> Result<(), SegmentError> {
        let parts = UrlParts::parse(url)?;
        let keys = [
            parts.scheme.as_str(),
            parts.authority.as_str(),
            parts.path.as_str(),
            parts.params.as_str(),
            parts.query.as_str(),
            parts.fragment.as_str(),
        ];
        insert_keys(&mut self.root, &keys);
        Ok(())
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Total number of inserted URLs.
    pub fn count(&self) -> usize {
        self.root.count()
    }

    /// Copy whose nodes `depth` levels below the root are replaced by their
    /// leaf totals. A depth beyond the trie's height returns an identical trie.
    pub fn compressed(&self, depth: usize) -> UrlTrie {
        UrlTrie {
            root: self.root.compressed(depth),
        }
    }

    /// Indented dump, one key per line, leaves as `occurrences: N`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.root.render_into(0, &mut out);
        out
    }
}
