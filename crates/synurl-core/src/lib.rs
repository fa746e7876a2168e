pub mod cache;
pub mod checksum;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod report;
pub mod retry;
pub mod segment;
pub mod similarity;
pub mod synonym;
pub mod table;
pub mod trial;
pub mod trie;
pub mod validate;
