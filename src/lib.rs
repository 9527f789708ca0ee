// docsim: bag-of-words, TF-IDF, n-gram and co-occurrence comparison of two
// text documents.
//
// This is the library root. The core chain is text -> vector -> similarity;
// analysis composes it into reports, and output renders them.

pub mod analysis;
pub mod config;
pub mod document;
pub mod output;
pub mod similarity;
pub mod text;
pub mod vector;
