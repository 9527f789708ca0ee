// Text preprocessing: tokenization, stopword filtering, n-grams, chunking.
//
// Everything in here is a pure function of its input. Nothing is cached
// between runs; a document is re-tokenized every time it is analyzed.

pub mod chunk;
pub mod ngram;
pub mod stopwords;
pub mod tokenizer;
