//! Text preprocessing: tokenization and stop words

pub mod stopwords;
pub mod tokenizer;

pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};
pub use tokenizer::{Tokenizer, TokenizerSettings};
