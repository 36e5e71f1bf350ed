pub mod parser;
pub mod tokenizer;

pub use parser::{parse_boolean, parse_integer, parse_number, parse_timestamp};
pub use tokenizer::SentenceTokens;
