use std::collections::HashMap;

/// Both views of one telegram: a case-insensitive key/value map and a
/// positional token list. A sentence may mix the two styles; the decoder
/// consults whichever view has data for each field.
#[derive(Debug, Clone)]
pub struct SentenceTokens {
    keyed: HashMap<String, String>,
    positional: Vec<String>,
}

impl SentenceTokens {
    pub fn parse(sentence: &str) -> Self {
        let mut keyed = HashMap::new();
        for part in sentence.split([';', '|']) {
            let token = part.trim();
            // `=` at position 0 would mean an empty key; skip such tokens.
            if let Some(equals) = token.find('=') {
                if equals > 0 {
                    keyed.insert(
                        token[..equals].to_lowercase(),
                        token[equals + 1..].to_string(),
                    );
                }
            }
        }

        let positional = sentence.split(',').map(str::to_string).collect();

        Self { keyed, positional }
    }

    /// Value of the first present key among the given alternates.
    pub fn keyed(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .find_map(|name| self.keyed.get(*name))
            .map(String::as_str)
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    pub fn last_positional(&self) -> Option<&str> {
        self.positional.last().map(String::as_str)
    }
}
