//! Plain sentence encoding
//!
//! Used when only tokenized text is available. Words get 1-based ids and
//! every word after the first points at its left neighbour.

use poas_core::turtle::render_all;
use poas_core::{Individual, Result};

use crate::{Generated, JobReport, TurtleGenerator};

pub fn sentence_word_name(id: usize) -> String {
    format!("sentenceword_{id}")
}

/// Encoder for whitespace-tokenized sentences
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceEncoder;

impl SentenceEncoder {
    pub fn new() -> Self {
        Self
    }

    /// One `SentenceWord` individual per whitespace-separated word
    pub fn encode(&self, sentence: &str) -> Vec<Individual> {
        sentence
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| {
                let id = i + 1;
                let individual = Individual::new(sentence_word_name(id))
                    .with_class("SentenceWord")
                    .with_string("word", word);

                if id > 1 {
                    individual.with_reference("directlyToTheLeft", sentence_word_name(id - 1))
                } else {
                    individual
                }
            })
            .collect()
    }
}

impl TurtleGenerator for SentenceEncoder {
    fn generate(&self, input: &str) -> Result<Generated> {
        let words = self.encode(input);

        let text = render_all(&words);

        let report = JobReport {
            records_read: words.len(),
            blocks_written: words.len(),
            ..Default::default()
        };

        Ok(Generated { text, report })
    }

    fn name(&self) -> &str {
        "sentence"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_word_sentence() {
        let generated = SentenceEncoder::new().generate("she always").unwrap();

        let expected = "
### poas:poas/sentenceword_1
:sentenceword_1 rdf:type owl:NamedIndividual ,
         :SentenceWord ;
         :word \"she\"^^xsd:string ;
         rdfs:label \"sentenceword_1\" .

### poas:poas/sentenceword_2
:sentenceword_2 rdf:type owl:NamedIndividual ,
         :SentenceWord ;
         :word \"always\"^^xsd:string ;
         :directlyToTheLeft :sentenceword_1 ;
         rdfs:label \"sentenceword_2\" .
";
        assert_eq!(generated.text, expected);
        assert_eq!(generated.report.blocks_written, 2);
    }

    #[test]
    fn test_arbitrary_whitespace() {
        let words = SentenceEncoder::new().encode("  the\tbig \n  dog ");
        let names: Vec<&str> = words.iter().map(|w| w.name()).collect();
        assert_eq!(names, vec!["sentenceword_1", "sentenceword_2", "sentenceword_3"]);
    }

    #[test]
    fn test_empty_sentence() {
        let generated = SentenceEncoder::new().generate("   ").unwrap();
        assert!(generated.text.is_empty());
        assert_eq!(generated.report.records_read, 0);
    }

    proptest! {
        #[test]
        fn prop_each_word_links_to_predecessor(words in proptest::collection::vec("[a-z]{1,6}", 1..12)) {
            let sentence = words.join(" ");
            let blocks = SentenceEncoder::new().encode(&sentence);
            prop_assert_eq!(blocks.len(), words.len());

            for (i, block) in blocks.iter().enumerate() {
                let text = block.render();
                if i == 0 {
                    prop_assert!(!text.contains("directlyToTheLeft"));
                } else {
                    let link = format!(":directlyToTheLeft :sentenceword_{} ;", i);
                    prop_assert!(text.contains(&link));
                }
            }
        }

        #[test]
        fn prop_encoding_is_deterministic(sentence in "[a-z ]{0,40}") {
            let encoder = SentenceEncoder::new();
            let first = encoder.generate(&sentence).unwrap().text;
            let second = encoder.generate(&sentence).unwrap().text;
            prop_assert_eq!(first, second);
        }
    }
}
