//! Pattern rule generation
//!
//! A pattern line names two classified dependency roles and whether the
//! first is written before or after the second, e.g.
//!
//! ```text
//! {nsubj, NONE} {amod, OPINION} before
//! ```
//!
//! Every rule yields two `RuleResult` individuals: one seen from the first
//! role and one seen from the second. The ordering fact is the same; only
//! the point of view (and therefore the block name) differs.

use std::fmt;

use serde::{Deserialize, Serialize};

use poas_core::{Individual, PoasError, Result};

use crate::{Generated, JobReport, TurtleGenerator};

/// Continuation indent used by rule blocks
pub const RULE_INDENT: usize = 13;

/// Characters stripped from pattern lines before tokenizing
const DECORATION: &[char] = &['{', '}', ','];

/// Relative position of the first role to the second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
}

impl Position {
    /// Parse a position token; anything other than `before` reads as `after`
    pub fn parse(token: &str) -> Self {
        match token {
            "before" => Self::Before,
            _ => Self::After,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which child of a rule is the left-hand word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeftWord {
    FirstChild,
    SecondChild,
}

impl LeftWord {
    /// Ontology individual naming this side
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstChild => "FIRST_CHILD",
            Self::SecondChild => "SECOND_CHILD",
        }
    }
}

/// A classified dependency role taking part in a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub relation: String,
    pub subtype: String,
}

impl Role {
    pub fn new(relation: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            subtype: subtype.into(),
        }
    }

    /// Local name of the role node, e.g. `AMOD_OPINION`
    pub fn node_name(&self) -> String {
        format!("{}_{}", self.relation, self.subtype)
    }
}

/// Remove `{`, `}` and `,` decoration and trim
pub fn clean_pattern(line: &str) -> String {
    line.chars()
        .filter(|c| !DECORATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// One parsed pattern line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub first: Role,
    pub second: Role,
    pub position: Position,
}

impl PatternRule {
    /// Parse a raw (possibly decorated) pattern line.
    ///
    /// Tokens after the fifth are ignored. `line_no` is only used for error
    /// reporting.
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let cleaned = clean_pattern(line);
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        if tokens.len() < 5 {
            return Err(PoasError::MalformedLine {
                line: line_no,
                reason: format!(
                    "expected 5 tokens (relation subtype relation subtype position), found {}",
                    tokens.len()
                ),
            });
        }

        let position = Position::parse(tokens[4]);
        if tokens[4] != "before" && tokens[4] != "after" {
            tracing::warn!(
                "Line {}: position '{}' is neither 'before' nor 'after', reading it as 'after'",
                line_no,
                tokens[4]
            );
        }

        Ok(Self {
            first: Role::new(tokens[0], tokens[1]),
            second: Role::new(tokens[2], tokens[3]),
            position,
        })
    }

    /// Block seen from the first role
    pub fn forward(&self) -> RuleBlock {
        let left_word = match self.position {
            Position::Before => LeftWord::FirstChild,
            Position::After => LeftWord::SecondChild,
        };
        RuleBlock {
            first_child: self.first.clone(),
            second_child: self.second.clone(),
            left_word,
        }
    }

    /// Block seen from the second role
    pub fn reverse(&self) -> RuleBlock {
        let left_word = match self.position {
            Position::After => LeftWord::FirstChild,
            Position::Before => LeftWord::SecondChild,
        };
        RuleBlock {
            first_child: self.second.clone(),
            second_child: self.first.clone(),
            left_word,
        }
    }

    /// Forward and reverse blocks, in output order
    pub fn blocks(&self) -> [RuleBlock; 2] {
        [self.forward(), self.reverse()]
    }
}

/// A single `RuleResult` individual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
    pub first_child: Role,
    pub second_child: Role,
    pub left_word: LeftWord,
}

impl RuleBlock {
    fn joined(&self, prefix: &str) -> String {
        format!(
            "{prefix}_{}_{}_{}_{}",
            self.first_child.relation,
            self.first_child.subtype,
            self.second_child.relation,
            self.second_child.subtype
        )
    }

    /// `rule_<r1>_<s1>_<r2>_<s2>` for this block's child order
    pub fn name(&self) -> String {
        self.joined("rule")
    }

    /// Companion `pair_...` name; reserved for a pairing individual and not
    /// emitted yet
    pub fn pair_name(&self) -> String {
        self.joined("pair")
    }

    pub fn to_individual(&self) -> Individual {
        Individual::new(self.name())
            .with_class("RuleResult")
            .with_indent(RULE_INDENT)
            .with_reference("firstChild", self.first_child.node_name())
            .with_reference("secondChild", self.second_child.node_name())
            .with_reference("leftWord", self.left_word.as_str())
    }
}

/// Generator for pattern rule files
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleGenerator;

impl RuleGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl TurtleGenerator for RuleGenerator {
    fn generate(&self, input: &str) -> Result<Generated> {
        let mut text = String::new();
        let mut report = JobReport::default();

        for (idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            report.records_read += 1;

            let rule = match PatternRule::parse(line, idx + 1) {
                Ok(rule) => rule,
                Err(e) => {
                    tracing::warn!("Skipping pattern: {}", e);
                    report.skip(idx + 1, e.to_string());
                    continue;
                }
            };

            for block in rule.blocks() {
                tracing::debug!("Rule {} (pair {})", block.name(), block.pair_name());
                block.to_individual().write_to(&mut text);
                report.blocks_written += 1;
            }
        }

        Ok(Generated { text, report })
    }

    fn name(&self) -> &str {
        "rules"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_pattern() {
        assert_eq!(
            clean_pattern("  {nsubj, NONE} {amod, OPINION} before \n"),
            "nsubj NONE amod OPINION before"
        );
    }

    #[test]
    fn test_parse_tab_separated() {
        let rule = PatternRule::parse("nsubj\tdet\tadvmod:mnr\tamod:opn\tbefore", 1).unwrap();
        assert_eq!(rule.first, Role::new("nsubj", "det"));
        assert_eq!(rule.second, Role::new("advmod:mnr", "amod:opn"));
        assert_eq!(rule.position, Position::Before);
    }

    #[test]
    fn test_parse_too_few_tokens() {
        let err = PatternRule::parse("{nsubj, NONE} before", 7).unwrap_err();
        match err {
            PoasError::MalformedLine { line, reason } => {
                assert_eq!(line, 7);
                assert!(reason.contains("found 3"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_unrecognised_position_reads_as_after() {
        let rule = PatternRule::parse("a b c d After", 2).unwrap();
        assert_eq!(rule.position, Position::After);
        assert_eq!(rule.forward().left_word, LeftWord::SecondChild);
        assert_eq!(rule.reverse().left_word, LeftWord::FirstChild);

        let generated = RuleGenerator::new().generate("a b c d After\n").unwrap();
        assert_eq!(generated.report.blocks_written, 2);
        assert!(generated.report.is_clean());
    }

    #[test]
    fn test_generate_is_idempotent() {
        let input = "{nsubj, NONE} {amod, OPINION} before\n\nnsubj det advmod:mnr amod:opn after\nbad\n";
        let generator = RuleGenerator::new();
        let first = generator.generate(input).unwrap();
        let second = generator.generate(input).unwrap();
        assert_eq!(first.text.as_bytes(), second.text.as_bytes());
        assert_eq!(first.report, second.report);
    }

    #[test]
    fn test_parse_ignores_extra_tokens() {
        let rule = PatternRule::parse("a b c d after trailing note", 1).unwrap();
        assert_eq!(rule.position, Position::After);
    }

    #[test]
    fn test_forward_and_reverse_names() {
        let rule = PatternRule::parse("nsubj\tdet\tadvmod:mnr\tamod:opn\tbefore", 1).unwrap();
        let [forward, reverse] = rule.blocks();

        assert_eq!(forward.name(), "rule_nsubj_det_advmod:mnr_amod:opn");
        assert_eq!(forward.left_word, LeftWord::FirstChild);
        assert_eq!(reverse.name(), "rule_advmod:mnr_amod:opn_nsubj_det");
        assert_eq!(reverse.left_word, LeftWord::SecondChild);
        assert_eq!(reverse.pair_name(), "pair_advmod:mnr_amod:opn_nsubj_det");
    }

    #[test]
    fn test_after_flips_left_word() {
        let rule = PatternRule::parse("a b c d after", 1).unwrap();
        assert_eq!(rule.forward().left_word, LeftWord::SecondChild);
        assert_eq!(rule.reverse().left_word, LeftWord::FirstChild);
    }

    #[test]
    fn test_symmetric_rule_names_coincide() {
        let rule = PatternRule::parse("amod NONE amod NONE before", 1).unwrap();
        assert_eq!(rule.forward().name(), rule.reverse().name());
        assert_ne!(rule.forward().left_word, rule.reverse().left_word);
    }

    #[test]
    fn test_rule_block_text() {
        let rule = PatternRule::parse("{nsubj, NONE} {amod, OPINION} before", 1).unwrap();
        let text = rule.forward().to_individual().render();

        let expected = "
### poas:poas/rule_nsubj_NONE_amod_OPINION
:rule_nsubj_NONE_amod_OPINION rdf:type owl:NamedIndividual ,
             :RuleResult ;
             :firstChild :nsubj_NONE ;
             :secondChild :amod_OPINION ;
             :leftWord :FIRST_CHILD ;
             rdfs:label \"rule_nsubj_NONE_amod_OPINION\" .
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_generate_skips_blank_and_malformed_lines() {
        let input = "a b c d before\n\n   \nbroken line\ne f g h after\n";
        let generated = RuleGenerator::new().generate(input).unwrap();

        assert_eq!(generated.report.records_read, 3);
        assert_eq!(generated.report.blocks_written, 4);
        assert_eq!(generated.report.skipped.len(), 1);
        assert_eq!(generated.report.skipped[0].line, 4);
        assert_eq!(generated.text.matches(":RuleResult ;").count(), 4);

        let forward = generated.text.find("### poas:poas/rule_a_b_c_d").unwrap();
        let reverse = generated.text.find("### poas:poas/rule_c_d_a_b").unwrap();
        let next = generated.text.find("### poas:poas/rule_e_f_g_h").unwrap();
        assert!(forward < reverse && reverse < next);
    }

    #[test]
    fn test_pair_name_is_not_emitted() {
        let generated = RuleGenerator::new().generate("a b c d before").unwrap();
        assert!(!generated.text.contains("pair_"));
    }
}
