/*
    This module reads and writes the plain-text grammar format:

        <name>
        <blank line>
        <head> -> <body>
        ...
*/

mod verifier;

pub use verifier::{verify_encodable, EncodeError, EncodeErrors, HazardType, Side};

use std::fmt::Display;

use itertools::Itertools;
use tracing::debug;

use crate::error_handling::*;
use crate::grammar::{Grammar, Rule};

pub const ARROW: &str = "->";

#[derive(Debug, PartialEq, Clone)]
pub enum FormatErrorType {
    // Nothing at all to read
    EmptyInput,
    // The bytes are not UTF-8 text
    InvalidUtf8,
    // The first line is blank
    MissingName,
    // A rule line has no `->`
    MissingArrow,
    // A rule line has nothing before its `->`
    MissingHead,
}

impl ErrorType for FormatErrorType {}

impl Display for FormatErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatErrorType::EmptyInput => write!(f, "Input is empty, expected a grammar name on the first line"),
            FormatErrorType::InvalidUtf8 => write!(f, "Input is not valid UTF-8"),
            FormatErrorType::MissingName => write!(f, "Expected a grammar name on the first line"),
            FormatErrorType::MissingArrow => write!(f, "Expected `{}` in rule", ARROW),
            FormatErrorType::MissingHead => write!(f, "Expected a head before `{}`", ARROW),
        }
    }
}

pub type FormatError = Error<FormatErrorType>;
pub type FormatErrors = Errors<FormatErrorType>;

pub type DecodeResult<T> = std::result::Result<T, FormatErrors>;
type LineResult<T> = std::result::Result<T, FormatError>;

pub fn render_rule(rule: &Rule) -> String {
    format!("{} {} {}", rule.head, ARROW, rule.body)
}

pub fn encode_to_string(grammar: &Grammar) -> String {
    let rules = grammar.rules().map(render_rule).join("\n");
    format!("{}\n\n{}", grammar.name(), rules)
}

pub fn encode(grammar: &Grammar) -> Vec<u8> {
    encode_to_string(grammar).into_bytes()
}

pub fn decode(bytes: &[u8]) -> DecodeResult<Grammar> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let line = bytes[..e.valid_up_to()].iter().filter(|&&b| b == b'\n').count() + 1;
        vec![FormatError::at_line(line, FormatErrorType::InvalidUtf8)]
    })?;
    decode_str(text)
}

// Blank rule lines are read and yield nothing, every other line must be a rule
fn parse_rule_line(line: &str, num: usize) -> LineResult<Option<Rule>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (head, body) = line
        .split_once(ARROW)
        .ok_or_else(|| FormatError::at_line(num, FormatErrorType::MissingArrow))?;

    let head = head.trim();
    if head.is_empty() {
        return Err(FormatError::at_line(num, FormatErrorType::MissingHead));
    }

    Ok(Some(Rule::new(head, body.trim())))
}

pub fn decode_str(text: &str) -> DecodeResult<Grammar> {
    if text.is_empty() {
        return Err(vec![FormatError::at_line(0, FormatErrorType::EmptyInput)]);
    }

    // Numbered from 1 to match what an editor shows
    let mut lines = text.split('\n').enumerate().map(|(num, line)| (num + 1, line));

    let name = lines.next().map(|(_, line)| line.trim()).unwrap_or_default();
    let name_error = name
        .is_empty()
        .then(|| FormatError::at_line(1, FormatErrorType::MissingName));

    let (rules, line_errors): (Vec<_>, Vec<_>) = lines
        .map(|(num, line)| parse_rule_line(line, num).map(|rule| rule.map(|rule| (num, rule))))
        .partition_result();

    let errors = name_error.into_iter().chain(line_errors).collect_vec();
    if !errors.is_empty() {
        return Err(errors);
    }

    let grammar = rules
        .into_iter()
        .flatten()
        .try_fold(Grammar::new(name), |grammar, (num, rule)| {
            grammar
                .add_rule(rule)
                .map_err(|_| vec![FormatError::at_line(num, FormatErrorType::MissingHead)])
        })?;

    debug!(name = grammar.name(), rules = grammar.len(), "decoded grammar");
    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn grammar(name: &str, rules: &[(&str, &str)]) -> Grammar {
        Grammar::with_rules(name, rules.iter().map(|(head, body)| Rule::new(*head, *body))).unwrap()
    }

    fn error_kinds(errors: &FormatErrors) -> Vec<(usize, FormatErrorType)> {
        errors.iter().map(|e| (e.location.line, e.error.clone())).collect()
    }

    #[test]
    fn encode_canonical_layout() {
        let grammars = vec![
            grammar("G", &[("S", "aSb"), ("S", "ab")]),
            grammar("G", &[("S", "")]),
            grammar("Empty", &[])
        ];
        let answers = vec![
            "G\n\nS -> aSb\nS -> ab",
            "G\n\nS -> ",
            "Empty\n\n"
        ];

        for (grammar, answer) in zip(grammars, answers) {
            assert_eq!(encode_to_string(&grammar), answer);
            assert_eq!(encode(&grammar), answer.as_bytes());
        }
    }

    #[test]
    fn round_trip_keeps_order() {
        let original = grammar("G", &[("S", "aSb"), ("S", "ab")]);
        let decoded = decode(&encode(&original)).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(decoded.rule_at(0), Some(&Rule::new("S", "aSb")));
        assert_eq!(decoded.rule_at(1), Some(&Rule::new("S", "ab")));
    }

    #[test]
    fn round_trip_empty_bodies_and_no_rules() {
        for original in [grammar("G", &[("S", ""), ("A", "a")]), grammar("Nothing", &[])] {
            assert_eq!(decode_str(&encode_to_string(&original)).unwrap(), original);
        }
    }

    #[test]
    fn round_trip_random_grammars() {
        const SYMBOLS: &[char] = &['S', 'A', 'B', 'a', 'b', 'c', '0', '1', 'λ', 'Σ', '(', ')'];
        let mut rng = StdRng::seed_from_u64(0x6772);

        let word = |rng: &mut StdRng, min: usize| -> String {
            let len = rng.gen_range(min..6);
            (0..len).map(|_| *SYMBOLS.choose(&mut *rng).unwrap()).collect()
        };

        for _ in 0..200 {
            let name = word(&mut rng, 1);
            let rule_count = rng.gen_range(0..8);
            let rules = (0..rule_count)
                .map(|_| Rule::new(word(&mut rng, 1), word(&mut rng, 0)))
                .collect_vec();
            let original = Grammar::with_rules(name, rules).unwrap();

            assert_eq!(verify_encodable(&original), Ok(()));
            assert_eq!(decode(&encode(&original)).unwrap(), original);
        }
    }

    #[test]
    fn decode_tolerates_spacing() {
        let texts = vec![
            "  G  \n\n  S->aSb  \nA   ->   a",
            "G\r\n\r\nS -> aSb\r\nA -> a\r\n",
            "G\n\nS -> aSb\n\n\nA -> a\n"
        ];

        for text in texts {
            assert_eq!(decode_str(text).unwrap(), grammar("G", &[("S", "aSb"), ("A", "a")]));
        }
    }

    #[test]
    fn decode_splits_on_first_arrow() {
        let decoded = decode_str("G\n\nS -> a -> b").unwrap();
        assert_eq!(decoded.rule_at(0), Some(&Rule::new("S", "a -> b")));
    }

    #[test]
    fn decode_missing_arrow() {
        let errors = decode_str("G\n\nSab").unwrap_err();
        assert_eq!(error_kinds(&errors), vec![(3, FormatErrorType::MissingArrow)]);
    }

    #[test]
    fn decode_reports_every_bad_line() {
        let errors = decode_str("\n\nS -> a\nSab\n -> b\nA -> ").unwrap_err();
        assert_eq!(error_kinds(&errors), vec![
            (1, FormatErrorType::MissingName),
            (4, FormatErrorType::MissingArrow),
            (5, FormatErrorType::MissingHead)
        ]);
    }

    #[test]
    fn decode_empty_input() {
        assert_eq!(error_kinds(&decode_str("").unwrap_err()), vec![(0, FormatErrorType::EmptyInput)]);
        assert_eq!(error_kinds(&decode(b"").unwrap_err()), vec![(0, FormatErrorType::EmptyInput)]);
    }

    #[test]
    fn decode_header_only() {
        assert_eq!(decode_str("G").unwrap(), Grammar::new("G"));
    }

    #[test]
    fn decode_invalid_utf8() {
        let errors = decode(b"G\n\nS -> \xff").unwrap_err();
        assert_eq!(error_kinds(&errors), vec![(3, FormatErrorType::InvalidUtf8)]);
    }

    #[test]
    fn errors_carry_file() {
        let error = decode_str("G\n\nSab").unwrap_err().remove(0).in_file("g.txt");
        assert_eq!(error.location.to_string(), "g.txt:3");
    }
}
