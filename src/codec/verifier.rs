use std::fmt::Display;

use crate::error_handling::*;
use crate::grammar::{Grammar, Rule};
use super::ARROW;

// Line of the first rule in an encoded blob, after the name and the blank line
const FIRST_RULE_LINE: usize = 3;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Side {
    Head,
    Body,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Head => write!(f, "head"),
            Side::Body => write!(f, "body"),
        }
    }
}

// Things that survive encoding but come back different from decoding
#[derive(Debug, PartialEq, Clone)]
pub enum HazardType {
    BlankName,
    NewlineInName,
    PaddedName,
    NewlineInRule(Side),
    ArrowInHead,
    PaddedRule(Side),
}

impl ErrorType for HazardType {}

impl Display for HazardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HazardType::BlankName => write!(f, "Grammar name is blank"),
            HazardType::NewlineInName => write!(f, "Grammar name contains a line break"),
            HazardType::PaddedName => write!(f, "Grammar name starts or ends with whitespace"),
            HazardType::NewlineInRule(side) => write!(f, "Rule {} contains a line break", side),
            HazardType::ArrowInHead => write!(f, "Rule head contains `{}`", ARROW),
            HazardType::PaddedRule(side) => write!(f, "Rule {} starts or ends with whitespace", side),
        }
    }
}

pub type EncodeError = Error<HazardType>;
pub type EncodeErrors = Errors<HazardType>;

fn is_padded(text: &str) -> bool {
    text.trim() != text
}

fn name_hazards(name: &str) -> Vec<HazardType> {
    let mut hazards = Vec::new();
    if name.trim().is_empty() {
        hazards.push(HazardType::BlankName);
    }
    if name.contains('\n') {
        hazards.push(HazardType::NewlineInName);
    }
    if is_padded(name) && !name.trim().is_empty() {
        hazards.push(HazardType::PaddedName);
    }
    hazards
}

fn side_hazards(text: &str, side: Side) -> Vec<HazardType> {
    let mut hazards = Vec::new();
    if text.contains('\n') {
        hazards.push(HazardType::NewlineInRule(side));
    }
    if is_padded(text) {
        hazards.push(HazardType::PaddedRule(side));
    }
    hazards
}

fn rule_hazards(rule: &Rule) -> Vec<HazardType> {
    let mut hazards = side_hazards(&rule.head, Side::Head);
    // Decode splits on the first arrow, so only the head can swallow one
    if rule.head.contains(ARROW) {
        hazards.push(HazardType::ArrowInHead);
    }
    hazards.extend(side_hazards(&rule.body, Side::Body));
    hazards
}

/// Reports everything about a grammar that would not come back unchanged
/// from `decode(encode(grammar))`, located at the line it would be written
/// to.
pub fn verify_encodable(grammar: &Grammar) -> Result<(), EncodeErrors> {
    let mut errors: EncodeErrors = name_hazards(grammar.name())
        .into_iter()
        .map(|hazard| EncodeError::at_line(1, hazard))
        .collect();

    errors.extend(grammar.rules()
        .enumerate()
        .flat_map(|(index, rule)| rule_hazards(rule)
            .into_iter()
            .map(move |hazard| EncodeError::at_line(FIRST_RULE_LINE + index, hazard))));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
