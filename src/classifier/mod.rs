/*
    This module guesses where a grammar sits in the Chomsky hierarchy
*/

use std::fmt::Display;

use tracing::debug;

use crate::grammar::{Grammar, Rule, RuleId};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ChomskyType {
    // Unrestricted
    Type0,
    // Context-sensitive
    Type1,
    // Context-free
    Type2,
    // Regular
    Type3,
}

impl ChomskyType {
    pub fn level(&self) -> u8 {
        match self {
            ChomskyType::Type0 => 0,
            ChomskyType::Type1 => 1,
            ChomskyType::Type2 => 2,
            ChomskyType::Type3 => 3,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChomskyType::Type0 => "unrestricted",
            ChomskyType::Type1 => "context-sensitive",
            ChomskyType::Type2 => "context-free",
            ChomskyType::Type3 => "regular",
        }
    }
}

impl Display for ChomskyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type {} ({})", self.level(), self.description())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Linearity {
    Left,
    Right,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Reason {
    // The head is longer than the body
    Shrinking,
    // The head holds a digit or a lowercase letter
    ContextualHead,
    // The body starts (left) or ends (right) with the head
    Linear(Linearity),
    // No rule matched anything
    Fallthrough,
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::Shrinking => write!(f, "head is longer than body"),
            Reason::ContextualHead => write!(f, "head contains a digit or lowercase letter"),
            Reason::Linear(Linearity::Left) => write!(f, "body starts with head (left-linear)"),
            Reason::Linear(Linearity::Right) => write!(f, "body ends with head (right-linear)"),
            Reason::Fallthrough => write!(f, "no rule matched a stricter shape"),
        }
    }
}

/// The outcome of classifying a grammar, with the rule that settled it.
/// `rule` and `position` are `None` only for `Reason::Fallthrough`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Verdict {
    pub kind: ChomskyType,
    pub reason: Reason,
    pub rule: Option<RuleId>,
    pub position: Option<usize>,
}

// Checks run in this order, the first that holds decides the rule
fn classify_rule(rule: &Rule) -> Option<(ChomskyType, Reason)> {
    if rule.head.chars().count() > rule.body.chars().count() {
        Some((ChomskyType::Type0, Reason::Shrinking))
    } else if rule.head.chars().any(|c| c.is_ascii_digit() || c.is_ascii_lowercase()) {
        Some((ChomskyType::Type1, Reason::ContextualHead))
    } else if rule.body.starts_with(&rule.head) {
        Some((ChomskyType::Type3, Reason::Linear(Linearity::Left)))
    } else if rule.body.ends_with(&rule.head) {
        Some((ChomskyType::Type3, Reason::Linear(Linearity::Right)))
    } else {
        None
    }
}

/// Scans the rules in order and stops at the first one with a telling shape.
/// Reordering rules can change the answer.
pub fn explain(grammar: &Grammar) -> Verdict {
    let decided = grammar
        .entries()
        .enumerate()
        .find_map(|(position, (id, rule))| {
            classify_rule(rule).map(|(kind, reason)| Verdict {
                kind,
                reason,
                rule: Some(id),
                position: Some(position)
            })
        });

    match decided {
        Some(verdict) => {
            debug!(grammar = grammar.name(), rule = ?verdict.rule, kind = %verdict.kind, reason = %verdict.reason, "rule decided grammar type");
            verdict
        }
        None => {
            debug!(grammar = grammar.name(), rules = grammar.len(), "no rule decided, falling back to type 2");
            Verdict {
                kind: ChomskyType::Type2,
                reason: Reason::Fallthrough,
                rule: None,
                position: None
            }
        }
    }
}

pub fn classify(grammar: &Grammar) -> ChomskyType {
    explain(grammar).kind
}
