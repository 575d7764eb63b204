/*
    This module is for storing and manipulating grammars
*/

mod catalog;

pub use catalog::{Catalog, GrammarId};

use std::fmt::Display;

// A single production, `head -> body`. An empty body is the lambda production
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub head: String,
    pub body: String,
}

impl Rule {
    pub fn new(head: impl Into<String>, body: impl Into<String>) -> Self {
        Rule {
            head: head.into(),
            body: body.into()
        }
    }

    pub fn is_lambda(&self) -> bool {
        self.body.is_empty()
    }

    fn validate(&self) -> Result<()> {
        if self.head.is_empty() {
            return Err(ModelError::EmptyHead);
        }
        Ok(())
    }
}

/// Stable handle for a rule inside one grammar. Handed out in increasing
/// order and never reused, so it survives removals of other rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u64);

impl Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ModelError {
    // A rule was given an empty head
    EmptyHead,
    // A position-addressed operation got a position past the end
    IndexOutOfBounds { index: usize, len: usize },
    // No rule with this id lives in the grammar
    UnknownRule(RuleId),
    // No grammar with this id lives in the catalog
    UnknownGrammar(GrammarId),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::EmptyHead => write!(f, "Rule head must not be empty"),
            ModelError::IndexOutOfBounds { index, len } => write!(f, "Rule position {} is out of range (grammar has {} rules)", index, len),
            ModelError::UnknownRule(id) => write!(f, "No rule with id `{}`", id),
            ModelError::UnknownGrammar(id) => write!(f, "No grammar with id `{}`", id),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;

/// A named, ordered list of rules.
///
/// Every editing operation leaves `self` untouched and hands back a new
/// grammar. Rule order matters to classification and is kept as inserted.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    rules: Vec<(RuleId, Rule)>,
    next_id: u64,
}

// Ids only address rules, two grammars with the same name and rules are equal
impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.rules().eq(other.rules())
    }
}

impl Eq for Grammar {}

impl Grammar {
    pub fn new(name: impl Into<String>) -> Self {
        Grammar {
            name: name.into(),
            rules: Vec::new(),
            next_id: 0
        }
    }

    pub fn with_rules(name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Result<Self> {
        rules.into_iter().try_fold(Grammar::new(name), |grammar, rule| grammar.add_rule(rule))
    }

    pub fn rename(&self, name: impl Into<String>) -> Self {
        Grammar {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter().map(|(_, rule)| rule)
    }

    pub fn entries(&self) -> impl Iterator<Item = (RuleId, &Rule)> + '_ {
        self.rules.iter().map(|(id, rule)| (*id, rule))
    }

    pub fn rule_at(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index).map(|(_, rule)| rule)
    }

    pub fn position_of(&self, id: RuleId) -> Option<usize> {
        self.rules.iter().position(|(rule_id, _)| *rule_id == id)
    }

    /// Id of the most recently added rule still in the grammar.
    pub fn last_id(&self) -> Option<RuleId> {
        self.rules.iter().map(|(id, _)| *id).max()
    }

    pub fn add_rule(&self, rule: Rule) -> Result<Self> {
        rule.validate()?;

        let mut grammar = self.clone();
        grammar.rules.push((RuleId(grammar.next_id), rule));
        grammar.next_id += 1;
        Ok(grammar)
    }

    pub fn remove_rule_at(&self, index: usize) -> Result<Self> {
        self.check_index(index)?;

        let mut grammar = self.clone();
        grammar.rules.remove(index);
        Ok(grammar)
    }

    pub fn replace_rule_at(&self, index: usize, rule: Rule) -> Result<Self> {
        self.check_index(index)?;
        rule.validate()?;

        let mut grammar = self.clone();
        grammar.rules[index].1 = rule;
        Ok(grammar)
    }

    pub fn remove_rule(&self, id: RuleId) -> Result<Self> {
        self.remove_rule_at(self.index_of(id)?)
    }

    pub fn replace_rule(&self, id: RuleId, rule: Rule) -> Result<Self> {
        self.replace_rule_at(self.index_of(id)?, rule)
    }

    fn index_of(&self, id: RuleId) -> Result<usize> {
        self.position_of(id).ok_or(ModelError::UnknownRule(id))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.rules.len() {
            return Err(ModelError::IndexOutOfBounds { index, len: self.rules.len() });
        }
        Ok(())
    }
}
