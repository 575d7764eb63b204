use std::fmt::Display;

use super::{Grammar, ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrammarId(u64);

impl Display for GrammarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// The grammars a caller is working with, addressed by the id handed out on
/// creation rather than by name (names may repeat).
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    grammars: Vec<(GrammarId, Grammar)>,
    next_id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, grammar: Grammar) -> GrammarId {
        let id = GrammarId(self.next_id);
        self.next_id += 1;
        self.grammars.push((id, grammar));
        id
    }

    pub fn update(&mut self, id: GrammarId, grammar: Grammar) -> Result<()> {
        let slot = self.grammars
            .iter_mut()
            .find(|(grammar_id, _)| *grammar_id == id)
            .ok_or(ModelError::UnknownGrammar(id))?;
        slot.1 = grammar;
        Ok(())
    }

    pub fn remove(&mut self, id: GrammarId) -> Result<Grammar> {
        let index = self.grammars
            .iter()
            .position(|(grammar_id, _)| *grammar_id == id)
            .ok_or(ModelError::UnknownGrammar(id))?;
        Ok(self.grammars.remove(index).1)
    }

    pub fn get(&self, id: GrammarId) -> Option<&Grammar> {
        self.grammars
            .iter()
            .find(|(grammar_id, _)| *grammar_id == id)
            .map(|(_, grammar)| grammar)
    }

    // In creation order
    pub fn iter(&self) -> impl Iterator<Item = (GrammarId, &Grammar)> + '_ {
        self.grammars.iter().map(|(id, grammar)| (*id, grammar))
    }

    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = GrammarId> + 'a {
        self.iter()
            .filter(move |(_, grammar)| grammar.name() == name)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::grammar::Rule;

    #[test]
    fn duplicate_names_stay_separate() {
        let mut catalog = Catalog::new();
        let first = catalog.create(Grammar::new("G"));
        let second = catalog.create(Grammar::new("G"));

        let edited = Grammar::new("G").add_rule(Rule::new("S", "a")).unwrap();
        catalog.update(second, edited.clone()).unwrap();

        assert_eq!(catalog.get(first), Some(&Grammar::new("G")));
        assert_eq!(catalog.get(second), Some(&edited));
        assert_eq!(catalog.find_by_name("G").collect_vec(), vec![first, second]);
    }

    #[test]
    fn remove_then_ids_are_not_reused() {
        let mut catalog = Catalog::new();
        let first = catalog.create(Grammar::new("A"));
        let second = catalog.create(Grammar::new("B"));

        assert_eq!(catalog.remove(first), Ok(Grammar::new("A")));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.remove(first), Err(ModelError::UnknownGrammar(first)));

        let third = catalog.create(Grammar::new("C"));
        assert!(third > second);
        assert_eq!(catalog.iter().map(|(_, g)| g.name()).collect_vec(), vec!["B", "C"]);
    }

    #[test]
    fn update_unknown_grammar() {
        let mut catalog = Catalog::new();
        let id = catalog.create(Grammar::new("A"));
        catalog.remove(id).unwrap();

        assert!(catalog.is_empty());
        assert_eq!(catalog.update(id, Grammar::new("A")), Err(ModelError::UnknownGrammar(id)));
    }
}
