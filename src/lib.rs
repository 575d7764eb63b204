/*
    Grammars, their text format, and a guess at their Chomsky type
*/

pub mod classifier;
pub mod codec;
pub mod error_handling;
pub mod grammar;

pub use classifier::{classify, explain, ChomskyType, Linearity, Reason, Verdict};
pub use codec::{decode, decode_str, encode, encode_to_string, verify_encodable};
pub use grammar::{Catalog, Grammar, GrammarId, ModelError, Rule, RuleId};
