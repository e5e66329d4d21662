//! Conversion of context-free grammars to Chomsky Normal Form.
//!
//! The pipeline eliminates ε-productions, unit productions, inaccessible and
//! non-productive nonterminals, then isolates terminals and binarizes long
//! productions. CYK membership testing is provided on the resulting grammar.

pub mod errors;
pub mod grammars;
pub mod language;
