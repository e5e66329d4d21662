use thiserror::Error;

use crate::grammars::types::NonTerminal;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("malformed grammar: {0}")]
    MalformedGrammar(String),

    #[error("start symbol {0} is no longer reachable after pruning")]
    UnreachableStart(NonTerminal),

    #[error("the grammar generates no terminal strings: {0} is not productive")]
    EmptyLanguage(NonTerminal),

    #[error("helper non-terminal {0} collides with an existing non-terminal")]
    HelperNameCollision(NonTerminal),
}
