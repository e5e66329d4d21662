use std::fmt::Display;

use derive_more::Display;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::language::Symbol;

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(pub Symbol);

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(pub Symbol);

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub enum ProductionSymbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

/// Common surface of the grammar types: the four components of
/// G = (N, Σ, P, S), plus a shared pretty-printer.
pub trait Grammar<R: Display> {
    fn start_symbol(&self) -> &NonTerminal;
    fn non_terminals(&self) -> &IndexSet<NonTerminal>;
    fn terminals(&self) -> &IndexSet<Terminal>;
    fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<R>>;

    fn definition(&self) -> String {
        let start_symbol = self.start_symbol();

        let mut non_terminals = self.non_terminals().iter().collect::<Vec<_>>();
        non_terminals.sort_by(|a, b| {
            if *a == start_symbol {
                return std::cmp::Ordering::Less;
            }
            if *b == start_symbol {
                return std::cmp::Ordering::Greater;
            }
            a.cmp(b)
        });

        let mut terminals = self.terminals().iter().collect::<Vec<_>>();
        terminals.sort();

        let mut definition = format!(
            "G = ({{{}}}, {{{}}}, P, {})\n\nP = {{\n",
            non_terminals.iter().join(", "),
            terminals.iter().join(", "),
            start_symbol
        );

        let mut heads = self.productions().keys().collect::<Vec<_>>();
        heads.sort();

        for lhs in heads {
            let rhs = &self.productions()[lhs];
            if rhs.is_empty() {
                continue;
            }

            definition += &format!("  {} → {}\n", lhs, rhs.iter().join(" | "));
        }

        definition += "}\n";

        definition
    }
}
