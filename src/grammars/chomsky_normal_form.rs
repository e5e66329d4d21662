use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use tabled::{builder::Builder, settings::Style};

use crate::{
    errors::GrammarError,
    grammars::{
        context_free::ContextFreeGrammar,
        types::{Grammar, NonTerminal, ProductionSymbol, Terminal},
    },
    language::Symbol,
};

/// A right-hand side in Chomsky Normal Form. The type admits nothing but the
/// two legal shapes, so a constructed grammar is structurally valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CnfWord {
    Terminal(Terminal),
    NonTerminals(NonTerminal, NonTerminal),
}

impl Display for CnfWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CnfWord::Terminal(t) => write!(f, "{t}"),
            CnfWord::NonTerminals(nt1, nt2) => write!(f, "{nt1}{nt2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChomskyNormalFormGrammar {
    pub(super) start_symbol: NonTerminal,
    pub(super) non_terminals: IndexSet<NonTerminal>,
    pub(super) terminals: IndexSet<Terminal>,
    pub(super) productions: IndexMap<NonTerminal, IndexSet<CnfWord>>,
}

impl Grammar<CnfWord> for ChomskyNormalFormGrammar {
    fn start_symbol(&self) -> &NonTerminal {
        &self.start_symbol
    }

    fn non_terminals(&self) -> &IndexSet<NonTerminal> {
        &self.non_terminals
    }

    fn terminals(&self) -> &IndexSet<Terminal> {
        &self.terminals
    }

    fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<CnfWord>> {
        &self.productions
    }
}

fn expect_non_terminal(symbol: &ProductionSymbol) -> NonTerminal {
    match symbol {
        ProductionSymbol::NonTerminal(nt) => nt.clone(),
        ProductionSymbol::Terminal(t) => {
            unreachable!("terminal {t} inside a long production after terminal isolation")
        }
    }
}

impl ChomskyNormalFormGrammar {
    /// Runs the whole normalization pipeline: ε elimination, unit
    /// elimination, reachability and productivity pruning, terminal
    /// isolation, then binarization of every production longer than two
    /// symbols into a chain of `Y_<owner>_<n>` helpers.
    pub fn from_context_free_grammar(cfg: &ContextFreeGrammar) -> Result<Self, GrammarError> {
        let cfg = cfg.normalized()?.isolate_terminals()?;

        let mut non_terminals = cfg.non_terminals().clone();
        let mut productions: IndexMap<NonTerminal, IndexSet<CnfWord>> = IndexMap::new();

        for (lhs, rhs) in cfg.productions() {
            let mut helper_idx = 1;

            for word in rhs {
                match word.0.as_slice() {
                    [ProductionSymbol::Terminal(t)] => {
                        productions
                            .entry(lhs.clone())
                            .or_insert_with(IndexSet::new)
                            .insert(CnfWord::Terminal(t.clone()));
                    }
                    [symbol] => {
                        unreachable!("unit production {lhs} → {symbol} survived unit elimination")
                    }
                    [first, second] => {
                        productions
                            .entry(lhs.clone())
                            .or_insert_with(IndexSet::new)
                            .insert(CnfWord::NonTerminals(
                                expect_non_terminal(first),
                                expect_non_terminal(second),
                            ));
                    }
                    _ => {
                        let mut owner = lhs.clone();
                        let mut rest = word.0.as_slice();

                        while rest.len() > 2 {
                            let helper =
                                NonTerminal(Symbol::new(format!("Y_{}_{}", lhs, helper_idx)));
                            helper_idx += 1;

                            if !non_terminals.insert(helper.clone()) {
                                return Err(GrammarError::HelperNameCollision(helper));
                            }

                            productions
                                .entry(owner)
                                .or_insert_with(IndexSet::new)
                                .insert(CnfWord::NonTerminals(
                                    expect_non_terminal(&rest[0]),
                                    helper.clone(),
                                ));

                            owner = helper;
                            rest = &rest[1..];
                        }

                        productions
                            .entry(owner)
                            .or_insert_with(IndexSet::new)
                            .insert(CnfWord::NonTerminals(
                                expect_non_terminal(&rest[0]),
                                expect_non_terminal(&rest[1]),
                            ));
                    }
                }
            }
        }

        Ok(Self {
            start_symbol: cfg.start_symbol().clone(),
            non_terminals,
            terminals: cfg.terminals().clone(),
            productions,
        })
    }

    /// Fills the CYK recognition table for `word`.
    pub fn cyk(&self, word: &str) -> CykTable {
        let letters = word
            .chars()
            .map(|c| Terminal(Symbol::new(c)))
            .collect::<Vec<_>>();

        let n = letters.len();
        let mut table = CykTable::new(n, word, &self.start_symbol);

        for (i, letter) in letters.iter().enumerate() {
            for (lhs, rhs) in &self.productions {
                let derives_letter = rhs
                    .iter()
                    .any(|w| matches!(w, CnfWord::Terminal(t) if t == letter));

                if derives_letter {
                    table.insert(i, i, lhs.clone());
                }
            }
        }

        for span in 2..=n {
            for i in 0..=n - span {
                let j = i + span - 1;

                for k in i..j {
                    for (lhs, rhs) in &self.productions {
                        for w in rhs {
                            if let CnfWord::NonTerminals(nt1, nt2) = w {
                                if table.contains(i, k, nt1) && table.contains(k + 1, j, nt2) {
                                    table.insert(i, j, lhs.clone());
                                }
                            }
                        }
                    }
                }
            }
        }

        table
    }

    /// CYK membership test. CNF cannot represent ε, so the empty word is
    /// never accepted.
    pub fn accepts(&self, word: &str) -> bool {
        self.cyk(word).is_word_in_language()
    }
}

#[derive(Debug)]
pub struct CykTable {
    table: Vec<Vec<IndexSet<NonTerminal>>>,
    word: String,
    start_symbol: NonTerminal,
}

impl CykTable {
    fn new(size: usize, word: impl Into<String>, start_symbol: &NonTerminal) -> Self {
        CykTable {
            table: vec![vec![IndexSet::new(); size]; size],
            word: word.into(),
            start_symbol: start_symbol.clone(),
        }
    }

    pub fn contains(&self, i: usize, j: usize, value: &NonTerminal) -> bool {
        self.table[i][j].contains(value)
    }

    fn insert(&mut self, i: usize, j: usize, value: NonTerminal) {
        self.table[i][j].insert(value);
    }

    pub fn is_word_in_language(&self) -> bool {
        let n = self.table.len();

        n > 0 && self.table[0][n - 1].contains(&self.start_symbol)
    }
}

impl Display for CykTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CYK table for the word \"{}\":", self.word)?;

        let n = self.table.len();
        let mut builder = Builder::default();

        builder.push_record(
            std::iter::once(String::new()).chain((1..=n).map(|j| format!("j = {j}"))),
        );

        for (i, row) in self.table.iter().enumerate() {
            builder.push_record(std::iter::once(format!("i = {}", i + 1)).chain(
                row.iter().enumerate().map(|(j, cell)| {
                    if j < i {
                        String::new()
                    } else if cell.is_empty() {
                        "∅".to_string()
                    } else {
                        format!("{{{}}}", cell.iter().join(", "))
                    }
                }),
            ));
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        writeln!(f, "{table}")?;

        writeln!(
            f,
            "The word \"{}\" is {} by the grammar.",
            self.word,
            if self.is_word_in_language() {
                "accepted"
            } else {
                "rejected"
            }
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexset;
    use pretty_assertions::assert_eq;

    use super::*;

    fn nt(name: &str) -> NonTerminal {
        NonTerminal(Symbol::new(name))
    }

    fn t(name: &str) -> Terminal {
        Terminal(Symbol::new(name))
    }

    fn sample_cnf() -> ChomskyNormalFormGrammar {
        ContextFreeGrammar::from_productions(
            "S",
            &["S → aB | A", "A → a | aS | aBdAB", "B → a | dA | A | ε", "C → Aa"],
        )
        .to_chomsky_normal_form()
        .unwrap()
    }

    #[test]
    fn pipeline_produces_terminal_helpers() {
        let cnf = sample_cnf();

        assert_eq!(cnf.productions[&nt("X_a")], indexset! {CnfWord::Terminal(t("a"))});
        assert_eq!(cnf.productions[&nt("X_d")], indexset! {CnfWord::Terminal(t("d"))});
    }

    #[test]
    fn pipeline_preserves_the_start_symbol() {
        let cnf = sample_cnf();

        assert_eq!(cnf.start_symbol, nt("S"));
        assert!(cnf.non_terminals.contains(&nt("S")));
        assert!(cnf.productions[&nt("S")].contains(&CnfWord::Terminal(t("a"))));
    }

    #[test]
    fn pipeline_drops_inaccessible_non_terminals() {
        assert!(!sample_cnf().non_terminals.contains(&nt("C")));
    }

    #[test]
    fn binarization_chains_long_productions() {
        let cnf = ContextFreeGrammar::from_productions(
            "S",
            &["S → ABC", "A → a | aA", "B → b | bB", "C → c | cC"],
        )
        .to_chomsky_normal_form()
        .unwrap();

        assert!(cnf.productions[&nt("S")]
            .contains(&CnfWord::NonTerminals(nt("A"), nt("Y_S_1"))));
        assert_eq!(
            cnf.productions[&nt("Y_S_1")],
            indexset! {CnfWord::NonTerminals(nt("B"), nt("C"))}
        );
    }

    #[test]
    fn every_referenced_non_terminal_is_declared() {
        let cnf = sample_cnf();

        for (lhs, rhs) in &cnf.productions {
            assert!(cnf.non_terminals.contains(lhs));

            for word in rhs {
                if let CnfWord::NonTerminals(nt1, nt2) = word {
                    assert!(cnf.non_terminals.contains(nt1));
                    assert!(cnf.non_terminals.contains(nt2));
                }
            }
        }
    }

    #[test]
    fn cyk_recognizes_the_balanced_language() {
        let cnf = ContextFreeGrammar::from_productions("S", &["S → ab | aSb"])
            .to_chomsky_normal_form()
            .unwrap();

        for word in ["ab", "aabb", "aaabbb"] {
            assert!(cnf.accepts(word), "expected {word} to be accepted");
        }

        for word in ["", "a", "b", "ba", "aab", "abb", "abab"] {
            assert!(!cnf.accepts(word), "expected {word} to be rejected");
        }
    }

    #[test]
    fn cyk_table_reports_the_verdict() {
        let cnf = ContextFreeGrammar::from_productions("S", &["S → ab | aSb"])
            .to_chomsky_normal_form()
            .unwrap();

        assert!(cnf.cyk("aabb").to_string().contains("accepted"));
        assert!(cnf.cyk("ba").to_string().contains("rejected"));
    }

    #[test]
    fn a_grammar_without_terminal_derivations_is_reported() {
        let result = ContextFreeGrammar::from_productions("S", &["S → aS"])
            .to_chomsky_normal_form();

        assert_eq!(result, Err(GrammarError::EmptyLanguage(nt("S"))));
    }
}
