use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::{
    errors::GrammarError,
    grammars::{
        chomsky_normal_form::ChomskyNormalFormGrammar,
        types::{Grammar, NonTerminal, ProductionSymbol, Terminal},
    },
    language::{Symbol, Word, EPSILON},
};

/// A context-free grammar over explicit terminal and nonterminal alphabets.
///
/// Every transformation below is pure: it reads `&self` and allocates a new
/// grammar, so intermediate results of the normalization pipeline can be
/// inspected independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFreeGrammar {
    pub(super) start_symbol: NonTerminal,
    pub(super) non_terminals: IndexSet<NonTerminal>,
    pub(super) terminals: IndexSet<Terminal>,
    pub(super) productions: IndexMap<NonTerminal, IndexSet<Word<ProductionSymbol>>>,
}

impl Grammar<Word<ProductionSymbol>> for ContextFreeGrammar {
    fn start_symbol(&self) -> &NonTerminal {
        &self.start_symbol
    }

    fn non_terminals(&self) -> &IndexSet<NonTerminal> {
        &self.non_terminals
    }

    fn terminals(&self) -> &IndexSet<Terminal> {
        &self.terminals
    }

    fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<Word<ProductionSymbol>>> {
        &self.productions
    }
}

impl ContextFreeGrammar {
    pub fn new(start_symbol: NonTerminal) -> Self {
        Self {
            non_terminals: IndexSet::from([start_symbol.clone()]),
            start_symbol,
            terminals: IndexSet::new(),
            productions: IndexMap::new(),
        }
    }

    /// Builds a grammar from explicit components, rejecting malformed input
    /// before any transformation can run on it.
    pub fn from_parts(
        start_symbol: NonTerminal,
        non_terminals: IndexSet<NonTerminal>,
        terminals: IndexSet<Terminal>,
        productions: IndexMap<NonTerminal, IndexSet<Word<ProductionSymbol>>>,
    ) -> Result<Self, GrammarError> {
        let grammar = Self {
            start_symbol,
            non_terminals,
            terminals,
            productions,
        };

        grammar.validate()?;

        Ok(grammar)
    }

    /// Records `lhs → rhs`, extending the alphabets with every symbol the
    /// production mentions. An empty `rhs` is the ε production.
    pub fn add_production(&mut self, lhs: NonTerminal, rhs: Word<ProductionSymbol>) {
        self.non_terminals.insert(lhs.clone());

        for symbol in &rhs.0 {
            match symbol {
                ProductionSymbol::Terminal(t) => {
                    self.terminals.insert(t.clone());
                }
                ProductionSymbol::NonTerminal(nt) => {
                    self.non_terminals.insert(nt.clone());
                }
            }
        }

        self.productions
            .entry(lhs)
            .or_insert_with(IndexSet::new)
            .insert(rhs);
    }

    /// Compact construction for exercises and tests: single uppercase letters
    /// are nonterminals, everything else is a terminal, alternatives are
    /// separated by `|` and `ε` denotes the empty word.
    pub fn from_productions<S: AsRef<str>>(start_symbol: S, productions: &[impl AsRef<str>]) -> Self {
        let start_symbol = NonTerminal(Symbol::new(start_symbol.as_ref()));
        let mut grammar = Self::new(start_symbol);

        for production in productions {
            let production = production.as_ref();
            let Some((lhs, alternatives)) = production.split_once('→') else {
                panic!("invalid production: {production}");
            };

            let lhs = lhs.trim();
            let mut lhs_symbols = lhs.chars();
            let (Some(head), None) = (lhs_symbols.next(), lhs_symbols.next()) else {
                panic!("production head must be a single non-terminal: {lhs}");
            };
            if !head.is_ascii_uppercase() {
                panic!("production head must be a non-terminal: {lhs}");
            }

            let lhs = NonTerminal(Symbol::new(head));

            for alternative in alternatives.split('|') {
                let alternative = alternative.trim();

                let word = if alternative == EPSILON {
                    Word(Vec::new())
                } else {
                    Word(
                        alternative
                            .chars()
                            .map(|c| {
                                if c.is_ascii_uppercase() {
                                    ProductionSymbol::NonTerminal(NonTerminal(Symbol::new(c)))
                                } else {
                                    ProductionSymbol::Terminal(Terminal(Symbol::new(c)))
                                }
                            })
                            .collect(),
                    )
                };

                grammar.add_production(lhs.clone(), word);
            }
        }

        grammar
    }

    /// Checks the structural invariants of the grammar value: the start
    /// symbol is a nonterminal, the alphabets are disjoint, and every symbol
    /// on a right-hand side belongs to one of them.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if !self.non_terminals.contains(&self.start_symbol) {
            return Err(GrammarError::MalformedGrammar(format!(
                "start symbol {} is not a non-terminal of the grammar",
                self.start_symbol
            )));
        }

        for terminal in &self.terminals {
            if self.non_terminals.iter().any(|nt| nt.0 == terminal.0) {
                return Err(GrammarError::MalformedGrammar(format!(
                    "symbol {terminal} is both a terminal and a non-terminal"
                )));
            }
        }

        for (lhs, rhs) in &self.productions {
            if !self.non_terminals.contains(lhs) {
                return Err(GrammarError::MalformedGrammar(format!(
                    "production head {lhs} is not a non-terminal of the grammar"
                )));
            }

            for word in rhs {
                for symbol in &word.0 {
                    let known = match symbol {
                        ProductionSymbol::Terminal(t) => self.terminals.contains(t),
                        ProductionSymbol::NonTerminal(nt) => self.non_terminals.contains(nt),
                    };

                    if !known {
                        return Err(GrammarError::MalformedGrammar(format!(
                            "production {lhs} → {word} references the unknown symbol {symbol}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Least fixpoint of nullability: a nonterminal is nullable if it has an
    /// ε production or a production made entirely of nullable nonterminals.
    pub fn nullable_non_terminals(&self) -> IndexSet<NonTerminal> {
        let mut nullable = IndexSet::new();

        loop {
            let mut changed = false;

            for (lhs, rhs) in &self.productions {
                if nullable.contains(lhs) {
                    continue;
                }

                let is_nullable = rhs.iter().any(|word| {
                    word.0.iter().all(|symbol| match symbol {
                        ProductionSymbol::NonTerminal(nt) => nullable.contains(nt),
                        ProductionSymbol::Terminal(_) => false,
                    })
                });

                if is_nullable {
                    nullable.insert(lhs.clone());
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }

        nullable
    }

    /// Removes every ε production, expanding each production into all
    /// keep/drop combinations over its nullable positions. The all-dropped
    /// combination is discarded, so a nonterminal whose only production was ε
    /// is left with an empty production set for the productivity pruner.
    pub fn eliminate_epsilon_productions(&self) -> Self {
        let nullable = self.nullable_non_terminals();

        let productions = self
            .productions
            .iter()
            .map(|(lhs, rhs)| {
                let mut next_rhs = IndexSet::new();

                for word in rhs {
                    if word.is_empty() {
                        continue;
                    }

                    let expansions = word
                        .0
                        .iter()
                        .map(|symbol| match symbol {
                            ProductionSymbol::NonTerminal(nt) if nullable.contains(nt) => {
                                vec![Some(symbol.clone()), None]
                            }
                            _ => vec![Some(symbol.clone())],
                        })
                        .multi_cartesian_product()
                        .filter_map(|symbols| {
                            let symbols = symbols.into_iter().flatten().collect::<Vec<_>>();
                            if symbols.is_empty() {
                                None
                            } else {
                                Some(Word(symbols))
                            }
                        });

                    next_rhs.extend(expansions);
                }

                (lhs.clone(), next_rhs)
            })
            .collect();

        Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self.non_terminals.clone(),
            terminals: self.terminals.clone(),
            productions,
        }
    }

    /// Nonterminals whose entire production set is one lone terminal. The
    /// start symbol is exempt, it must survive every stage.
    fn terminal_only_non_terminals(&self) -> IndexMap<NonTerminal, Terminal> {
        self.productions
            .iter()
            .filter(|(lhs, _)| **lhs != self.start_symbol)
            .filter_map(|(lhs, rhs)| {
                if rhs.len() != 1 {
                    return None;
                }

                match rhs[0].0.as_slice() {
                    [ProductionSymbol::Terminal(t)] => Some((lhs.clone(), t.clone())),
                    _ => None,
                }
            })
            .collect()
    }

    /// The set of nonterminals reachable from `nt` through renaming
    /// productions alone, `nt` included.
    fn unit_closure(&self, nt: &NonTerminal) -> IndexSet<NonTerminal> {
        let mut closure = IndexSet::new();
        let mut frontier = IndexSet::from([nt.clone()]);

        while !frontier.is_empty() {
            for member in std::mem::take(&mut frontier) {
                if !closure.insert(member.clone()) {
                    continue;
                }

                if let Some(rhs) = self.productions.get(&member) {
                    for word in rhs {
                        if let [ProductionSymbol::NonTerminal(next)] = word.0.as_slice() {
                            if !closure.contains(next) {
                                frontier.insert(next.clone());
                            }
                        }
                    }
                }
            }
        }

        closure
    }

    /// Removes renaming productions. Each nonterminal receives the non-unit
    /// productions of its whole unit closure, so chains of renamings resolve
    /// in one pass and `A → A` loops vanish. Terminal-only nonterminals are
    /// dropped from the grammar and their terminal is spliced in wherever
    /// they were referenced.
    pub fn eliminate_unit_productions(&self) -> Self {
        let terminal_only = self.terminal_only_non_terminals();

        let mut productions = IndexMap::new();

        for lhs in self.productions.keys() {
            if terminal_only.contains_key(lhs) {
                continue;
            }

            let mut next_rhs = IndexSet::new();

            for member in self.unit_closure(lhs) {
                let Some(rhs) = self.productions.get(&member) else {
                    continue;
                };

                for word in rhs {
                    if let [ProductionSymbol::NonTerminal(_)] = word.0.as_slice() {
                        continue;
                    }

                    let symbols = word
                        .0
                        .iter()
                        .map(|symbol| match symbol {
                            ProductionSymbol::NonTerminal(nt) => match terminal_only.get(nt) {
                                Some(t) => ProductionSymbol::Terminal(t.clone()),
                                None => symbol.clone(),
                            },
                            ProductionSymbol::Terminal(_) => symbol.clone(),
                        })
                        .collect();

                    next_rhs.insert(Word(symbols));
                }
            }

            productions.insert(lhs.clone(), next_rhs);
        }

        Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self
                .non_terminals
                .iter()
                .filter(|nt| !terminal_only.contains_key(*nt))
                .cloned()
                .collect(),
            terminals: self.terminals.clone(),
            productions,
        }
    }

    /// Closure of `{start_symbol}` under "appears on a right-hand side of".
    pub fn reachable_non_terminals(&self) -> IndexSet<NonTerminal> {
        let mut reachable = IndexSet::new();
        let mut stack = vec![self.start_symbol.clone()];

        while let Some(nt) = stack.pop() {
            if !reachable.insert(nt.clone()) {
                continue;
            }

            if let Some(rhs) = self.productions.get(&nt) {
                for word in rhs {
                    for symbol in &word.0 {
                        if let ProductionSymbol::NonTerminal(next) = symbol {
                            if !reachable.contains(next) {
                                stack.push(next.clone());
                            }
                        }
                    }
                }
            }
        }

        reachable
    }

    /// Removes nonterminals that no derivation from the start symbol can
    /// reach, together with their productions.
    pub fn eliminate_inaccessible(&self) -> Self {
        let reachable = self.reachable_non_terminals();

        let productions = self
            .productions
            .iter()
            .filter(|(lhs, _)| reachable.contains(*lhs))
            .map(|(lhs, rhs)| {
                let rhs = rhs
                    .iter()
                    .filter(|word| {
                        word.0.iter().all(|symbol| match symbol {
                            ProductionSymbol::NonTerminal(nt) => reachable.contains(nt),
                            ProductionSymbol::Terminal(_) => true,
                        })
                    })
                    .cloned()
                    .collect();

                (lhs.clone(), rhs)
            })
            .collect();

        Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self
                .non_terminals
                .iter()
                .filter(|nt| reachable.contains(*nt))
                .cloned()
                .collect(),
            terminals: self.terminals.clone(),
            productions,
        }
    }

    /// Least fixpoint of productivity: a nonterminal is productive if some
    /// production of it consists only of terminals, ε, or nonterminals
    /// already known to be productive.
    pub fn productive_non_terminals(&self) -> IndexSet<NonTerminal> {
        let mut productive = IndexSet::new();

        loop {
            let mut changed = false;

            for (lhs, rhs) in &self.productions {
                if productive.contains(lhs) {
                    continue;
                }

                let is_productive = rhs.iter().any(|word| {
                    word.0.iter().all(|symbol| match symbol {
                        ProductionSymbol::NonTerminal(nt) => productive.contains(nt),
                        ProductionSymbol::Terminal(_) => true,
                    })
                });

                if is_productive {
                    productive.insert(lhs.clone());
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }

        productive
    }

    /// Removes nonterminals that can never derive a terminal string, and
    /// every production mentioning one. The start symbol itself may be
    /// removed here; the pipeline reports that as `EmptyLanguage`.
    pub fn eliminate_nonproductive(&self) -> Self {
        let productive = self.productive_non_terminals();

        let productions = self
            .productions
            .iter()
            .filter(|(lhs, _)| productive.contains(*lhs))
            .map(|(lhs, rhs)| {
                let rhs = rhs
                    .iter()
                    .filter(|word| {
                        word.0.iter().all(|symbol| match symbol {
                            ProductionSymbol::NonTerminal(nt) => productive.contains(nt),
                            ProductionSymbol::Terminal(_) => true,
                        })
                    })
                    .cloned()
                    .collect();

                (lhs.clone(), rhs)
            })
            .collect();

        Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self
                .non_terminals
                .iter()
                .filter(|nt| productive.contains(*nt))
                .cloned()
                .collect(),
            terminals: self.terminals.clone(),
            productions,
        }
    }

    /// Stages 1–4 of the pipeline: the grammar comes back free of ε
    /// productions, unit productions, inaccessible and non-productive
    /// nonterminals, or the degenerate outcome is reported.
    pub fn normalized(&self) -> Result<Self, GrammarError> {
        self.validate()?;

        let grammar = self
            .eliminate_epsilon_productions()
            .eliminate_unit_productions()
            .eliminate_inaccessible();

        if !grammar.non_terminals.contains(&grammar.start_symbol) {
            return Err(GrammarError::UnreachableStart(self.start_symbol.clone()));
        }

        let grammar = grammar.eliminate_nonproductive();

        if !grammar.non_terminals.contains(&grammar.start_symbol) {
            return Err(GrammarError::EmptyLanguage(self.start_symbol.clone()));
        }

        Ok(grammar)
    }

    /// Replaces every terminal occurring in a production of length ≥ 2 with
    /// a helper nonterminal `X_t` whose sole production is that terminal.
    /// Helpers are created lazily, one per distinct terminal, and reused.
    pub fn isolate_terminals(&self) -> Result<Self, GrammarError> {
        let mut non_terminals = self.non_terminals.clone();
        let mut helpers: IndexMap<Terminal, NonTerminal> = IndexMap::new();
        let mut helper_productions = IndexMap::new();

        let mut productions = IndexMap::new();

        for (lhs, rhs) in &self.productions {
            let mut next_rhs = IndexSet::new();

            for word in rhs {
                if word.len() < 2 {
                    next_rhs.insert(word.clone());
                    continue;
                }

                let mut symbols = Vec::with_capacity(word.len());

                for symbol in &word.0 {
                    match symbol {
                        ProductionSymbol::NonTerminal(_) => symbols.push(symbol.clone()),
                        ProductionSymbol::Terminal(t) => {
                            let helper = match helpers.get(t) {
                                Some(helper) => helper.clone(),
                                None => {
                                    let helper =
                                        NonTerminal(Symbol::new(format!("X_{}", t)));

                                    if !non_terminals.insert(helper.clone()) {
                                        return Err(GrammarError::HelperNameCollision(helper));
                                    }

                                    helper_productions.insert(
                                        helper.clone(),
                                        IndexSet::from([Word(vec![ProductionSymbol::Terminal(
                                            t.clone(),
                                        )])]),
                                    );
                                    helpers.insert(t.clone(), helper.clone());

                                    helper
                                }
                            };

                            symbols.push(ProductionSymbol::NonTerminal(helper));
                        }
                    }
                }

                next_rhs.insert(Word(symbols));
            }

            productions.insert(lhs.clone(), next_rhs);
        }

        productions.extend(helper_productions);

        Ok(Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals,
            terminals: self.terminals.clone(),
            productions,
        })
    }

    pub fn to_chomsky_normal_form(&self) -> Result<ChomskyNormalFormGrammar, GrammarError> {
        ChomskyNormalFormGrammar::from_context_free_grammar(self)
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

    fn w(symbols: &str) -> Word<ProductionSymbol> {
        Word(
            symbols
                .chars()
                .map(|c| {
                    if c.is_ascii_uppercase() {
                        ProductionSymbol::NonTerminal(NonTerminal(Symbol::new(c)))
                    } else {
                        ProductionSymbol::Terminal(Terminal(Symbol::new(c)))
                    }
                })
                .collect(),
        )
    }

    fn sample_grammar() -> ContextFreeGrammar {
        ContextFreeGrammar::from_productions(
            "S",
            &["S → aB | A", "A → a | aS | aBdAB", "B → a | dA | A | ε", "C → Aa"],
        )
    }

    #[test]
    fn nullability_of_direct_epsilon_production() {
        assert_eq!(sample_grammar().nullable_non_terminals(), indexset! {nt("B")});
    }

    #[test]
    fn nullability_propagates_through_all_nullable_productions() {
        let grammar =
            ContextFreeGrammar::from_productions("S", &["S → aY", "Y → XX", "X → ε"]);

        assert_eq!(grammar.nullable_non_terminals(), indexset! {nt("X"), nt("Y")});
    }

    #[test]
    fn epsilon_elimination_expands_nullable_positions() {
        let grammar = sample_grammar().eliminate_epsilon_productions();

        assert_eq!(grammar.productions[&nt("S")], indexset! {w("aB"), w("a"), w("A")});
        assert_eq!(
            grammar.productions[&nt("A")],
            indexset! {w("a"), w("aS"), w("aBdAB"), w("aBdA"), w("adAB"), w("adA")}
        );
        assert_eq!(grammar.productions[&nt("B")], indexset! {w("a"), w("dA"), w("A")});
        assert_eq!(grammar.productions[&nt("C")], indexset! {w("Aa")});

        assert!(grammar
            .productions
            .values()
            .flatten()
            .all(|word| !word.is_empty()));
    }

    #[test]
    fn epsilon_elimination_may_leave_an_empty_production_set() {
        let grammar = ContextFreeGrammar::from_productions("S", &["S → aB | a", "B → ε"])
            .eliminate_epsilon_productions();

        assert!(grammar.productions[&nt("B")].is_empty());
        assert_eq!(grammar.productions[&nt("S")], indexset! {w("aB"), w("a")});
    }

    #[test]
    fn unit_elimination_inlines_the_unit_closure() {
        let grammar = sample_grammar()
            .eliminate_epsilon_productions()
            .eliminate_unit_productions();

        assert_eq!(
            grammar.productions[&nt("S")],
            indexset! {w("aB"), w("a"), w("aS"), w("aBdAB"), w("aBdA"), w("adAB"), w("adA")}
        );
        assert_eq!(
            grammar.productions[&nt("B")],
            indexset! {w("a"), w("dA"), w("aS"), w("aBdAB"), w("aBdA"), w("adAB"), w("adA")}
        );

        assert!(grammar.productions.values().flatten().all(|word| {
            !matches!(word.0.as_slice(), [ProductionSymbol::NonTerminal(_)])
        }));
    }

    #[test]
    fn unit_elimination_drops_and_splices_terminal_only_non_terminals() {
        let grammar = ContextFreeGrammar::from_productions("S", &["S → aB | B", "B → b"])
            .eliminate_unit_productions();

        assert!(!grammar.non_terminals.contains(&nt("B")));
        assert_eq!(grammar.productions[&nt("S")], indexset! {w("ab"), w("b")});
    }

    #[test]
    fn unit_elimination_resolves_renaming_chains() {
        let grammar =
            ContextFreeGrammar::from_productions("S", &["S → A", "A → B", "B → b | bB"])
                .eliminate_unit_productions();

        assert_eq!(grammar.productions[&nt("S")], indexset! {w("b"), w("bB")});
        assert_eq!(grammar.productions[&nt("A")], indexset! {w("b"), w("bB")});
    }

    #[test]
    fn unit_elimination_discards_self_renamings() {
        let grammar = ContextFreeGrammar::from_productions("S", &["S → S | a"])
            .eliminate_unit_productions();

        assert_eq!(grammar.productions[&nt("S")], indexset! {w("a")});
    }

    #[test]
    fn inaccessible_non_terminals_are_pruned() {
        let grammar =
            ContextFreeGrammar::from_productions("S", &["S → aB", "B → b", "Z → Y", "Y → d"])
                .eliminate_inaccessible();

        assert_eq!(grammar.non_terminals, indexset! {nt("S"), nt("B")});
        assert!(!grammar.productions.contains_key(&nt("Z")));
        assert!(!grammar.productions.contains_key(&nt("Y")));
    }

    #[test]
    fn reachability_pruning_is_idempotent() {
        let once = ContextFreeGrammar::from_productions(
            "S",
            &["S → aB", "B → b", "Z → Y", "Y → d"],
        )
        .eliminate_inaccessible();

        assert_eq!(once.eliminate_inaccessible(), once);
    }

    #[test]
    fn nonproductive_non_terminals_are_pruned() {
        let grammar =
            ContextFreeGrammar::from_productions("S", &["S → aB | a", "B → b", "D → aD"])
                .eliminate_nonproductive();

        assert_eq!(grammar.non_terminals, indexset! {nt("S"), nt("B")});
        assert_eq!(grammar.productions[&nt("S")], indexset! {w("aB"), w("a")});
    }

    #[test]
    fn productivity_pruning_is_idempotent() {
        let once = ContextFreeGrammar::from_productions("S", &["S → aB | a", "B → b", "D → aD"])
            .eliminate_nonproductive();

        assert_eq!(once.eliminate_nonproductive(), once);
    }

    #[test]
    fn nonproductive_start_symbol_is_an_empty_language() {
        let result = ContextFreeGrammar::from_productions("S", &["S → aS"]).normalized();

        assert_eq!(result, Err(GrammarError::EmptyLanguage(nt("S"))));
    }

    #[test]
    fn terminal_isolation_reuses_one_helper_per_terminal() {
        let grammar = ContextFreeGrammar::from_productions("S", &["S → aA | aB | a", "A → ab", "B → b"])
            .isolate_terminals()
            .unwrap();

        assert_eq!(
            grammar.productions[&nt("S")],
            indexset! {
                Word(vec![
                    ProductionSymbol::NonTerminal(nt("X_a")),
                    ProductionSymbol::NonTerminal(nt("A")),
                ]),
                Word(vec![
                    ProductionSymbol::NonTerminal(nt("X_a")),
                    ProductionSymbol::NonTerminal(nt("B")),
                ]),
                w("a"),
            }
        );
        assert_eq!(grammar.productions[&nt("X_a")], indexset! {w("a")});
        assert_eq!(grammar.productions[&nt("X_b")], indexset! {w("b")});
        assert_eq!(grammar.productions[&nt("B")], indexset! {w("b")});
    }

    #[test]
    fn terminal_isolation_detects_helper_name_collisions() {
        let taken = nt("X_a");

        let grammar = ContextFreeGrammar::from_parts(
            nt("S"),
            indexset! {nt("S"), taken.clone()},
            indexset! {t("a")},
            IndexMap::from([
                (
                    nt("S"),
                    indexset! {Word(vec![
                        ProductionSymbol::Terminal(t("a")),
                        ProductionSymbol::NonTerminal(taken.clone()),
                    ])},
                ),
                (taken.clone(), indexset! {w("a")}),
            ]),
        )
        .unwrap();

        assert_eq!(
            grammar.isolate_terminals(),
            Err(GrammarError::HelperNameCollision(taken))
        );
    }

    #[test]
    fn validation_rejects_unknown_symbols() {
        let grammar = ContextFreeGrammar {
            start_symbol: nt("S"),
            non_terminals: indexset! {nt("S")},
            terminals: indexset! {t("a")},
            productions: IndexMap::from([(nt("S"), indexset! {w("aB")})]),
        };

        assert!(matches!(
            grammar.validate(),
            Err(GrammarError::MalformedGrammar(_))
        ));
    }

    #[test]
    fn validation_rejects_overlapping_alphabets() {
        let result = ContextFreeGrammar::from_parts(
            nt("S"),
            indexset! {nt("S"), nt("a")},
            indexset! {t("a")},
            IndexMap::new(),
        );

        assert!(matches!(result, Err(GrammarError::MalformedGrammar(_))));
    }

    #[test]
    fn definition_lists_components_and_productions() {
        let definition = ContextFreeGrammar::from_productions("S", &["S → aB | b", "B → b"])
            .definition();

        assert!(definition.starts_with("G = ({S, B}, {a, b}, P, S)"));
        assert!(definition.contains("S → aB | b"));
        assert!(definition.contains("B → b"));
    }
}
