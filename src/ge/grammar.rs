//! Context-free grammars in BNF text form.

use std::collections::HashMap;

/// Production table of the heuristic-program language.
///
/// A program is one acceptance token followed by one or more heuristic
/// calls.
pub const DEFAULT_GRAMMAR: &str = "\
<start> ::= <accept> <heuristic>
<accept> ::= ILTA | AI | AEI
<heuristic> ::= <heuristic> <heuristic> | single_move() | swap_slots() | swap_lectures()
";

/// A grammar symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Text copied into the phenotype.
    Terminal(String),
    /// Index of a rule in the owning [`Grammar`].
    NonTerminal(usize),
}

/// Failure to read a grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("grammar defines no rules")]
    Empty,

    #[error("line {line}: expected `<name> ::= alternatives`")]
    MissingDefinition { line: usize },

    #[error("line {line}: `{token}` is not a non-terminal")]
    InvalidNonTerminal { line: usize, token: String },

    #[error("line {line}: empty alternative")]
    EmptyAlternative { line: usize },

    #[error("non-terminal `{0}` is defined twice")]
    DuplicateRule(String),

    #[error("non-terminal `{0}` is used but never defined")]
    UndefinedNonTerminal(String),
}

/// A context-free grammar; the first rule's left-hand side is the start
/// symbol.
///
/// ```
/// use u_timetable::ge::{Grammar, Symbol};
///
/// let g = Grammar::parse("<s> ::= a <t> | b\n<t> ::= c").unwrap();
/// assert_eq!(g.len(), 2);
/// assert_eq!(g.alternatives(g.start()).len(), 2);
/// assert_eq!(g.alternatives(1), &[vec![Symbol::Terminal("c".into())]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    names: Vec<String>,
    rules: Vec<Vec<Vec<Symbol>>>,
    start: usize,
}

impl Grammar {
    /// Parses one rule per non-empty line: `<name> ::= alt | alt ...`.
    ///
    /// Symbols within an alternative are separated by whitespace; tokens
    /// written `<like-this>` are non-terminals, everything else is a
    /// terminal. Lines starting with `#` are comments.
    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
            .collect();
        if lines.is_empty() {
            return Err(GrammarError::Empty);
        }

        let mut definitions = Vec::with_capacity(lines.len());
        let mut index: HashMap<&str, usize> = HashMap::new();
        for &(line, text) in &lines {
            let (lhs, rhs) = text
                .split_once("::=")
                .ok_or(GrammarError::MissingDefinition { line })?;
            let lhs = lhs.trim();
            if !is_non_terminal(lhs) {
                return Err(GrammarError::InvalidNonTerminal {
                    line,
                    token: lhs.to_string(),
                });
            }
            if index.insert(lhs, definitions.len()).is_some() {
                return Err(GrammarError::DuplicateRule(lhs.to_string()));
            }
            definitions.push((line, lhs, rhs));
        }

        let mut rules = Vec::with_capacity(definitions.len());
        for &(line, _, rhs) in &definitions {
            let mut alternatives = Vec::new();
            for alt in rhs.split('|') {
                let symbols = alt
                    .split_whitespace()
                    .map(|token| {
                        if is_non_terminal(token) {
                            index
                                .get(token)
                                .map(|&i| Symbol::NonTerminal(i))
                                .ok_or_else(|| GrammarError::UndefinedNonTerminal(token.to_string()))
                        } else {
                            Ok(Symbol::Terminal(token.to_string()))
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if symbols.is_empty() {
                    return Err(GrammarError::EmptyAlternative { line });
                }
                alternatives.push(symbols);
            }
            rules.push(alternatives);
        }

        Ok(Self {
            names: definitions.iter().map(|(_, n, _)| n.to_string()).collect(),
            rules,
            start: 0,
        })
    }

    /// Index of the start rule.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Productions of a rule.
    pub fn alternatives(&self, rule: usize) -> &[Vec<Symbol>] {
        &self.rules[rule]
    }

    /// `<name>` of a rule.
    pub fn name(&self, rule: usize) -> &str {
        &self.names[rule]
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Grammar {
    /// The heuristic-program grammar, [`DEFAULT_GRAMMAR`].
    fn default() -> Self {
        Self::parse(DEFAULT_GRAMMAR).expect("built-in grammar is well formed")
    }
}

fn is_non_terminal(token: &str) -> bool {
    token.len() > 2 && token.starts_with('<') && token.ends_with('>')
}
