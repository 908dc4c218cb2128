//! # R-style formula parsing
//!
//! This module contains the parser for the small formula language used by
//! the test dispatchers. A formula is a compact string that encodes a
//! dependent variable and one or more independent variables:
//!
//! ```text
//! y ~ a           y explained by a
//! y ~ a + b       y explained by a and b
//! y ~ a * b       y explained by a, b and their interaction (a, b)
//! y ~ a + b * c   y explained by a, b, c and the interaction (b, c)
//! ```
//!
//! The grammar is `dependent ~ term ((+|*) term)*` where a term is a bare
//! identifier made of word characters (letters, digits and `_`). Arbitrary
//! whitespace is tolerated around `~`, `+`, `*` and identifiers. There is no
//! quoting and no function call syntax.
//!
//! A maximal run of identifiers joined by `*` is captured as one interaction
//! tuple, and each of its members is *also* recorded as an ordinary
//! independent variable (its main effect). Note that no test dispatcher
//! currently consumes the interaction tuples: they are parsed and kept in
//! [`ParsedFormula::interactions`] for forward compatibility only.

use crate::errors::{FormulaError, TestError};

/// The structured output of [parse].
///
/// Constructed fresh per parse call and immediately consumed by a
/// dispatcher; it holds no reference to the formula string or any dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFormula {
    /// The identifier on the left of `~`.
    pub dependent: String,
    /// Every identifier on the right of `~`, in order of appearance.
    /// Duplicates are allowed. Always non-empty for an accepted formula.
    pub independent: Vec<String>,
    /// One tuple per maximal `*`-run, members in left-to-right order.
    ///
    /// Currently inert: no test consumes these.
    pub interactions: Vec<Vec<String>>,
}

impl ParsedFormula {
    /// Returns the single independent variable of the formula, or
    /// [TestError::Arity] if the formula named more (or, degenerately,
    /// fewer) than one.
    ///
    /// Every dispatcher in this crate computes single-factor tests, so they
    /// all gate their formula path trough this method.
    pub fn only_independent(&self) -> Result<&str, TestError> {
        if self.independent.len() != 1 {
            return Err(TestError::Arity {
                found: self.independent.len(),
            });
        }
        return Ok(&self.independent[0]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Tilde,
    Plus,
    Star,
}

fn tokenize(formula: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut chars = formula.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            let _ = chars.next();
            continue;
        }
        match c {
            '~' => {
                tokens.push(Token::Tilde);
                let _ = chars.next();
            }
            '+' => {
                tokens.push(Token::Plus);
                let _ = chars.next();
            }
            '*' => {
                tokens.push(Token::Star);
                let _ = chars.next();
            }
            _ if c.is_alphanumeric() || c == '_' => {
                let mut ident: String = String::new();
                while let Some(&w) = chars.peek() {
                    if w.is_alphanumeric() || w == '_' {
                        ident.push(w);
                        let _ = chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            _ => return Err(FormulaError("only the `+` and `*` operators are supported")),
        }
    }

    return Ok(tokens);
}

/// Parses a formula string into a [ParsedFormula].
///
/// Fails with [FormulaError] when the string does not match the grammar
/// `dependent ~ term ((+|*) term)*`: missing `~`, empty terms, dangling
/// operators or characters outside the word/operator alphabet. A string
/// shorter than 3 bytes fails fast: it is too short to contain `x~y`.
///
/// ```
/// use rformula::formula::parse;
///
/// let f = parse("y ~ a + b * c").unwrap();
/// assert_eq!(f.dependent, "y");
/// assert_eq!(f.independent, vec!["a", "b", "c"]);
/// assert_eq!(f.interactions, vec![vec!["b", "c"]]);
/// ```
pub fn parse(formula: &str) -> Result<ParsedFormula, FormulaError> {
    if formula.len() < 3 {
        return Err(FormulaError("too short to contain `x~y`"));
    }

    let tokens: Vec<Token> = tokenize(formula)?;
    let mut iter = tokens.into_iter();

    let dependent: String = match iter.next() {
        Some(Token::Ident(id)) => id,
        _ => return Err(FormulaError("missing dependent variable")),
    };
    match iter.next() {
        Some(Token::Tilde) => {}
        _ => return Err(FormulaError("missing `~` separator")),
    }

    let mut independent: Vec<String> = Vec::new();
    let mut interactions: Vec<Vec<String>> = Vec::new();
    // identifiers of the `*`-run currently being read, if any
    let mut run: Vec<String> = Vec::new();

    let first: String = match iter.next() {
        Some(Token::Ident(id)) => id,
        _ => return Err(FormulaError("missing independent variable after `~`")),
    };
    independent.push(first);

    loop {
        let op: Token = match iter.next() {
            None => break,
            Some(t) => t,
        };
        let joins_run: bool = match op {
            Token::Plus => false,
            Token::Star => true,
            Token::Tilde => return Err(FormulaError("more than one `~` separator")),
            Token::Ident(_) => return Err(FormulaError("two terms without an operator")),
        };

        let term: String = match iter.next() {
            Some(Token::Ident(id)) => id,
            _ => return Err(FormulaError("dangling operator")),
        };

        if joins_run {
            if run.is_empty() {
                // the run starts at the previous term
                run.push(independent[independent.len() - 1].clone());
            }
            run.push(term.clone());
        } else if 2 <= run.len() {
            interactions.push(std::mem::take(&mut run));
        } else {
            run.clear();
        }
        independent.push(term);
    }

    if 2 <= run.len() {
        interactions.push(run);
    }

    return Ok(ParsedFormula {
        dependent,
        independent,
        interactions,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_independent_variable() {
        let f: ParsedFormula = parse("y ~ x").unwrap();
        assert_eq!(f.dependent, "y");
        assert_eq!(f.independent, vec!["x"]);
        assert!(f.interactions.is_empty());
    }

    #[test]
    fn additive_terms_keep_source_order() {
        let f: ParsedFormula = parse("d ~ a + b + c").unwrap();
        assert_eq!(f.dependent, "d");
        assert_eq!(f.independent, vec!["a", "b", "c"]);
        assert!(f.interactions.is_empty());
    }

    #[test]
    fn star_run_records_main_effects_and_one_tuple() {
        let f: ParsedFormula = parse("y ~ x*y*z").unwrap();
        assert_eq!(f.independent, vec!["x", "y", "z"]);
        assert_eq!(f.interactions, vec![vec!["x", "y", "z"]]);
    }

    #[test]
    fn mixed_plus_and_star() {
        let f: ParsedFormula = parse("y ~ a + b*c").unwrap();
        assert_eq!(f.independent, vec!["a", "b", "c"]);
        assert_eq!(f.interactions, vec![vec!["b", "c"]]);
    }

    #[test]
    fn disjoint_star_runs_become_separate_tuples() {
        let f: ParsedFormula = parse("y ~ a*b + c + d*e").unwrap();
        assert_eq!(f.independent, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(f.interactions, vec![vec!["a", "b"], vec!["d", "e"]]);
    }

    #[test]
    fn whitespace_is_irrelevant() {
        let tight: ParsedFormula = parse("y~a+b*c").unwrap();
        let loose: ParsedFormula = parse("  y  ~  a  +  b  *  c  ").unwrap();
        assert_eq!(tight, loose);
    }

    #[test]
    fn reparse_of_reserialized_formula_is_stable() {
        let f: ParsedFormula = parse("score ~ dose + group + site").unwrap();
        let rebuilt: String = format!("{} ~ {}", f.dependent, f.independent.join(" + "));
        let g: ParsedFormula = parse(&rebuilt).unwrap();
        assert_eq!(f.independent, g.independent);
        assert_eq!(f.dependent, g.dependent);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse("").is_err());
        assert!(parse("y~").is_err());
        assert!(parse("a + b").is_err()); // missing `~`
        assert!(parse("y ~ a +").is_err()); // dangling operator
        assert!(parse("y ~ + a").is_err());
        assert!(parse("y ~ a b").is_err()); // two terms, no operator
        assert!(parse("y ~ a ~ b").is_err());
        assert!(parse("y ~ a - b").is_err()); // unsupported operator
        assert!(parse("~x").is_err());
    }

    #[test]
    fn duplicates_are_preserved() {
        let f: ParsedFormula = parse("y ~ a + a").unwrap();
        assert_eq!(f.independent, vec!["a", "a"]);
    }

    #[test]
    fn arity_gate() {
        let one: ParsedFormula = parse("y ~ g").unwrap();
        assert_eq!(one.only_independent().unwrap(), "g");

        let two: ParsedFormula = parse("y ~ a + b").unwrap();
        assert_eq!(
            two.only_independent().unwrap_err(),
            TestError::Arity { found: 2 }
        );
    }
}
