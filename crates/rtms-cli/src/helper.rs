use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow::{self, Borrowed, Owned};

use crate::parser::COMMANDS;

/// rustyline helper: completes command words, then page ids after `go`.
#[derive(Clone)]
pub struct CliHelper {
    pages: Vec<String>,
}

impl CliHelper {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    fn candidates<'a>(&'a self, line: &str) -> (usize, Vec<&'a str>) {
        if let Some(rest) = line.strip_prefix("go ") {
            let start = line.len() - rest.len();
            let matches = self
                .pages
                .iter()
                .map(String::as_str)
                .filter(|page| page.starts_with(rest))
                .collect();
            return (start, matches);
        }
        if line.contains(' ') {
            return (0, Vec::new());
        }
        let matches = COMMANDS
            .iter()
            .copied()
            .filter(|command| command.starts_with(line))
            .collect();
        (0, matches)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_whitespace().next() {
            Some(word) if COMMANDS.contains(&word) && line.starts_with(word) => Owned(format!(
                "{}{}",
                word.bright_cyan(),
                &line[word.len()..]
            )),
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        let (start, matches) = self.candidates(line);
        let typed = &line[start..];
        matches
            .into_iter()
            .find(|word| word.len() > typed.len())
            .map(|word| word[typed.len()..].to_string())
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates() {
        let helper = CliHelper::new(vec!["dashboard".into(), "chapters".into(), "challenges".into()]);
        assert_eq!(helper.candidates("lo"), (0, vec!["login", "logout"]));
        assert_eq!(helper.candidates("go cha"), (3, vec!["chapters", "challenges"]));
        assert_eq!(helper.candidates("login kim"), (0, vec![]));
    }
}
