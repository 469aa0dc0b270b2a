//! Prefix autocompletion over the command registry.
//!
//! Two entry points: `suggest` implements the Tab behavior (complete in
//! place or offer a list), `live_suggestions` is the on-every-edit variant
//! that also lists all argument options while the remainder is still empty.

use crate::registry::{self, CommandSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    None,
    /// A single match; the input line should be replaced with this value.
    Complete(String),
    /// Several candidates, rendered as a non-committing suggestion block.
    List(Vec<String>),
}

fn option_match(input: &str) -> Option<(&'static CommandSpec, Vec<&'static str>)> {
    let cmd = registry::REGISTRY
        .iter()
        .find(|c| input.starts_with(c.name))?;
    if cmd.autocomplete.is_empty() {
        return None;
    }
    let typed = input[cmd.name.len()..].trim();
    let matched: Vec<&'static str> = cmd
        .autocomplete
        .iter()
        .filter(|opt| opt.starts_with(typed))
        .copied()
        .collect();
    Some((cmd, matched))
}

fn command_matches(input: &str) -> Vec<&'static CommandSpec> {
    registry::REGISTRY
        .iter()
        .filter(|c| c.name.starts_with(input))
        .collect()
}

fn describe(cmd: &CommandSpec) -> String {
    let usage = format!("{} {}", cmd.name, cmd.args_hint.unwrap_or(""));
    format!("{:<30} - {}", usage, cmd.description)
}

/// Tab completion for a partial input line.
pub fn suggest(partial: &str) -> Completion {
    let input = partial.trim().to_lowercase();

    if let Some((cmd, matched)) = option_match(&input) {
        return match matched.as_slice() {
            [] => Completion::None,
            [only] => Completion::Complete(format!("{} {}", cmd.name, only)),
            _ => Completion::List(
                matched
                    .iter()
                    .map(|opt| format!("{} {}", cmd.name, opt))
                    .collect(),
            ),
        };
    }

    let matches = command_matches(&input);
    match matches.as_slice() {
        [] => Completion::None,
        [only] => Completion::Complete(only.name.to_string()),
        _ => Completion::List(matches.iter().map(|c| describe(c)).collect()),
    }
}

/// Suggestions recomputed on every content change. Returns `None` when
/// nothing should be rendered.
pub fn live_suggestions(partial: &str) -> Option<Vec<String>> {
    let input = partial.trim().to_lowercase();

    if let Some((cmd, matched)) = option_match(&input) {
        if matched.is_empty() {
            return None;
        }
        return Some(
            matched
                .iter()
                .map(|opt| format!("{} {}", cmd.name, opt))
                .collect(),
        );
    }

    let matches = command_matches(&input);
    if matches.is_empty() {
        return None;
    }
    Some(matches.iter().map(|c| describe(c)).collect())
}
