//! Operator input
//!
//! Values missing from the environment are asked for on the terminal. The
//! [`Prompter`] trait keeps the merge flow independent from stdin so it can
//! run against canned answers.

use crate::error::{Error, Result};
use anstream::{print, println};
use dialoguer::Input;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Mutex;
use tracing::debug;

const SEPARATOR: &str = "--------------------------";

/// Source of operator answers
pub trait Prompter: Send + Sync {
    /// Ask for a free-form line. An empty answer is allowed.
    fn input(&self, description: &str) -> Result<String>;

    /// Ask the operator to pick one of `names` by zero-based index
    fn select(&self, label: &str, names: &[String]) -> Result<usize>;
}

/// Use `value` when present and non-empty, otherwise ask for it
pub fn resolve_value(
    prompter: &dyn Prompter,
    value: Option<String>,
    description: &str,
) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => prompter.input(description),
    }
}

/// Let the operator pick one of `items`
///
/// Fails with [`Error::NoCandidates`] when `items` is empty and with
/// [`Error::InvalidSelection`] when the chosen index is out of range.
pub fn select_from_list<T>(
    prompter: &dyn Prompter,
    label: &str,
    items: Vec<T>,
    name_of: impl Fn(&T) -> String,
) -> Result<T> {
    if items.is_empty() {
        return Err(Error::NoCandidates(label.to_string()));
    }

    let names: Vec<String> = items.iter().map(name_of).collect();
    let index = prompter.select(label, &names)?;
    debug!(label, index, "selected");

    let len = items.len();
    items
        .into_iter()
        .nth(index)
        .ok_or(Error::InvalidSelection { index, len })
}

/// Terminal prompter
///
/// Uses dialoguer on a terminal. When stdin is piped, answers are read one
/// line at a time so runs can be scripted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    fn read_answer(what: &str, allow_empty: bool) -> Result<String> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Input::<String>::new()
                .with_prompt(">")
                .allow_empty(allow_empty)
                .interact_text()
                .map_err(|e| Error::Prompt(format!("Failed to read {what}: {e}")));
        }

        print!("> ");
        io::stdout().flush()?;
        read_line_from(&mut stdin.lock(), what)
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, description: &str) -> Result<String> {
        println!("{SEPARATOR}");
        println!("Enter {description}:");
        Self::read_answer(description, true)
    }

    fn select(&self, label: &str, names: &[String]) -> Result<usize> {
        println!("{SEPARATOR}");
        println!("Select {label}:");
        for (index, name) in names.iter().enumerate() {
            println!(" [{index}] {name}");
        }

        let answer = Self::read_answer(&format!("{label} selection"), false)?;
        parse_index(label, &answer)
    }
}

/// Read one answer line, without its line ending
///
/// End of input is an error: a piped script ran out of answers.
fn read_line_from(reader: &mut impl BufRead, what: &str) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::Prompt(format!("Failed to read {what}: end of input")));
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn parse_index(label: &str, answer: &str) -> Result<usize> {
    answer.trim().parse().map_err(|_| Error::InvalidFormat {
        key: format!("{label} selection"),
        value: answer.to_string(),
    })
}

/// A prompt that was asked of a [`ScriptedPrompter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRecord {
    /// Free-form input with its description
    Input(String),
    /// Selection with its label and the listed names
    Select {
        /// What was being selected
        label: String,
        /// Candidates as displayed
        names: Vec<String>,
    },
}

/// Prompter answering from a fixed script, for tests and unattended runs
///
/// Answers are consumed in order. Selection answers are parsed as indexes.
/// Running out of answers is an error rather than a hang.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<PromptRecord>>,
}

impl ScriptedPrompter {
    /// Create a prompter that will give `answers` in order
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt issued so far
    pub fn asked(&self) -> Vec<PromptRecord> {
        self.asked
            .lock()
            .map(|asked| asked.clone())
            .unwrap_or_default()
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or_default()
    }

    fn record(&self, prompt: PromptRecord) {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(prompt);
        }
    }

    fn next_answer(&self, what: &str) -> Result<String> {
        self.answers
            .lock()
            .map_err(|_| Error::Internal("scripted answers lock poisoned".to_string()))?
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("no scripted answer for {what}")))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, description: &str) -> Result<String> {
        self.record(PromptRecord::Input(description.to_string()));
        self.next_answer(description)
    }

    fn select(&self, label: &str, names: &[String]) -> Result<usize> {
        self.record(PromptRecord::Select {
            label: label.to_string(),
            names: names.to_vec(),
        });
        let answer = self.next_answer(label)?;
        parse_index(label, &answer)
    }
}
