//! User interaction for kiln.
//! The interpreter talks to the user only through [`Prompter`], so scripted
//! answers can stand in for a terminal.

use crate::error::{Error, Result};
use dialoguer::Input;

/// A question asked by a `QueryVar` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Variable the answer is stored under.
    pub name: String,
    pub prompt: String,
    /// Already expanded default answer.
    pub default: Option<String>,
}

pub trait Prompter {
    /// Asks a question and blocks until the user answers.
    fn ask(&self, query: &Query) -> Result<String>;

    /// Shows an informational message.
    fn inform(&self, message: &str);

    /// Shows why the last answer was rejected.
    fn reject(&self, reason: &str);

    /// Reports progress of a file operation.
    fn status(&self, message: &str) {
        println!("{message}");
    }
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, query: &Query) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(&query.prompt).allow_empty(true);
        if let Some(default) = &query.default {
            input = input.default(default.clone());
        }
        input.interact_text().map_err(|e| Error::PromptError(e.to_string()))
    }

    fn inform(&self, message: &str) {
        println!("{message}");
    }

    fn reject(&self, reason: &str) {
        eprintln!("{reason}");
    }
}
