#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use kiln::error::{Error, Result};
use kiln::prompt::{Prompter, Query};

/// Prompter that answers from a fixed list and records everything it shows.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    pub asked: RefCell<Vec<Query>>,
    pub messages: RefCell<Vec<String>>,
    pub rejections: RefCell<Vec<String>>,
    pub statuses: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|answer| answer.to_string()).collect()),
            ..Default::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, query: &Query) -> Result<String> {
        self.asked.borrow_mut().push(query.clone());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::PromptError("no scripted answers left".to_string()))
    }

    fn inform(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn reject(&self, reason: &str) {
        self.rejections.borrow_mut().push(reason.to_string());
    }

    fn status(&self, message: &str) {
        self.statuses.borrow_mut().push(message.to_string());
    }
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

pub fn read_file(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}
