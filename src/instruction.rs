//! The instruction script driving a scaffolding run.

use serde::Deserialize;

/// One step of the script. The action only runs when `condition` is absent
/// or expands to exactly `"true"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Group {
        instructions: Vec<Instruction>,
    },
    Inform {
        message: String,
    },
    /// Asks for `name` until the validator named by `validation` accepts the
    /// answer. A `validation` naming no known validator fails the run with
    /// `Error::UnknownValidator` instead of accepting the answer unchecked.
    QueryVar {
        name: String,
        prompt: String,
        #[serde(default)]
        default: Option<String>,
        #[serde(default)]
        validation: Option<String>,
        #[serde(default)]
        transform: Option<String>,
    },
    DefineVar {
        name: String,
        value: String,
    },
    ProcessTemplates,
    Move {
        from: String,
        to: String,
        #[serde(default)]
        description: Option<String>,
    },
    Rename {
        file: String,
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
    Delete {
        files: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl Instruction {
    pub fn new(action: Action) -> Self {
        Self { condition: None, action }
    }

    pub fn when<S: Into<String>>(mut self, condition: S) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

impl Action {
    /// Short name used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Group { .. } => "group",
            Action::Inform { .. } => "inform",
            Action::QueryVar { .. } => "query_var",
            Action::DefineVar { .. } => "define_var",
            Action::ProcessTemplates => "process_templates",
            Action::Move { .. } => "move",
            Action::Rename { .. } => "rename",
            Action::Delete { .. } => "delete",
        }
    }
}
