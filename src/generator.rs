//! Core generation orchestration.
//! Stages the template, runs its instruction script and publishes the result.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::config::get_config;
use crate::error::Result;
use crate::finalizer::finalize;
use crate::ignore::parse_kilnignore_file;
use crate::instruction::Instruction;
use crate::interpreter::Interpreter;
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::staging::Staging;
use crate::variables::Variables;

/// Name given to the project when the output path has no usable final
/// component.
const FALLBACK_PROJECT_FOLDER: &str = "project";

/// Returns the name of the folder the project is generated into.
pub fn project_folder_name(output_root: &Path) -> Result<String> {
    let absolute = std::path::absolute(output_root)?;
    Ok(absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_PROJECT_FOLDER.to_string()))
}

pub struct Generator<'a> {
    renderer: &'a dyn TemplateRenderer,
    prompt: &'a dyn Prompter,
    answers: Option<&'a serde_json::Value>,
}

impl<'a> Generator<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, prompt: &'a dyn Prompter) -> Self {
        Self { renderer, prompt, answers: None }
    }

    pub fn with_answers(mut self, answers: &'a serde_json::Value) -> Self {
        self.answers = Some(answers);
        self
    }

    /// Generates a project from the template at `template_root` into
    /// `output_root`. Returns the written files.
    pub fn generate(&self, template_root: &Path, output_root: &Path) -> Result<Vec<PathBuf>> {
        let config = get_config(template_root)?;
        if let Some(name) = &config.name {
            info!("Generating from template '{name}'.");
        }
        if let Some(description) = &config.description {
            debug!("{description}");
        }

        let ignored = parse_kilnignore_file(template_root)?;
        let staging = Staging::create(template_root, &ignored)?;
        let mut variables = Variables::new(project_folder_name(output_root)?);

        self.execute(staging.root(), &config.instructions, &mut variables, output_root)
    }

    /// Runs `instructions` against an already prepared staging tree and copies
    /// what remains of it into `output_root`.
    pub fn execute(
        &self,
        staging_root: &Path,
        instructions: &[Instruction],
        variables: &mut Variables,
        output_root: &Path,
    ) -> Result<Vec<PathBuf>> {
        let mut interpreter = Interpreter::new(self.renderer, self.prompt, staging_root);
        if let Some(answers) = self.answers {
            interpreter = interpreter.with_answers(answers);
        }
        interpreter.run(instructions, variables)?;

        self.prompt.status("Nearly finished. Populating final project");
        finalize(staging_root, output_root)
    }
}
