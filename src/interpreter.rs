//! The instruction interpreter.
//!
//! Walks the script depth-first, gating each instruction on its condition and
//! applying its effect to the variable environment or the staging tree. The
//! first error aborts the walk; effects applied before it are kept.

use log::debug;
use std::path::Path;

use crate::builtins::Builtin;
use crate::error::{Error, Result};
use crate::instruction::{Action, Instruction};
use crate::operations;
use crate::prompt::{Prompter, Query};
use crate::renderer::TemplateRenderer;
use crate::variables::{Variables, TRANSFORM_VALUE};

pub struct Interpreter<'a> {
    renderer: &'a dyn TemplateRenderer,
    prompt: &'a dyn Prompter,
    staging_root: &'a Path,
    answers: Option<&'a serde_json::Value>,
}

/// Returns the rejection reason, if any, a validator reports for `answer`.
fn rejection(validator: Option<Builtin>, answer: &str) -> Option<String> {
    let reason = validator?.call(answer);
    if reason.is_empty() {
        None
    } else {
        Some(reason)
    }
}

impl<'a> Interpreter<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        prompt: &'a dyn Prompter,
        staging_root: &'a Path,
    ) -> Self {
        Self { renderer, prompt, staging_root, answers: None }
    }

    /// Supplies answers up front. `QueryVar` instructions whose name appears
    /// in `answers` use that answer instead of asking.
    pub fn with_answers(mut self, answers: &'a serde_json::Value) -> Self {
        self.answers = Some(answers);
        self
    }

    /// Runs `instructions` in order against `variables`.
    pub fn run(&self, instructions: &[Instruction], variables: &mut Variables) -> Result<()> {
        for instruction in instructions {
            if let Some(condition) = &instruction.condition {
                if !self.renderer.is_true(condition, variables)? {
                    debug!(
                        "Skipping {} instruction, condition '{}' is not true.",
                        instruction.action.kind(),
                        condition
                    );
                    continue;
                }
            }
            debug!("Executing {} instruction.", instruction.action.kind());
            self.execute(&instruction.action, variables)?;
        }
        Ok(())
    }

    fn execute(&self, action: &Action, variables: &mut Variables) -> Result<()> {
        match action {
            Action::Group { instructions } => self.run(instructions, variables),
            Action::Inform { message } => {
                let message = self.renderer.render(message, variables)?;
                self.prompt.inform(&message);
                Ok(())
            }
            Action::QueryVar { name, prompt, default, validation, transform } => self.query_var(
                name,
                prompt,
                default.as_deref(),
                validation.as_deref(),
                transform.as_deref(),
                variables,
            ),
            Action::DefineVar { name, value } => {
                let value = self.renderer.render(value, variables)?;
                variables.set(name.as_str(), value);
                Ok(())
            }
            Action::ProcessTemplates => {
                self.prompt.status("Processing templates");
                let written =
                    operations::process_templates(self.renderer, self.staging_root, variables)?;
                debug!("Rendered {} template file(s).", written.len());
                Ok(())
            }
            Action::Move { from, to, description } => {
                let to = self.renderer.render(to, variables)?;
                self.prompt.status(
                    &description.clone().unwrap_or_else(|| format!("Moving \"{from}\" to \"{to}\"")),
                );
                let moved = operations::move_files(self.staging_root, from, &to)?;
                debug!("Moved {} file(s).", moved.len());
                Ok(())
            }
            Action::Rename { file, name, description } => {
                let name = self.renderer.render(name, variables)?;
                self.prompt.status(
                    &description
                        .clone()
                        .unwrap_or_else(|| format!("Renaming \"{file}\" to \"{name}\"")),
                );
                operations::rename_file(self.staging_root, file, &name)?;
                Ok(())
            }
            Action::Delete { files, description } => {
                self.prompt
                    .status(&description.clone().unwrap_or_else(|| format!("Deleting \"{files}\"")));
                let deleted = operations::delete_files(self.staging_root, files)?;
                debug!("Deleted {} path(s).", deleted.len());
                Ok(())
            }
        }
    }

    fn preloaded_answer(&self, name: &str) -> Option<String> {
        let value = self.answers?.get(name)?;
        Some(match value {
            serde_json::Value::String(answer) => answer.clone(),
            other => other.to_string(),
        })
    }

    fn query_var(
        &self,
        name: &str,
        prompt: &str,
        default: Option<&str>,
        validation: Option<&str>,
        transform: Option<&str>,
        variables: &mut Variables,
    ) -> Result<()> {
        let default = default.map(|default| self.renderer.render(default, variables)).transpose()?;
        let validator = match validation {
            Some(validation) => Some(
                variables
                    .validator(validation)
                    .ok_or_else(|| Error::UnknownValidator { name: validation.to_string() })?,
            ),
            None => None,
        };

        let answer = match self.preloaded_answer(name) {
            Some(answer) => {
                if let Some(reason) = rejection(validator, &answer) {
                    return Err(Error::ValidationError(format!(
                        "answer '{answer}' for '{name}' was rejected: {reason}"
                    )));
                }
                debug!("Using supplied answer for '{name}'.");
                answer
            }
            None => {
                let query =
                    Query { name: name.to_string(), prompt: prompt.to_string(), default };
                loop {
                    let candidate = self.prompt.ask(&query)?;
                    match rejection(validator, &candidate) {
                        Some(reason) => self.prompt.reject(&reason),
                        None => break candidate,
                    }
                }
            }
        };

        let value = match transform {
            Some(transform) => {
                self.renderer.render(transform, &variables.with(TRANSFORM_VALUE, answer))?
            }
            None => answer,
        };
        variables.set(name, value);
        Ok(())
    }
}
