//! Template expansion for kiln.
//! Renders text fragments and whole files against the variable environment
//! using MiniJinja with `${ ... }` variable delimiters.
use crate::error::Result;
use crate::variables::{Value, Variables};
use log::debug;
use minijinja::syntax::SyntaxConfig;
use minijinja::value::ValueKind;
use minijinja::{
    escape_formatter, AutoEscape, Environment, ErrorKind, Output, State, UndefinedBehavior,
};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Component, Path};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given variables.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the text is malformed or references an
    ///   undefined name or function.
    fn render(&self, template: &str, variables: &Variables) -> Result<String>;

    /// Renders the file at `relative_path` (relative to `root`). The file may
    /// include other files below `root`.
    fn render_file(&self, root: &Path, relative_path: &str, variables: &Variables)
        -> Result<String>;

    /// Evaluates a condition. Only an expansion equal to `"true"` passes.
    fn is_true(&self, condition: &str, variables: &Variables) -> Result<bool> {
        Ok(self.render(condition, variables)? == "true")
    }
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    syntax: SyntaxConfig,
}

impl MiniJinjaRenderer {
    /// Creates a renderer using `${`/`}` for variables, `{%`/`%}` for blocks
    /// and `{#`/`#}` for comments.
    pub fn new() -> Result<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters("{%", "%}")
            .variable_delimiters("${", "}")
            .comment_delimiters("{#", "#}")
            .build()?;
        Ok(Self { syntax })
    }

    fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_syntax(self.syntax.clone());
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_formatter(format_value);
        env
    }
}

/// Writes booleans as `true`/`false` so expression conditions can expand to
/// the literal `"true"`.
fn format_value(
    out: &mut Output,
    state: &State,
    value: &minijinja::Value,
) -> std::result::Result<(), minijinja::Error> {
    if value.kind() == ValueKind::Bool {
        out.write_str(if value.is_true() { "true" } else { "false" })?;
        Ok(())
    } else {
        escape_formatter(out, state, value)
    }
}

/// Loads an included template from below `root`. Hidden files and
/// directories are allowed; absolute names and `..` are not.
fn load_from_root(
    root: &Path,
    name: &str,
) -> std::result::Result<Option<String>, minijinja::Error> {
    let relative = Path::new(name);
    if !relative.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
        return Ok(None);
    }
    match fs::read_to_string(root.join(relative)) {
        Ok(source) => Ok(Some(source)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read template '{name}'"),
        )
        .with_source(err)),
    }
}

/// Converts the variable environment into a MiniJinja context. Builtins become
/// callable functions.
fn context(variables: &Variables) -> minijinja::Value {
    let map: BTreeMap<String, minijinja::Value> = variables
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Value::Text(text) => minijinja::Value::from(text.as_str()),
                Value::Builtin(builtin) => {
                    let builtin = *builtin;
                    minijinja::Value::from_function(move |arg: String| builtin.call(&arg))
                }
            };
            (name.to_string(), value)
        })
        .collect();
    minijinja::Value::from(map)
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, variables: &Variables) -> Result<String> {
        let env = self.environment();
        Ok(env.render_str(template, context(variables))?)
    }

    fn render_file(
        &self,
        root: &Path,
        relative_path: &str,
        variables: &Variables,
    ) -> Result<String> {
        debug!("Rendering template file '{relative_path}'.");
        let source = fs::read_to_string(root.join(relative_path))?;
        let mut env = self.environment();
        let root = root.to_path_buf();
        env.set_loader(move |name| load_from_root(&root, name));
        Ok(env.render_named_str(relative_path, &source, context(variables))?)
    }
}
