//! kiln's main application entry point.
//! Parses arguments, resolves the template and output directory, and hands
//! over to the generator.

use std::io::Read;
use std::path::{Path, PathBuf};

use kiln::{
    cli::{get_args, Args},
    error::{default_error_handler, Error, Result},
    generator::Generator,
    loader::load_template,
    logger::init_logger,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Ensures the output directory is safe to write to.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory exists and `force` is false
pub fn get_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// Reads pre-supplied answers from stdin. Empty input means no answers.
fn read_answers_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let buffer = buffer.trim();
    if buffer.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(buffer)
        .map_err(|e| Error::ConfigError(format!("Failed to parse answers as JSON: {e}")))
}

fn run(args: Args) -> Result<()> {
    let renderer = MiniJinjaRenderer::new()?;
    let prompt = DialoguerPrompter::new();

    let output_root = get_output_dir(&args.output_dir, args.force)?;
    let template = load_template(args.template)?;

    let answers =
        if args.stdin { read_answers_from_stdin()? } else { serde_json::Value::Null };

    let mut generator = Generator::new(&renderer, &prompt);
    if !answers.is_null() {
        generator = generator.with_answers(&answers);
    }
    let written = generator.generate(template.root(), &output_root)?;

    println!(
        "Project generation completed successfully in {} ({} files).",
        output_root.display(),
        written.len()
    );
    Ok(())
}
