mod common;

use common::{read_file, write_file, ScriptedPrompter};
use kiln::error::Error;
use kiln::generator::Generator;
use kiln::instruction::{Action, Instruction};
use kiln::renderer::MiniJinjaRenderer;
use kiln::variables::Variables;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test_log::test]
fn test_process_templates_end_to_end() {
    let staging = TempDir::new().unwrap();
    write_file(staging.path(), "greeting.txt.ftl", "Hi ${name}");
    let output = TempDir::new().unwrap();
    let destination = output.path().join("ada");

    let expected = TempDir::new().unwrap();
    write_file(expected.path(), "greeting.txt", "Hi Ada");

    let renderer = MiniJinjaRenderer::new().unwrap();
    let prompt = ScriptedPrompter::default();
    let mut variables = Variables::new("ada");
    variables.set("name", "Ada");

    Generator::new(&renderer, &prompt)
        .execute(
            staging.path(),
            &[Instruction::new(Action::ProcessTemplates)],
            &mut variables,
            &destination,
        )
        .unwrap();

    assert!(!dir_diff::is_different(&destination, expected.path()).unwrap());
}

#[test]
fn test_move_end_to_end() {
    let staging = TempDir::new().unwrap();
    write_file(staging.path(), "src/main.rs", "main");
    write_file(staging.path(), "src/util/helpers.rs", "helpers");
    write_file(staging.path(), "Cargo.toml", "[package]");
    let output = TempDir::new().unwrap();
    let destination = output.path().join("moved");

    let expected = TempDir::new().unwrap();
    write_file(expected.path(), "lib/main.rs", "main");
    write_file(expected.path(), "lib/helpers.rs", "helpers");
    write_file(expected.path(), "Cargo.toml", "[package]");

    let renderer = MiniJinjaRenderer::new().unwrap();
    let prompt = ScriptedPrompter::default();
    let mut variables = Variables::new("moved");

    let instruction = Instruction::new(Action::Move {
        from: "src/**".to_string(),
        to: "lib".to_string(),
        description: None,
    });
    Generator::new(&renderer, &prompt)
        .execute(staging.path(), &[instruction], &mut variables, &destination)
        .unwrap();

    assert!(staging.path().join("src/util").is_dir());
    assert!(!dir_diff::is_different(&destination, expected.path()).unwrap());
}

const TEMPLATE_CONFIG: &str = r#"
name: kotlin-app
description: A small Kotlin application
instructions:
  - type: query_var
    name: projectTitle
    prompt: Project title
    default: "${ fileToTitle(projectFolder) }"
    validation: isNotEmpty
  - type: query_var
    name: groupId
    prompt: Group id
    default: "com.example.${ fileToPackage(projectFolder) }"
    validation: isPackage
  - type: query_var
    name: includeTests
    prompt: Include tests?
    default: "yes"
    validation: isYesNo
    transform: "${ yesNoToBool(value) }"
  - type: inform
    message: "Generating ${ projectTitle }"
  - type: process_templates
  - type: move
    from: "src/*.kt"
    to: "src/${ packageToPath(groupId) }"
    description: Moving sources into their package
  - type: group
    condition: "${ includeTests == 'false' }"
    instructions:
      - type: delete
        files: test
  - type: rename
    file: NOTES.md
    name: "${ projectFolder }.md"
"#;

fn kotlin_template() -> TempDir {
    let template = TempDir::new().unwrap();
    let root = template.path();
    write_file(root, "kiln.yaml", TEMPLATE_CONFIG);
    write_file(root, ".kilnignore", "*.log\n");
    write_file(root, "debug.log", "noise");
    write_file(root, "README.md.ftl", "# ${ projectTitle }\n");
    write_file(root, "src/Main.kt.ftl", "package ${ groupId }\n");
    write_file(root, "test/MainTest.kt", "class MainTest");
    write_file(root, "NOTES.md", "notes");
    write_file(root, ".github/workflows/ci.yml.ftl", "name: ${ projectTitle }\n");
    template
}

#[test_log::test]
fn test_generate_from_template_directory() {
    let template = kotlin_template();
    let output = TempDir::new().unwrap();
    let destination = output.path().join("my-app");

    let renderer = MiniJinjaRenderer::new().unwrap();
    let prompt = ScriptedPrompter::new(&["My App", "com.example.myapp", "no"]);

    let written =
        Generator::new(&renderer, &prompt).generate(template.path(), &destination).unwrap();

    assert_eq!(written.len(), 4);
    assert_eq!(read_file(&destination, "README.md"), "# My App\n");
    assert_eq!(read_file(&destination, ".github/workflows/ci.yml"), "name: My App\n");
    assert_eq!(
        read_file(&destination, "src/com/example/myapp/Main.kt"),
        "package com.example.myapp\n"
    );
    assert_eq!(read_file(&destination, "my-app.md"), "notes");
    assert!(!destination.join("test").exists());
    assert!(!destination.join("kiln.yaml").exists());
    assert!(!destination.join(".kilnignore").exists());
    assert!(!destination.join("debug.log").exists());

    let asked = prompt.asked.borrow();
    assert_eq!(asked[0].default.as_deref(), Some("My App"));
    assert_eq!(asked[1].default.as_deref(), Some("com.example.myapp"));
    assert_eq!(*prompt.messages.borrow(), vec!["Generating My App"]);

    assert!(template.path().join("README.md.ftl").exists());
    assert!(template.path().join("NOTES.md").exists());
}

#[test]
fn test_generate_with_supplied_answers() {
    let template = kotlin_template();
    let output = TempDir::new().unwrap();
    let destination = output.path().join("tool");

    let renderer = MiniJinjaRenderer::new().unwrap();
    let prompt = ScriptedPrompter::default();
    let answers = json!({
        "projectTitle": "Tool",
        "groupId": "org.tool",
        "includeTests": "yes"
    });

    Generator::new(&renderer, &prompt)
        .with_answers(&answers)
        .generate(template.path(), &destination)
        .unwrap();

    assert!(prompt.asked.borrow().is_empty());
    assert_eq!(read_file(&destination, "src/org/tool/Main.kt"), "package org.tool\n");
    assert_eq!(read_file(&destination, "test/MainTest.kt"), "class MainTest");
}

#[test]
fn test_failed_generation_writes_nothing() {
    let template = TempDir::new().unwrap();
    write_file(
        template.path(),
        "kiln.yml",
        "instructions:\n  - type: process_templates\n  - type: rename\n    file: missing.txt\n    name: found.txt\n",
    );
    write_file(template.path(), "a.txt.ftl", "${ projectFolder }");
    let output = TempDir::new().unwrap();
    let destination = output.path().join("broken");

    let renderer = MiniJinjaRenderer::new().unwrap();
    let prompt = ScriptedPrompter::default();
    let result = Generator::new(&renderer, &prompt).generate(template.path(), &destination);

    assert!(matches!(result, Err(Error::FileNotFound { .. })));
    assert!(!destination.exists());
    assert_eq!(fs::read_to_string(template.path().join("a.txt.ftl")).unwrap(), "${ projectFolder }");
}

#[test]
fn test_missing_configuration() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let renderer = MiniJinjaRenderer::new().unwrap();
    let prompt = ScriptedPrompter::default();
    let result = Generator::new(&renderer, &prompt).generate(template.path(), output.path());

    assert!(matches!(result, Err(Error::ConfigError(_))));
}
