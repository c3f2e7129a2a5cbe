//! Built-in validators and converters exposed to templates and scripts.
//!
//! The set is closed: scripts refer to these functions by name, both from
//! `QueryVar.validation` and from inside template expressions.

use cruet::Inflector;
use regex::Regex;
use std::sync::OnceLock;

/// Identifiers that cannot be used as a package segment.
const RESERVED_WORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw",
    "true", "try", "typealias", "typeof", "val", "var", "when", "while",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Validator,
    Converter,
}

/// A built-in callable, looked up by its script-facing name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    IsNotEmpty,
    IsPackage,
    IsYesNo,
    FileToTitle,
    FileToPackage,
    PackageToPath,
    YesNoToBool,
}

impl Builtin {
    pub const ALL: [Builtin; 7] = [
        Builtin::IsNotEmpty,
        Builtin::IsPackage,
        Builtin::IsYesNo,
        Builtin::FileToTitle,
        Builtin::FileToPackage,
        Builtin::PackageToPath,
        Builtin::YesNoToBool,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::IsNotEmpty => "isNotEmpty",
            Builtin::IsPackage => "isPackage",
            Builtin::IsYesNo => "isYesNo",
            Builtin::FileToTitle => "fileToTitle",
            Builtin::FileToPackage => "fileToPackage",
            Builtin::PackageToPath => "packageToPath",
            Builtin::YesNoToBool => "yesNoToBool",
        }
    }

    pub fn kind(self) -> BuiltinKind {
        match self {
            Builtin::IsNotEmpty | Builtin::IsPackage | Builtin::IsYesNo => BuiltinKind::Validator,
            _ => BuiltinKind::Converter,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    /// Invokes the builtin. Validators return an empty string on success and
    /// a human readable reason otherwise.
    pub fn call(self, value: &str) -> String {
        match self {
            Builtin::IsNotEmpty => is_not_empty(value),
            Builtin::IsPackage => is_package(value),
            Builtin::IsYesNo => is_yes_no(value),
            Builtin::FileToTitle => file_to_title(value),
            Builtin::FileToPackage => file_to_package(value),
            Builtin::PackageToPath => package_to_path(value),
            Builtin::YesNoToBool => yes_no_to_bool(value),
        }
    }
}

fn package_segment_regex() -> &'static Regex {
    static SEGMENT: OnceLock<Regex> = OnceLock::new();
    SEGMENT.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"))
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" => Some(true),
        "no" | "n" | "false" => Some(false),
        _ => None,
    }
}

pub fn is_not_empty(value: &str) -> String {
    if value.trim().is_empty() {
        "The value must not be empty".to_string()
    } else {
        String::new()
    }
}

pub fn is_package(value: &str) -> String {
    if value.is_empty() {
        return "The package name must not be empty".to_string();
    }
    for segment in value.split('.') {
        if segment.is_empty() {
            return format!("Package \"{value}\" contains an empty segment");
        }
        if !package_segment_regex().is_match(segment) {
            return format!(
                "Package segment \"{segment}\" must start with a letter or underscore and contain only letters, digits and underscores"
            );
        }
        if RESERVED_WORDS.contains(&segment) {
            return format!("Package segment \"{segment}\" is a reserved word");
        }
    }
    String::new()
}

pub fn is_yes_no(value: &str) -> String {
    match parse_yes_no(value) {
        Some(_) => String::new(),
        None => "Please answer yes or no".to_string(),
    }
}

pub fn file_to_title(value: &str) -> String {
    value.to_title_case()
}

pub fn file_to_package(value: &str) -> String {
    let package: String = value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();

    if package.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{package}")
    } else {
        package
    }
}

pub fn package_to_path(value: &str) -> String {
    value.replace('.', "/")
}

pub fn yes_no_to_bool(value: &str) -> String {
    parse_yes_no(value).unwrap_or(false).to_string()
}
