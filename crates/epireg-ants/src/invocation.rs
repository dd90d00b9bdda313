use serde::Serialize;

use crate::error::AntsError;

/// A fully rendered external command: program name plus its argument list.
///
/// Rendering never touches the filesystem. Spawning is done by [`crate::runner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Name of the program, resolved against the tool directory at run time.
    pub program: String,
    /// Arguments in the exact order they are passed to the program.
    pub args: Vec<String>,
}

impl Invocation {
    /// Creates an invocation with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Appends a flag followed by its value.
    pub fn flag(&mut self, flag: &str, value: impl Into<String>) -> &mut Self {
        self.args.push(flag.to_string());
        self.args.push(value.into());
        self
    }

    /// Returns the arguments that follow `flag`, one per occurrence.
    pub fn values_of(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|w| w[0] == flag)
            .map(|w| w[1].as_str())
            .collect()
    }

    /// Renders the invocation as a single shell command line.
    ///
    /// Tokens with whitespace or shell metacharacters are single quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serializes the invocation as pretty printed JSON.
    pub fn to_json(&self) -> Result<String, AntsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn shell_quote(token: &str) -> String {
    // brackets and commas are part of the ANTs grammar and safe unquoted
    let is_plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.,/:=+[]@%".contains(c));
    if is_plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}
