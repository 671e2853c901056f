#![allow(dead_code)]

use serde_json::Value;
use shellpipe::config::ShellOptions;

/// Builder for `ShellOptions` to simplify test setup.
pub struct OptionsBuilder {
    options: ShellOptions,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: ShellOptions::default(),
        }
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.options.cwd = Some(cwd.to_string());
        self
    }

    /// Disable shell interpretation: the line is spawned as a bare program.
    pub fn direct(mut self) -> Self {
        self.options.shell = false;
        self
    }

    pub fn quiet(mut self, val: bool) -> Self {
        self.options.quiet = val;
        self
    }

    pub fn verbose(mut self, val: bool) -> Self {
        self.options.verbose = val;
        self
    }

    pub fn ignore_errors(mut self, val: bool) -> Self {
        self.options.ignore_errors = val;
        self
    }

    pub fn error_message(mut self, message: &str) -> Self {
        self.options.error_message = message.to_string();
        self
    }

    pub fn stdout_prefix(mut self, prefix: &str) -> Self {
        self.options.stdout_prefix = Some(prefix.to_string());
        self
    }

    pub fn stderr_prefix(mut self, prefix: &str) -> Self {
        self.options.stderr_prefix = Some(prefix.to_string());
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.options.prefix = Some(prefix.to_string());
        self
    }

    pub fn template_value(mut self, key: &str, value: Value) -> Self {
        self.options.template_data.insert(key.to_string(), value);
        self
    }

    pub fn env_var(mut self, key: &str, value: &str) -> Self {
        self.options.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> ShellOptions {
        self.options
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
