//! Template expansion for registry URLs and paths.
//!
//! Registry entries reference variables as `{{.NAME}}`; `${NAME}` is accepted
//! as well. Environment variable names are upper-cased and `(X86)` becomes
//! `_X86`, so `%ProgramFiles(x86)%` is reachable as `{{.PROGRAMFILES_X86}}`.

use crate::error::{JustInstallError, Result};
use std::collections::HashMap;

/// Variables available to a template.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    /// Snapshot of the process environment, normalized.
    pub fn from_env() -> Self {
        Self::from_env_pairs(std::env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))
    }

    /// Build from raw environment pairs, applying name normalization.
    pub fn from_env_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = HashMap::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            if key.is_empty() {
                continue;
            }
            values.insert(normalize_env_name(key), value.into());
        }

        let mut vars = Self { values };
        vars.normalize_program_files();
        vars
    }

    /// Add (or replace) a call-specific variable.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    // A 32-bit view of the environment reports the x86 directory as
    // ProgramFiles; derive the native one from ProgramFiles(x86).
    fn normalize_program_files(&mut self) {
        if let Some(x86) = self.values.get("PROGRAMFILES_X86")
            && let Some(native) = x86.strip_suffix(" (x86)")
        {
            let native = native.to_string();
            self.values.insert("PROGRAMFILES".to_string(), native);
        }
    }
}

/// Normalize an environment variable name into a template identifier.
pub fn normalize_env_name(name: &str) -> String {
    name.to_uppercase().replace("(X86)", "_X86")
}

/// Expand every variable reference in `template`.
pub fn expand(template: &str, vars: &Variables) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = match (rest.find("{{"), rest.find("${")) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        let Some(start) = next else {
            out.push_str(rest);
            return Ok(out);
        };

        out.push_str(&rest[..start]);
        let marker = &rest[start..];

        let (name, consumed) = if let Some(body) = marker.strip_prefix("{{") {
            let end = body
                .find("}}")
                .ok_or_else(|| template_error(template, "unterminated \"{{\""))?;
            let action = body[..end].trim();
            let name = action.strip_prefix('.').ok_or_else(|| {
                template_error(template, &format!("unsupported template action \"{}\"", action))
            })?;
            (name.trim(), 2 + end + 2)
        } else {
            let body = &marker[2..];
            let end = body
                .find('}')
                .ok_or_else(|| template_error(template, "unterminated \"${\""))?;
            (body[..end].trim(), 2 + end + 1)
        };

        if name.is_empty() {
            return Err(template_error(template, "empty variable name"));
        }

        let value = vars
            .get(name)
            .ok_or_else(|| template_error(template, &format!("undefined variable \"{}\"", name)))?;
        out.push_str(value);

        rest = &marker[consumed..];
    }
}

fn template_error(template: &str, reason: &str) -> JustInstallError {
    JustInstallError::TemplateError {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}
