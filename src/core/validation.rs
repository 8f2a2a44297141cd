/// Represents an issue found while checking a payload before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A hard error: the payload cannot be rendered.
    Error(String),
    /// A warning: the payload will be rendered but may not look as intended.
    Warning(String),
}

/// The result of a validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.issues.push(ValidationIssue::Error(msg.into()));
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.issues.push(ValidationIssue::Warning(msg.into()));
    }

    pub fn is_safe(&self) -> bool {
        !self.issues.iter().any(|i| matches!(i, ValidationIssue::Error(_)))
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| matches!(i, ValidationIssue::Warning(_)))
    }

    /// Joins every error message, `None` when the result is safe.
    pub fn error_summary(&self) -> Option<String> {
        let errors: Vec<&str> = self
            .issues
            .iter()
            .filter_map(|i| match i {
                ValidationIssue::Error(msg) => Some(msg.as_str()),
                ValidationIssue::Warning(_) => None,
            })
            .collect();
        (!errors.is_empty()).then(|| errors.join("; "))
    }

    pub fn log_summary(&self, context: &str) {
        for issue in &self.issues {
            match issue {
                ValidationIssue::Error(msg) => log::error!("{context}: {msg}"),
                ValidationIssue::Warning(msg) => log::warn!("{context}: {msg}"),
            }
        }
    }
}
