use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationCheck {
    #[serde(default)]
    pub code: String,
    pub message: String,
    pub severity: Severity,
    #[serde(default)]
    pub path: String,
}

/// Fully-qualified identity of a validated mesh object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub object_type: String,
    pub name: String,
    pub namespace: String,
    pub cluster: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectValidation {
    pub name: String,
    pub object_type: String,
    pub namespace: String,
    pub cluster: String,
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default)]
    pub checks: Vec<ValidationCheck>,
}

fn default_valid() -> bool {
    true
}

impl ObjectValidation {
    pub fn key(&self) -> ObjectKey {
        ObjectKey {
            object_type: self.object_type.clone(),
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            cluster: self.cluster.clone(),
        }
    }
}

/// Issue counts for exactly one namespace.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default,
)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub errors: u32,
    pub warnings: u32,
    pub object_count: u32,
}

impl ValidationSummary {
    fn add_checks(&mut self, checks: &[ValidationCheck]) {
        for check in checks {
            match check.severity {
                Severity::Error => self.errors += 1,
                Severity::Warning => self.warnings += 1,
                Severity::Info => {}
            }
        }
    }
}

/// Namespace name to summary. Key order is not meaningful.
pub type ValidationSummaries = HashMap<String, ValidationSummary>;

/// Raw validation output for one cluster scope, keyed by object identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResults {
    entries: HashMap<ObjectKey, ObjectValidation>,
}

impl ValidationResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, validation: ObjectValidation) {
        self.entries.insert(validation.key(), validation);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts the objects of `namespace` and their error and warning checks.
    /// A namespace with no objects yields the zero summary.
    pub fn summarize(&self, namespace: &str) -> ValidationSummary {
        let mut summary = ValidationSummary::default();
        for (key, validation) in &self.entries {
            if key.namespace != namespace {
                continue;
            }
            summary.object_count += 1;
            summary.add_checks(&validation.checks);
        }
        summary
    }
}

impl FromIterator<ObjectValidation> for ValidationResults {
    fn from_iter<I: IntoIterator<Item = ObjectValidation>>(iter: I) -> Self {
        let mut results = Self::new();
        for validation in iter {
            results.insert(validation);
        }
        results
    }
}
