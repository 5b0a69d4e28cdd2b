pub mod patch;

pub use patch::*;

pub use meshview_models::{
    Namespace, ObjectKey, ObjectValidation, Severity, ValidationCheck,
    ValidationResults, ValidationSummaries, ValidationSummary,
};
