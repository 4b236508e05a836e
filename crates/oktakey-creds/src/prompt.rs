//! Interactive input collaborator.

use crate::error::PromptError;

/// Source of operator input.
pub trait Prompt {
    /// Ask for a value labelled `label`. Secret input must not be echoed.
    fn prompt(&self, label: &str, secret: bool) -> Result<String, PromptError>;
}

impl<F> Prompt for F
where
    F: Fn(&str, bool) -> Result<String, PromptError>,
{
    fn prompt(&self, label: &str, secret: bool) -> Result<String, PromptError> {
        self(label, secret)
    }
}
