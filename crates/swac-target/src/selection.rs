//! Extraction of the selected source name from a widget's inputs.

use serde::{Deserialize, Serialize};

/// Minimal description of a form input element.
///
/// Only the `name` attribute matters for source selection; for the
/// source chooser it carries the data source name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDescriptor {
    /// Value of the input's `name` attribute
    pub name: String,
}

impl InputDescriptor {
    /// Create a descriptor with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Return the name of the last input, or `None` if there are no inputs.
///
/// The last element wins even when several inputs are present; earlier
/// names are discarded without deduplication.
#[must_use]
pub fn extract_selected_source_name(inputs: &[InputDescriptor]) -> Option<String> {
    inputs.last().map(|input| input.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(names: &[&str]) -> Vec<InputDescriptor> {
        names.iter().copied().map(InputDescriptor::new).collect()
    }

    #[test]
    fn test_last_input_wins() {
        let selected = extract_selected_source_name(&inputs(&["a", "b", "c"]));
        assert_eq!(selected.as_deref(), Some("c"));
    }

    #[test]
    fn test_single_input() {
        let selected = extract_selected_source_name(&inputs(&["smartmonitoring"]));
        assert_eq!(selected.as_deref(), Some("smartmonitoring"));
    }

    #[test]
    fn test_no_inputs() {
        assert_eq!(extract_selected_source_name(&[]), None);
    }

    #[test]
    fn test_duplicates_are_not_collapsed() {
        let selected = extract_selected_source_name(&inputs(&["a", "a", "b", "a"]));
        assert_eq!(selected.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_name_is_returned_as_is() {
        let selected = extract_selected_source_name(&inputs(&["a", ""]));
        assert_eq!(selected.as_deref(), Some(""));
    }
}
