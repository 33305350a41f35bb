use super::Rule;
use crate::finding::{Finding, Severity};
use crate::model::Component;

/// R-NAME: component name conforms to `^[a-z][a-z0-9-]*$`.
///
/// The parser already emits this same finding for names it rejects while
/// registering the component (so downstream rules still see it); this rule
/// re-derives the check so a component built some other way (tests, future
/// callers) is still covered.
pub struct RuleName;

impl Rule for RuleName {
    fn ident(&self) -> &'static str {
        "R-NAME"
    }

    fn check(&self, component: &Component) -> Vec<Finding> {
        let mut chars = component.name.chars();
        let valid = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if valid {
            return Vec::new();
        }

        vec![Finding::builder(self.ident(), "invalid_name")
            .severity(Severity::Error)
            .component(component.name.clone())
            .file(component.source_file.clone())
            .message(format!(
                "component name '{}' must match ^[a-z][a-z0-9-]*$",
                component.name
            ))
            .build()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentKind;
    use camino::Utf8PathBuf;

    fn component(name: &str) -> Component {
        Component {
            name: name.to_string(),
            kind: ComponentKind::State,
            driver: "state.redis".to_string(),
            version: "v1".to_string(),
            scopes: Vec::new(),
            metadata_entries: Vec::new(),
            auth_secret_store: None,
            source_file: Utf8PathBuf::from("c.yaml"),
        }
    }

    #[test]
    fn accepts_valid_name() {
        assert!(RuleName.check(&component("statestore-1")).is_empty());
    }

    #[test]
    fn rejects_uppercase() {
        assert_eq!(RuleName.check(&component("StateStore")).len(), 1);
    }
}
