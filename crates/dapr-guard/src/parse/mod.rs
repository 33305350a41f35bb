//! The Parser / Model Builder.
//!
//! Decodes a discovered candidate file's YAML into a typed
//! [`ParsedDocument`], using a two-step generic-then-tagged decode:
//! `serde_yaml::Value` first, then dispatch on `kind`/top-level shape into
//! the concrete model types in [`crate::model`].

mod app;
mod component;
mod configuration;

use camino::Utf8Path;
use serde_yaml::Value;

use crate::finding::{Finding, Severity};
use crate::model::{App, Component, ConfigurationResource};

/// The outcome of decoding one candidate file.
pub enum ParsedDocument {
    Component(Component),
    AppManifest(Vec<App>),
    Configuration(ConfigurationResource),
    /// Recognized shape, but not ours (some other `kind`/`apiVersion`); not
    /// an error.
    Unrecognized,
}

/// Reads and decodes a single candidate file.
///
/// Returns the parsed document (if any) plus findings accumulated along the
/// way. A YAML syntax error yields `(None, [warning])`, never a fatal error.
pub fn parse_file(path: &Utf8Path, is_app_manifest: bool) -> (Option<ParsedDocument>, Vec<Finding>) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            return (
                None,
                vec![Finding::builder("PARSE", "load_error")
                    .severity(Severity::Warning)
                    .file(path.to_path_buf())
                    .message(format!("could not read file: {err}"))
                    .build()],
            );
        }
    };

    let value: Value = match serde_yaml::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            return (
                None,
                vec![Finding::builder("PARSE", "yaml_syntax")
                    .severity(Severity::Warning)
                    .file(path.to_path_buf())
                    .message(format!("invalid YAML syntax: {err}"))
                    .build()],
            );
        }
    };

    if is_app_manifest {
        let (apps, findings) = app::parse_app_manifest(path, &value);
        return (Some(ParsedDocument::AppManifest(apps)), findings);
    }

    let Some(mapping) = value.as_mapping() else {
        return (Some(ParsedDocument::Unrecognized), Vec::new());
    };

    let kind = mapping
        .get(Value::from("kind"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    match kind {
        "Component" => {
            let (component, findings) = component::parse_component(path, &value);
            (component.map(ParsedDocument::Component), findings)
        }
        "Configuration" => {
            let (config, findings) = configuration::parse_configuration(path, &value);
            (config.map(ParsedDocument::Configuration), findings)
        }
        _ => (Some(ParsedDocument::Unrecognized), Vec::new()),
    }
}

/// Small helper shared by the submodules: fetches a string-valued key from
/// a mapping, tolerating absence.
pub(super) fn str_field<'a>(mapping: &'a serde_yaml::Mapping, key: &str) -> Option<&'a str> {
    mapping.get(Value::from(key)).and_then(Value::as_str)
}
