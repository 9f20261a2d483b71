//! Combined deployment descriptors and their sections.

use std::fs;
use std::path::Path;
use serde_yaml::{Mapping, Value};

use crate::descriptor::error::{DescriptorError, DescriptorResult};
use crate::messaging::error::value_kind;

/// A deployment descriptor: named top-level sections in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor {
    sections: Mapping,
}

impl Descriptor {
    /// Wrap an already-decoded section mapping.
    pub fn from_mapping(sections: Mapping) -> Self {
        Self { sections }
    }

    /// Decode a descriptor from YAML text. Blank text is an empty descriptor.
    pub fn parse(text: &str) -> DescriptorResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_yaml::from_str::<Value>(text)? {
            Value::Mapping(sections) => Ok(Self { sections }),
            Value::Null => Ok(Self::default()),
            other => Err(DescriptorError::NotAMapping(value_kind(&other))),
        }
    }

    /// Read and decode a descriptor file.
    pub fn load(path: &Path) -> DescriptorResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let descriptor = Self::parse(&text)?;
        tracing::debug!(path = ?path, sections = descriptor.sections.len(), "Descriptor loaded");
        Ok(descriptor)
    }

    /// The value of section `name`, if declared.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    /// The section `name` as a mapping, `None` when absent or null.
    pub fn section_mapping(&self, name: &str) -> DescriptorResult<Option<&Mapping>> {
        match self.section(name) {
            None => Ok(None),
            Some(value) => expect_mapping(name, value),
        }
    }

    /// Names of all string-keyed sections, in declaration order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().filter_map(Value::as_str)
    }

    /// Resolve a section, preferring a standalone `<name>.yml` in `config_dir`.
    ///
    /// A standalone file is returned as raw text so downstream parsers decode
    /// it themselves; otherwise the decoded section from this descriptor is
    /// returned.
    pub fn resolve_section(&self, config_dir: Option<&Path>, name: &str) -> DescriptorResult<Option<Value>> {
        match standalone_text(config_dir, name)? {
            Some(text) => Ok(Some(Value::String(text))),
            None => Ok(self.section(name).cloned()),
        }
    }

    /// Like [`resolve_section`](Self::resolve_section), but a standalone file
    /// is decoded too. Blank standalone files decode to null.
    pub fn resolve_decoded_section(&self, config_dir: Option<&Path>, name: &str) -> DescriptorResult<Option<Value>> {
        match standalone_text(config_dir, name)? {
            Some(text) if text.trim().is_empty() => Ok(Some(Value::Null)),
            Some(text) => Ok(Some(serde_yaml::from_str(&text)?)),
            None => Ok(self.section(name).cloned()),
        }
    }
}

fn standalone_text(config_dir: Option<&Path>, name: &str) -> DescriptorResult<Option<String>> {
    let Some(dir) = config_dir else {
        return Ok(None);
    };
    let path = dir.join(format!("{}.yml", name));
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path).map_err(|source| DescriptorError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(section = %name, path = ?path, "Using standalone section file");
    Ok(Some(text))
}

/// Borrow a section value as a mapping; null reads as absent.
pub(crate) fn expect_mapping<'a>(name: &str, value: &'a Value) -> DescriptorResult<Option<&'a Mapping>> {
    match value {
        Value::Null => Ok(None),
        Value::Mapping(m) => Ok(Some(m)),
        _ => Err(DescriptorError::InvalidValue {
            section: name.to_string(),
            key: String::new(),
            expected: "a mapping",
        }),
    }
}
