use std::path::Path;

use serde_json::Value;

use crate::errors::LoadError;
use crate::record::CredentialRecord;

/// All records the dump holds for one category, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialCategory {
    pub name: String,
    pub records: Vec<CredentialRecord>,
}

/// A parsed credential export: categories and their records, in file order.
///
/// Loaded once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialDump {
    categories: Vec<CredentialCategory>,
}

impl CredentialDump {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&raw)
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_slice(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let top = match value {
            Value::Object(top) => top,
            other => {
                return Err(LoadError::NotAnObject {
                    found: json_kind(&other),
                });
            }
        };

        let mut categories = Vec::with_capacity(top.len());
        for (name, records) in top {
            let items = match records {
                Value::Array(items) => items,
                other => {
                    return Err(LoadError::CategoryNotArray {
                        category: name,
                        found: json_kind(&other),
                    });
                }
            };
            let mut parsed = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(fields) => parsed.push(CredentialRecord::new(fields)),
                    other => {
                        return Err(LoadError::RecordNotObject {
                            category: name,
                            index,
                            found: json_kind(&other),
                        });
                    }
                }
            }
            categories.push(CredentialCategory {
                name,
                records: parsed,
            });
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[CredentialCategory] {
        &self.categories
    }

    pub fn record_count(&self) -> usize {
        self.categories.iter().map(|c| c.records.len()).sum()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
