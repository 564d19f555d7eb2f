//! Domain identifier generation
//!
//! Canonical entities are keyed by `<plugin>:<Entity>:<connection id>:<key>...`,
//! e.g. `zentao:ZentaoProject:1:1`. The same inputs always produce the same id.

use crate::core::PlanError;
use std::fmt::Display;

const DELIMITER: char = ':';

/// Builds domain ids for one tool-layer entity type of one plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainIdGenerator {
    prefix: String,
}

impl DomainIdGenerator {
    /// Create a generator for `entity` records collected by `plugin`
    pub fn new(plugin: &str, entity: &str) -> Self {
        Self {
            prefix: format!("{}{}{}", escape(plugin), DELIMITER, escape(entity)),
        }
    }

    /// The source tag every generated id starts with
    pub fn source_tag(&self) -> &str {
        &self.prefix
    }

    /// Generate the id for a native key under a connection
    pub fn generate<I, K>(&self, connection_id: u64, keys: I) -> Result<String, PlanError>
    where
        I: IntoIterator<Item = K>,
        K: Display,
    {
        let mut id = format!("{}{}{}", self.prefix, DELIMITER, connection_id);
        let mut components = 0;
        for (position, key) in keys.into_iter().enumerate() {
            let key = key.to_string();
            if key.is_empty() {
                return Err(PlanError::ContractViolation(format!(
                    "{}: key component {} is empty",
                    self.prefix, position
                )));
            }
            id.push(DELIMITER);
            id.push_str(&escape(&key));
            components += 1;
        }

        if components == 0 {
            return Err(PlanError::ContractViolation(format!(
                "{}: at least one key component is required",
                self.prefix
            )));
        }
        Ok(id)
    }
}

/// Percent-escape the delimiter so a component can never split into two
fn escape(component: &str) -> String {
    if !component.contains(['%', DELIMITER]) {
        return component.to_string();
    }
    component.replace('%', "%25").replace(DELIMITER, "%3A")
}
