//! Typed access to host-supplied keyword inputs.

use super::schema::{InputSpec, NodeDescriptor, ALL};
use crate::{Error, ErrorContext, Result};
use serde_json::{Map, Value};

/// Host keyword arguments, checked against the node's descriptor.
pub struct NodeInputs<'a> {
    values: &'a Map<String, Value>,
    descriptor: &'a NodeDescriptor,
}

impl<'a> NodeInputs<'a> {
    pub fn new(values: &'a Map<String, Value>, descriptor: &'a NodeDescriptor) -> Self {
        Self { values, descriptor }
    }

    fn invalid(&self, name: &str, msg: impl Into<String>) -> Error {
        Error::validation_with_context(
            msg,
            ErrorContext::new()
                .with_field_path(format!("inputs.{}", name))
                .with_source(self.descriptor.name),
        )
    }

    fn spec(&self, name: &str) -> Result<&'a InputSpec> {
        self.descriptor
            .input(name)
            .map(|f| &f.spec)
            .ok_or_else(|| self.invalid(name, "undeclared input"))
    }

    fn is_required(&self, name: &str) -> bool {
        self.descriptor.required.iter().any(|f| f.name == name)
    }

    fn raw(&self, name: &str) -> Result<Option<&'a Value>> {
        match self.values.get(name) {
            Some(Value::Null) | None if self.is_required(name) => {
                Err(self.invalid(name, format!("missing required input '{}'", name)))
            }
            Some(Value::Null) | None => Ok(None),
            Some(v) => Ok(Some(v)),
        }
    }

    /// String input. Blank strings are passed through; the node decides what blank means.
    pub fn string(&self, name: &str) -> Result<String> {
        let default = match self.spec(name)? {
            InputSpec::String { default, .. } => default,
            _ => return Err(self.invalid(name, "not a string input")),
        };
        match self.raw(name)? {
            None => Ok(default.clone()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.invalid(name, format!("expected a string, got {}", other))),
        }
    }

    /// Integer input, range-checked against the declared bounds.
    pub fn int(&self, name: &str) -> Result<u64> {
        let (default, min, max) = match self.spec(name)? {
            InputSpec::Int { default, min, max } => (*default, *min, *max),
            _ => return Err(self.invalid(name, "not an integer input")),
        };
        let value = match self.raw(name)? {
            None => default,
            Some(v) => v.as_u64().ok_or_else(|| {
                self.invalid(name, format!("expected a non-negative integer, got {}", v))
            })?,
        };
        if value < min || value > max {
            return Err(self.invalid(
                name,
                format!("{} is outside the range {}..={}", value, min, max),
            ));
        }
        Ok(value)
    }

    /// Choice input validated against the declared options.
    pub fn choice(&self, name: &str) -> Result<String> {
        let (options, default) = match self.spec(name)? {
            InputSpec::Choice { options, default } => (options, default),
            _ => return Err(self.invalid(name, "not a choice input")),
        };
        let value = match self.raw(name)? {
            None => return Ok(default.clone()),
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(self.invalid(name, format!("expected a string, got {}", other)))
            }
        };
        if !options.iter().any(|o| o == value) {
            return Err(self.invalid(
                name,
                format!("'{}' is not one of: {}", value, options.join(", ")),
            ));
        }
        Ok(value.clone())
    }

    /// Facet choice: `"all"` (or absent) becomes `None`, anything else goes through `parse`.
    pub fn facet<T>(&self, name: &str, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>> {
        let value = self.choice(name)?;
        if value == ALL {
            return Ok(None);
        }
        parse(&value)
            .map(Some)
            .ok_or_else(|| self.invalid(name, format!("unsupported value '{}'", value)))
    }
}
