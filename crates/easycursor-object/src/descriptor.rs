//! Per-record-type field descriptors.
//!
//! Instead of enumerating members at runtime, a record type declares its
//! fields once: an ordered list of name plus extraction function. Names
//! may be given directly, or in the `getX`/`isX` accessor convention —
//! the prefix is stripped and the first character lower-cased, so
//! `"getName"` and `"name"` register the same field.

use easycursor_core::Value;

/// A row type usable with the object-collection backend.
pub trait Record: 'static {
    /// Declare this type's fields, in order.
    fn descriptor() -> FieldDescriptor<Self>
    where
        Self: Sized;
}

/// Ordered field registrations for one record type.
pub struct FieldDescriptor<T> {
    names: Vec<String>,
    extractors: Vec<fn(&T) -> Value>,
}

impl<T> FieldDescriptor<T> {
    /// Create an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            extractors: Vec::new(),
        }
    }

    /// Register a field. `accessor` may be a plain field name or an
    /// accessor-convention name (`getName`, `isActive`); either way the
    /// logical field name is the normalized form.
    #[must_use]
    pub fn field(mut self, accessor: &str, extract: fn(&T) -> Value) -> Self {
        self.names.push(field_name_from_accessor(accessor));
        self.extractors.push(extract);
        self
    }

    /// Logical field names in registration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check for an empty descriptor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<fn(&T) -> Value>) {
        (self.names, self.extractors)
    }
}

impl<T> Default for FieldDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

/// Normalize an accessor-convention name to its logical field name.
///
/// A `get` or `is` prefix followed by an upper-case letter is stripped
/// and the remainder's first character lower-cased; anything else passes
/// through unchanged.
#[must_use]
pub fn field_name_from_accessor(accessor: &str) -> String {
    let stripped = accessor
        .strip_prefix("get")
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
        .or_else(|| {
            accessor
                .strip_prefix("is")
                .filter(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
        })
        .unwrap_or(accessor);
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_prefixes_strip() {
        assert_eq!(field_name_from_accessor("getName"), "name");
        assert_eq!(field_name_from_accessor("isActive"), "active");
        assert_eq!(field_name_from_accessor("getAge"), "age");
    }

    #[test]
    fn test_plain_names_pass_through() {
        assert_eq!(field_name_from_accessor("name"), "name");
        // No upper-case follow-up: not the accessor convention.
        assert_eq!(field_name_from_accessor("getaway"), "getaway");
        assert_eq!(field_name_from_accessor("island"), "island");
    }

    #[test]
    fn test_bare_prefix_is_kept() {
        assert_eq!(field_name_from_accessor("get"), "get");
        assert_eq!(field_name_from_accessor("is"), "is");
    }

    #[test]
    fn test_registration_order_is_preserved() {
        struct Dummy;
        let descriptor: FieldDescriptor<Dummy> = FieldDescriptor::new()
            .field("getB", |_| Value::Null)
            .field("getA", |_| Value::Null);
        assert_eq!(descriptor.names(), &["b".to_string(), "a".to_string()]);
        assert_eq!(descriptor.len(), 2);
    }
}
