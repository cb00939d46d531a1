use crate::{compile::Path, Error};
use serde::Serialize;
use serde_json::{to_value, Map, Value};
use std::collections::HashMap;

/// Data that templates can be rendered against.
///
/// A template only ever asks for named properties, so anything that can
/// answer [`Properties::property`] can be used as data.
pub trait Properties {
    /// Return the value of the property with the given name, if any.
    fn property(&self, name: &str) -> Option<&Value>;

    /// Return true if this object is null.
    ///
    /// Rendering against null data is rejected.
    fn is_null(&self) -> bool {
        false
    }
}

impl Properties for Value {
    #[inline]
    fn property(&self, name: &str) -> Option<&Value> {
        self.as_object()?.get(name)
    }

    #[inline]
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

impl Properties for Map<String, Value> {
    #[inline]
    fn property(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Properties for Store {
    #[inline]
    fn property(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Walk the given [`Path`] through the given object.
///
/// Returns `None` when any segment is missing, when a segment is applied to
/// something that is not an object, or when the value found is null.
pub fn lookup<'a>(object: &'a dyn Properties, path: &Path) -> Option<&'a Value> {
    let (first, rest) = path.segments().split_first()?;

    let mut value = object.property(first)?;
    for segment in rest {
        value = value.property(segment)?;
    }

    (!value.is_null()).then_some(value)
}

/// Provides storage for data that templates can be rendered against.
#[derive(Debug, Default, Clone)]
pub struct Store {
    data: HashMap<String, Value>,
}

impl Store {
    /// Create a new Store.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Create a Store from the fields of a serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails, or if the value does
    /// not serialize to an object.
    pub fn from_serialize<T>(value: &T) -> Result<Self, Error>
    where
        T: Serialize + ?Sized,
    {
        match to_value(value)? {
            Value::Object(object) => Ok(Self {
                data: object.into_iter().collect(),
            }),
            other => Err(Error::usage(format!(
                "data must serialize to an object, found `{}`",
                other
            ))),
        }
    }

    /// Insert the value into the Store.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    pub fn insert<S, T>(&mut self, key: S, value: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        self.data.insert(key.into(), to_value(&value)?);

        Ok(())
    }

    /// Insert the value into the Store.
    ///
    /// # Panics
    ///
    /// Will panic if the serialization fails.
    #[inline]
    pub fn insert_must<S, T>(&mut self, key: S, value: T)
    where
        S: Into<String>,
        T: Serialize,
    {
        self.data
            .insert(key.into(), to_value(value).expect("value must be serializable"));
    }

    /// Insert the value into the Store.
    ///
    /// Returns the Store, so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    pub fn with<S, T>(mut self, key: S, value: T) -> Result<Self, Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Insert the value into the Store.
    ///
    /// Returns the Store, so additional methods may be chained.
    ///
    /// # Panics
    ///
    /// Will panic if the serialization fails.
    #[inline]
    pub fn with_must<S, T>(mut self, key: S, value: T) -> Self
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert_must(key, value);
        self
    }

    /// Get the value of the given key, if any.
    #[inline]
    pub fn get(&self, index: &str) -> Option<&Value> {
        self.data.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::{lookup, Properties};
    use crate::{compile::Path, Store};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Member {
        name: String,
        summary: Option<String>,
        parameters: Vec<String>,
    }

    #[test]
    fn test_insert() {
        let mut store = Store::new();
        store.insert_must("one", "two");

        assert!(store
            .get("one")
            .is_some_and(|t| t.as_str().unwrap() == "two"));
    }

    #[test]
    fn test_insert_fluent() {
        assert!(Store::new()
            .with_must("three", "four")
            .get("three")
            .is_some_and(|t| t.as_str().unwrap() == "four"))
    }

    #[test]
    fn test_from_serialize() {
        let member = Member {
            name: "Parse".to_string(),
            summary: None,
            parameters: vec!["text".to_string()],
        };
        let store = Store::from_serialize(&member).unwrap();

        assert_eq!(store.get("name"), Some(&json!("Parse")));
        assert_eq!(lookup(&store, &Path::parse("summary")), None);
        assert_eq!(store.get("parameters"), Some(&json!(["text"])));
    }

    #[test]
    fn test_from_serialize_rejects_non_object() {
        assert!(Store::from_serialize(&vec![1, 2]).unwrap_err().is_usage());
    }

    #[test]
    fn test_lookup_nested() {
        let data = json!({"member": {"type": {"name": "Int32"}}, "count": 3});

        assert_eq!(
            lookup(&data, &Path::parse("member.type.name")),
            Some(&json!("Int32"))
        );
        assert_eq!(lookup(&data, &Path::parse("member.kind")), None);
        assert_eq!(lookup(&data, &Path::parse("count.value")), None);
    }

    #[test]
    fn test_lookup_null_is_absent() {
        let data = json!({"summary": null});

        assert_eq!(lookup(&data, &Path::parse("summary")), None);
        assert!(!data.is_null());
        assert!(Properties::is_null(&json!(null)));
    }
}
