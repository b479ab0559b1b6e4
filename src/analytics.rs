//! Analytics collaborators consumed by the event capability of a sink.
//!
//! The logging core only needs string renderings of events, parameters and
//! values, plus an emptiness check for bundles.

use std::{borrow::Cow, fmt};

/// Something that can act as an analytics name.
pub trait Eventable: fmt::Display {
    fn display_name(&self) -> &str;
}

/// An analytics event identifier.
pub trait Event: Eventable {}

/// A parameter name attached to an analytics event.
pub trait EventParameter: Eventable {}

/// Ordered `(parameter, value)` pairs of one event call.
pub type EventParams<'a> = &'a [(&'a dyn EventParameter, &'a dyn fmt::Display)];

/// Opaque structured bundle of event values.
pub trait Bundle: fmt::Display {
    fn is_empty(&self) -> bool;
}

/// Plain named event or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(Cow<'static, str>);

impl Label {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Eventable for Label {
    fn display_name(&self) -> &str {
        &self.0
    }
}

impl Event for Label {}
impl EventParameter for Label {}

/// Insertion-ordered key/value bundle.
///
/// Renders as `Bundle[{key=value, other=value}]`. Putting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundlify {
    entries: Vec<(String, String)>,
}

impl Bundlify {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`.
    #[must_use]
    pub fn put(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key.into(), value.to_string());
        self
    }

    /// Stores `value` under the rendering of `param`.
    #[must_use]
    pub fn put_param(self, param: &dyn EventParameter, value: impl fmt::Display) -> Self {
        self.put(param.to_string(), value)
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Bundlify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Bundle[{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}]")
    }
}

impl Bundle for Bundlify {
    fn is_empty(&self) -> bool {
        Bundlify::is_empty(self)
    }
}
