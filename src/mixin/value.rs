//! Dynamic call values and text sources.
//!
//! [`Value`] is the argument/result currency of registry dispatch, since the
//! caller of [`Element::invoke`](super::Element::invoke) does not know which
//! capability answers. [`TextSource`] is how capabilities accept text that may
//! be produced lazily (the seam where message lookup would plug in).

use std::fmt;
use std::rc::Rc;

use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A dynamically-typed value passed to and returned from dispatched methods.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Node(NodeId),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }

    /// `Str` becomes `Some`, everything else `None`.
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(id)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// TextSource
// ---------------------------------------------------------------------------

/// Text given either directly or as a producer evaluated at use time.
#[derive(Clone)]
pub enum TextSource {
    Text(String),
    Producer(Rc<dyn Fn() -> Option<String>>),
}

impl TextSource {
    /// Wrap a producer closure.
    pub fn producer(f: impl Fn() -> Option<String> + 'static) -> Self {
        TextSource::Producer(Rc::new(f))
    }

    /// Evaluate to the current text.
    pub fn resolve(&self) -> Option<String> {
        match self {
            TextSource::Text(s) => Some(s.clone()),
            TextSource::Producer(f) => f(),
        }
    }
}

impl fmt::Debug for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "Text({s:?})"),
            Self::Producer(_) => write!(f, "Producer(<fn>)"),
        }
    }
}

impl From<&str> for TextSource {
    fn from(s: &str) -> Self {
        TextSource::Text(s.to_owned())
    }
}

impl From<String> for TextSource {
    fn from(s: String) -> Self {
        TextSource::Text(s)
    }
}

/// Resolve an optional text source.
pub fn resolve_text(source: Option<&TextSource>) -> Option<String> {
    source.and_then(TextSource::resolve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Value::from("a"), Value::Str("a".into()));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(3usize).as_int(), Some(3));
        assert!(Value::from(None::<String>).is_null());
        assert_eq!(Value::from(Some("x")).as_str(), Some("x"));
    }

    #[test]
    fn accessors_reject_other_variants() {
        assert_eq!(Value::Int(1).as_str(), None);
        assert_eq!(Value::Null.as_bool(), None);
        assert_eq!(Value::Str("x".into()).as_node(), None);
        assert_eq!(Value::Bool(true).into_string(), None);
    }

    #[test]
    fn producer_is_evaluated_on_resolve() {
        let counter = Rc::new(std::cell::Cell::new(0));
        let c = counter.clone();
        let source = TextSource::producer(move || {
            c.set(c.get() + 1);
            Some(format!("call {}", c.get()))
        });
        assert_eq!(source.resolve().as_deref(), Some("call 1"));
        assert_eq!(source.resolve().as_deref(), Some("call 2"));
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn resolve_text_none() {
        assert_eq!(resolve_text(None), None);
        assert_eq!(resolve_text(Some(&"t".into())).as_deref(), Some("t"));
    }
}
