//! Compiled templates and the instance renderer.

use super::parser::{Segment, parse};
use crate::error::TemplateError;
use serde_json::{Map, Value};
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    fmt,
};

/// A source of placeholder values for one render.
pub trait Lookup {
    /// Value for `name`, or `None` when the context has no such key.
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl Lookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl Lookup for HashMap<&str, &str> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(*v))
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl Lookup for Map<String, Value> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(value_text)
    }
}

/// Text form of a JSON field value.
///
/// Strings are emitted as-is, `null` as nothing, arrays as their elements
/// joined with `,`, and objects as compact JSON.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(items) => Cow::Owned(
            items
                .iter()
                .map(value_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// A compiled template: literals at even positions, placeholders at odd.
///
/// Immutable once compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            segments: parse(source)?,
        })
    }

    /// Flat view of the segments; odd indices are placeholder names.
    pub fn parts(&self) -> Vec<&str> {
        self.segments.iter().map(Segment::as_str).collect()
    }

    /// Placeholder names in order of occurrence, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Var(k) => Some(k.as_str()),
            Segment::Lit(_) => None,
        })
    }

    /// Placeholder names that `ctx` has no value for.
    pub fn missing<'a, C>(&'a self, ctx: &C) -> Vec<&'a str>
    where
        C: Lookup + ?Sized,
    {
        self.placeholders()
            .filter(|k| ctx.lookup(k).is_none())
            .collect()
    }

    /// Lazily yield one output fragment per segment.
    ///
    /// Placeholders absent from `ctx` yield an empty fragment.
    pub fn fragments<'a, C>(&'a self, ctx: &'a C) -> impl Iterator<Item = Cow<'a, str>>
    where
        C: Lookup + ?Sized,
    {
        self.segments.iter().map(move |seg| match seg {
            Segment::Lit(t) => Cow::Borrowed(t.as_str()),
            Segment::Var(k) => ctx.lookup(k).unwrap_or(Cow::Borrowed("")),
        })
    }

    /// Substitute every placeholder from `ctx` and concatenate the result.
    pub fn render<C>(&self, ctx: &C) -> String
    where
        C: Lookup + ?Sized,
    {
        let fragments: Vec<Cow<'_, str>> = self.fragments(ctx).collect();
        let capacity = fragments.iter().map(|f| f.len()).sum();

        let mut out = String::with_capacity(capacity);
        for fragment in &fragments {
            out.push_str(fragment);
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.segments {
            match seg {
                Segment::Lit(t) => f.write_str(t)?,
                Segment::Var(k) => write!(f, "${{{k}}}")?,
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}
