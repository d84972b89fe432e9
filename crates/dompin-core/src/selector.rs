//! Selector value types and rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::escape::escape_ident;
use crate::parser::{parse, ParseError};

/// One step of a selector: either an id anchor or a tag with optional class
/// and positional constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compound {
    /// `#<id>`; the id is stored unescaped and escaped on render.
    Id(String),
    /// `<tag>` + `.<class>`* + `:nth-of-type(<nth>)`?; `nth` is 1-based.
    Part {
        tag: String,
        classes: Vec<String>,
        nth: Option<usize>,
    },
}

impl Compound {
    pub fn id(value: impl Into<String>) -> Self {
        Compound::Id(value.into())
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Compound::Part {
            tag: name.into(),
            classes: Vec::new(),
            nth: None,
        }
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compound::Id(id) => write!(f, "#{}", escape_ident(id)),
            Compound::Part { tag, classes, nth } => {
                write!(f, "{}", tag)?;
                for class in classes {
                    write!(f, ".{}", escape_ident(class))?;
                }
                if let Some(n) = nth {
                    write!(f, ":nth-of-type({})", n)?;
                }
                Ok(())
            }
        }
    }
}

/// A full selector: compounds outermost-first, joined by the child
/// combinator. The rendered form is standard CSS, usable by any conformant
/// query evaluator; that string is the wire contract consumers store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub compounds: Vec<Compound>,
}

impl Selector {
    pub fn new(compounds: Vec<Compound>) -> Self {
        Self { compounds }
    }

    pub fn single(compound: Compound) -> Self {
        Self {
            compounds: vec![compound],
        }
    }

    /// Number of compounds (path steps).
    pub fn depth(&self) -> usize {
        self.compounds.len()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.compounds.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{}", compound)?;
        }
        Ok(())
    }
}

impl FromStr for Selector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

// Selectors travel as their rendered string form (e.g. a monitor's
// `selector` field), so that is also their serde representation.
impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
