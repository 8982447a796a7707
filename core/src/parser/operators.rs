//! Operator precedence table.
//!
//! Groups are kept in registration order. The first group binds tightest and
//! every later group wraps the ones before it, so the last registered group
//! is the outermost level of an expression.

use crate::api::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Unary,
    Binary,
    TernaryOpen,
    TernaryClose,
}

/// One sign within a group being registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorEntry {
    pub sign: String,
    pub kind: OperatorKind,
}

impl OperatorEntry {
    pub fn unary(sign: impl Into<String>) -> Self {
        Self {
            sign: sign.into(),
            kind: OperatorKind::Unary,
        }
    }

    pub fn binary(sign: impl Into<String>) -> Self {
        Self {
            sign: sign.into(),
            kind: OperatorKind::Binary,
        }
    }

    pub fn ternary_open(sign: impl Into<String>) -> Self {
        Self {
            sign: sign.into(),
            kind: OperatorKind::TernaryOpen,
        }
    }

    pub fn ternary_close(sign: impl Into<String>) -> Self {
        Self {
            sign: sign.into(),
            kind: OperatorKind::TernaryClose,
        }
    }
}

/// A precedence level. All signs in a group share one arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecedenceGroup {
    Unary(Vec<String>),
    Binary(Vec<String>),
    Ternary { open: String, close: String },
}

impl PrecedenceGroup {
    /// Validates a raw list of entries and folds it into a group.
    ///
    /// Repeated signs are collapsed. A ternary group must hold exactly one
    /// open and one close sign.
    pub fn from_entries(entries: Vec<OperatorEntry>) -> Result<Self, ConfigError> {
        let Some(first) = entries.first() else {
            return Err(ConfigError::EmptyGroup);
        };
        let mixed = || ConfigError::MixedGroup {
            signs: entries.iter().map(|e| e.sign.clone()).collect(),
        };

        match first.kind {
            OperatorKind::Unary | OperatorKind::Binary => {
                let kind = first.kind;
                if entries.iter().any(|e| e.kind != kind) {
                    return Err(mixed());
                }
                let mut signs: Vec<String> = Vec::with_capacity(entries.len());
                for entry in &entries {
                    if !signs.contains(&entry.sign) {
                        signs.push(entry.sign.clone());
                    }
                }
                Ok(if kind == OperatorKind::Unary {
                    PrecedenceGroup::Unary(signs)
                } else {
                    PrecedenceGroup::Binary(signs)
                })
            }
            OperatorKind::TernaryOpen | OperatorKind::TernaryClose => {
                let open = entries
                    .iter()
                    .filter(|e| e.kind == OperatorKind::TernaryOpen)
                    .collect::<Vec<_>>();
                let close = entries
                    .iter()
                    .filter(|e| e.kind == OperatorKind::TernaryClose)
                    .collect::<Vec<_>>();
                match (open.as_slice(), close.as_slice()) {
                    ([open], [close]) if entries.len() == 2 && open.sign != close.sign => {
                        Ok(PrecedenceGroup::Ternary {
                            open: open.sign.clone(),
                            close: close.sign.clone(),
                        })
                    }
                    _ => Err(mixed()),
                }
            }
        }
    }

    pub fn signs(&self) -> Vec<&str> {
        match self {
            PrecedenceGroup::Unary(signs) | PrecedenceGroup::Binary(signs) => {
                signs.iter().map(String::as_str).collect()
            }
            PrecedenceGroup::Ternary { open, close } => vec![open.as_str(), close.as_str()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorTable {
    groups: Vec<PrecedenceGroup>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `entries` and appends them as the new outermost level.
    /// Returns the index of the new group.
    pub fn add_group(&mut self, entries: Vec<OperatorEntry>) -> Result<usize, ConfigError> {
        let group = PrecedenceGroup::from_entries(entries)?;
        Ok(self.push(group))
    }

    pub fn push(&mut self, group: PrecedenceGroup) -> usize {
        self.groups.push(group);
        self.groups.len() - 1
    }

    pub fn groups(&self) -> &[PrecedenceGroup] {
        &self.groups
    }

    pub fn get(&self, index: usize) -> Option<&PrecedenceGroup> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
