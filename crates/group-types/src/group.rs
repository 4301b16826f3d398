//! Group types produced by the packager.
//!
//! A `GroupData` is one unit of comparison (a conversation, a matched pair).
//! Each of its `Person` members carries a label and the texts attributed to
//! that member.

use serde::{Deserialize, Serialize};

/// A labeled member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Member label (segment number, segment id, or position in the group)
    pub label: String,

    /// Texts attributed to this member, in input order
    pub texts: Vec<String>,
}

impl Person {
    /// Create a new member
    pub fn new(label: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            label: label.into(),
            texts,
        }
    }

    /// Create a member holding a single text
    pub fn with_text(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(label, vec![text.into()])
    }
}

/// A group of people whose texts are compared against each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupData {
    /// Members in the order they were added
    #[serde(default)]
    pub people: Vec<Person>,
}

impl GroupData {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member
    pub fn add_person(&mut self, person: Person) {
        self.people.push(person);
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// True if the group has no members
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Member labels in order
    pub fn labels(&self) -> Vec<&str> {
        self.people.iter().map(|p| p.label.as_str()).collect()
    }

    /// Total number of texts across all members
    pub fn text_count(&self) -> usize {
        self.people.iter().map(|p| p.texts.len()).sum()
    }
}
