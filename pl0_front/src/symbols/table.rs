//! Symbol table with per-segment address allocation

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Bytes reserved per symbol in either segment
pub const ADDRESS_STEP: u32 = 2;

/// Value shown for symbols that have no literal value
pub const UNKNOWN_VALUE: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    ProgramName,
    Procedure,
    Constant,
    Variable,
    NumericLiteral,
}

impl SymbolKind {
    pub const fn label(self) -> &'static str {
        match self {
            SymbolKind::ProgramName => "$program name",
            SymbolKind::Procedure => "Procedure",
            SymbolKind::Constant => "Constvar",
            SymbolKind::Variable => "Var",
            SymbolKind::NumericLiteral => "Numeric literal",
        }
    }

    /// Program and procedure names live in code, everything else in data
    pub const fn segment(self) -> Segment {
        match self {
            SymbolKind::ProgramName | SymbolKind::Procedure => Segment::Code,
            SymbolKind::Constant | SymbolKind::Variable | SymbolKind::NumericLiteral => {
                Segment::Data
            }
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SymbolKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Code,
    Data,
}

impl Segment {
    pub const fn label(self) -> &'static str {
        match self {
            Segment::Code => "CS",
            Segment::Data => "DS",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    pub kind: SymbolKind,
    /// Literal text for constants and numbers, `?` otherwise
    pub value: String,
    pub address: u32,
    pub segment: Segment,
}

/// Append-only symbol store in first-registration order
#[derive(Debug, Clone, Default, Serialize)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
    next_data_address: u32,
    next_code_address: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` unless it is already present. Returns the new entry,
    /// or `None` when the name was taken; a taken name keeps its row and
    /// address unchanged.
    pub fn add(&mut self, name: &str, kind: SymbolKind, value: &str) -> Option<&SymbolEntry> {
        if self.by_name.contains_key(name) {
            return None;
        }

        let segment = kind.segment();
        let address = self.allocate(segment);
        let index = self.entries.len();

        self.entries.push(SymbolEntry {
            name: name.to_string(),
            kind,
            value: value.to_string(),
            address,
            segment,
        });
        self.by_name.insert(name.to_string(), index);

        self.entries.get(index)
    }

    fn allocate(&mut self, segment: Segment) -> u32 {
        let counter = match segment {
            Segment::Code => &mut self.next_code_address,
            Segment::Data => &mut self.next_data_address,
        };
        let address = *counter;
        *counter += ADDRESS_STEP;
        address
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.by_name.get(name).and_then(|&i| self.entries.get(i))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether a numeric-literal row already holds this text
    pub fn contains_literal(&self, text: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == SymbolKind::NumericLiteral && e.value == text)
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter()
    }

    pub fn in_segment(&self, segment: Segment) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter().filter(move |e| e.segment == segment)
    }

    pub fn count_of(&self, kind: SymbolKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_data_address(&self) -> u32 {
        self.next_data_address
    }

    pub fn next_code_address(&self) -> u32 {
        self.next_code_address
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a SymbolEntry;
    type IntoIter = std::slice::Iter<'a, SymbolEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_allocate_independently() {
        let mut table = SymbolTable::new();
        table.add("X", SymbolKind::ProgramName, UNKNOWN_VALUE);
        table.add("a", SymbolKind::Variable, UNKNOWN_VALUE);
        table.add("P", SymbolKind::Procedure, UNKNOWN_VALUE);
        table.add("b", SymbolKind::Variable, UNKNOWN_VALUE);

        let addresses: Vec<(&str, u32, Segment)> = table
            .iter()
            .map(|e| (e.name.as_str(), e.address, e.segment))
            .collect();
        assert_eq!(
            addresses,
            vec![
                ("X", 0, Segment::Code),
                ("a", 0, Segment::Data),
                ("P", 2, Segment::Code),
                ("b", 2, Segment::Data),
            ]
        );
        assert_eq!(table.next_code_address(), 4);
        assert_eq!(table.next_data_address(), 4);
    }

    #[test]
    fn test_duplicate_name_keeps_first_row() {
        let mut table = SymbolTable::new();
        assert!(table.add("x", SymbolKind::Variable, UNKNOWN_VALUE).is_some());
        assert!(table.add("x", SymbolKind::Constant, "3").is_none());

        assert_eq!(table.len(), 1);
        let x = table.lookup("x").unwrap();
        assert_eq!(x.kind, SymbolKind::Variable);
        assert_eq!(x.address, 0);
        assert_eq!(table.next_data_address(), 2);
    }

    #[test]
    fn test_literal_lookup_ignores_constants() {
        let mut table = SymbolTable::new();
        table.add("c", SymbolKind::Constant, "5");
        assert!(!table.contains_literal("5"));

        table.add("5", SymbolKind::NumericLiteral, "5");
        assert!(table.contains_literal("5"));
        assert_eq!(table.count_of(SymbolKind::NumericLiteral), 1);
    }

    #[test]
    fn test_labels() {
        assert_eq!(SymbolKind::ProgramName.label(), "$program name");
        assert_eq!(SymbolKind::Constant.to_string(), "Constvar");
        assert_eq!(Segment::Data.to_string(), "DS");
        assert_eq!(SymbolKind::Procedure.segment(), Segment::Code);
    }

    #[test]
    fn test_entry_serializes_labels() {
        let mut table = SymbolTable::new();
        table.add("c", SymbolKind::Constant, "5");
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["entries"][0]["kind"], "Constvar");
        assert_eq!(json["entries"][0]["segment"], "DS");
        assert_eq!(json["next_data_address"], 2);
    }
}
