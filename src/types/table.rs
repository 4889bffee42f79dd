//! Per-backend type tables

use indexmap::IndexMap;

/// Mapping from DSL type keywords to target type tokens.
///
/// Built once per backend and read-only afterwards. Names missing from
/// the table resolve to themselves, which is how user structure names
/// pass through.
#[derive(Debug, Clone)]
pub struct TypeTable {
    entries: IndexMap<&'static str, &'static str>,
    /// Value given to declared-but-unset variables
    no_value: &'static str,
    /// Parameter type for untyped sequences
    sequence: &'static str,
    /// Return annotation of procedures
    void: &'static str,
}

impl TypeTable {
    pub fn new(
        entries: &[(&'static str, &'static str)],
        no_value: &'static str,
        sequence: &'static str,
        void: &'static str,
    ) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
            no_value,
            sequence,
            void,
        }
    }

    /// Add a keyword (graphics backends register `image`)
    pub fn with(mut self, keyword: &'static str, target: &'static str) -> Self {
        self.entries.insert(keyword, target);
        self
    }

    /// Whether this keyword starts a variable declaration
    pub fn is_declared(&self, keyword: &str) -> bool {
        self.entries.contains_key(keyword)
    }

    /// Target token for a type name, or the name itself
    pub fn resolve<'a>(&self, name: &'a str) -> &'a str {
        match self.entries.get(name) {
            Some(target) => *target,
            None => name,
        }
    }

    pub fn no_value(&self) -> &'static str {
        self.no_value
    }

    pub fn sequence(&self) -> &'static str {
        self.sequence
    }

    pub fn void(&self) -> &'static str {
        self.void
    }

    /// Keyword/target pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TypeTable {
        TypeTable::new(&[("int", "int"), ("string", "str")], "None", "list", "None")
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let table = table();
        assert_eq!(table.resolve("string"), "str");
        assert_eq!(table.resolve("Flower"), "Flower");
        assert!(table.is_declared("int"));
        assert!(!table.is_declared("Flower"));
    }

    #[test]
    fn test_with_keeps_order() {
        let table = table().with("image", "Image");
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["int", "string", "image"]);
    }
}
