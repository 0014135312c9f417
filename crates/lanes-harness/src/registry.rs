use crate::variant::Variant;
use lanes_check::Checker;
use std::collections::BTreeSet;

/// Body of one logical test. Failures go through the checker it is given.
pub type TestFn = fn(&mut Checker);

/// What a runner needs to execute and report one test under one variant.
#[derive(Debug, Clone)]
pub struct TestEntry {
    pub symbol: String,
    pub name: String,
    pub func: TestFn,
}

impl TestEntry {
    #[must_use]
    pub fn new(variant: Variant, logical_name: &str, func: TestFn) -> Self {
        Self {
            symbol: variant.symbol(logical_name),
            name: variant.display_name(logical_name),
            func,
        }
    }

    /// Name as a runner lists it: the display name under a leading `/`.
    #[must_use]
    pub fn runner_path(&self) -> String {
        format!("/{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateTest(String),
    InvalidName(String),
}

impl RegistryError {
    #[must_use]
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::DuplicateTest(_) => "registry_duplicate_test",
            Self::InvalidName(_) => "registry_invalid_name",
        }
    }
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTest(name) => write!(f, "test {name} is already registered"),
            Self::InvalidName(name) => {
                write!(f, "test name {name:?} is not a valid identifier")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Flat list of tests registered for one variant.
#[derive(Debug, Clone)]
pub struct TestRegistry {
    variant: Variant,
    entries: Vec<TestEntry>,
    names: BTreeSet<String>,
}

impl TestRegistry {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            entries: Vec::new(),
            names: BTreeSet::new(),
        }
    }

    /// Registry for the variant this build was compiled as.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Variant::current())
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Registers `func` under `logical_name`.
    ///
    /// The name must be usable as a symbol, since the registration symbol is
    /// derived from it.
    pub fn register(&mut self, logical_name: &str, func: TestFn) -> Result<&mut Self, RegistryError> {
        if !is_identifier(logical_name) {
            return Err(RegistryError::InvalidName(logical_name.to_string()));
        }
        if !self.names.insert(logical_name.to_string()) {
            return Err(RegistryError::DuplicateTest(logical_name.to_string()));
        }
        self.entries
            .push(TestEntry::new(self.variant, logical_name, func));
        Ok(self)
    }

    #[must_use]
    pub fn entries(&self) -> &[TestEntry] {
        &self.entries
    }

    #[must_use]
    pub fn find(&self, symbol: &str) -> Option<&TestEntry> {
        self.entries.iter().find(|entry| entry.symbol == symbol)
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<TestEntry> {
        self.entries
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::{RegistryError, TestEntry, TestRegistry};
    use crate::variant::{AccelPath, Binding, Variant};
    use lanes_check::Checker;

    fn noop(_: &mut Checker) {}

    #[test]
    fn entries_carry_symbol_name_and_function() {
        let mut registry = TestRegistry::new(Variant::new(AccelPath::Native, Binding::C));
        registry
            .register("add", noop)
            .and_then(|r| r.register("sub", noop))
            .expect("register");
        let entries = registry.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].symbol, "add_native_c");
        assert_eq!(entries[0].name, "add/native/c");
        assert_eq!(entries[1].runner_path(), "/sub/native/c");
        assert!(registry.find("sub_native_c").is_some());
        assert!(registry.find("sub_emul_c").is_none());
    }

    #[test]
    fn duplicate_and_invalid_names_are_rejected() {
        let mut registry = TestRegistry::new(Variant::new(AccelPath::Emulated, Binding::Cpp));
        registry.register("mul", noop).expect("first registration");
        let err = registry.register("mul", noop).expect_err("duplicate");
        assert_eq!(err, RegistryError::DuplicateTest("mul".to_string()));
        assert_eq!(err.reason_code(), "registry_duplicate_test");

        let err = registry.register("2mul", noop).expect_err("invalid");
        assert_eq!(err.reason_code(), "registry_invalid_name");
        assert!(registry.register("with space", noop).is_err());
        assert_eq!(registry.entries().len(), 1);
    }

    #[test]
    fn same_logical_test_differs_only_by_variant() {
        let entries: Vec<TestEntry> = Variant::ALL
            .iter()
            .map(|variant| TestEntry::new(*variant, "abs", noop))
            .collect();
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                assert_ne!(a.symbol, b.symbol);
                assert_ne!(a.name, b.name);
            }
            assert!(a.name.starts_with("abs/"));
        }
    }
}
