use std::fmt;

/// Which implementation of the kernels a build exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccelPath {
    /// Accelerated path using the target's native instructions.
    Native,
    /// Portable fallback path.
    Emulated,
}

impl AccelPath {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Emulated => "emul",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim() {
            "native" => Some(Self::Native),
            "emul" | "emulated" | "portable" => Some(Self::Emulated),
            _ => None,
        }
    }
}

/// Source-language binding the tests were compiled through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    C,
    Cpp,
}

impl Binding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim() {
            "c" => Some(Self::C),
            "cpp" | "c++" => Some(Self::Cpp),
            _ => None,
        }
    }
}

/// One of the four build configurations a logical test is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    pub path: AccelPath,
    pub binding: Binding,
}

impl Variant {
    pub const ALL: [Self; 4] = [
        Self::new(AccelPath::Native, Binding::C),
        Self::new(AccelPath::Emulated, Binding::C),
        Self::new(AccelPath::Native, Binding::Cpp),
        Self::new(AccelPath::Emulated, Binding::Cpp),
    ];

    #[must_use]
    pub const fn new(path: AccelPath, binding: Binding) -> Self {
        Self { path, binding }
    }

    /// The variant selected by this build's `emulated` and `binding-cpp`
    /// features.
    #[must_use]
    pub const fn current() -> Self {
        let path = if cfg!(feature = "emulated") {
            AccelPath::Emulated
        } else {
            AccelPath::Native
        };
        let binding = if cfg!(feature = "binding-cpp") {
            Binding::Cpp
        } else {
            Binding::C
        };
        Self::new(path, binding)
    }

    /// Accepts `emul/cpp`, `emul_cpp`, or `emul-cpp`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split(['/', '_', '-']);
        let path = AccelPath::from_wire(parts.next()?)?;
        let binding = Binding::from_wire(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(path, binding))
    }

    /// `native_c`, `emul_c`, `native_cpp`, or `emul_cpp`.
    #[must_use]
    pub fn suffix(self) -> String {
        format!("{}_{}", self.path.as_str(), self.binding.as_str())
    }

    /// `native/c`, `emul/c`, `native/cpp`, or `emul/cpp`.
    #[must_use]
    pub fn tag(self) -> String {
        format!("{}/{}", self.path.as_str(), self.binding.as_str())
    }

    /// Registration symbol: the logical name plus the variant suffix.
    #[must_use]
    pub fn symbol(self, name: &str) -> String {
        format!("{name}_{}", self.suffix())
    }

    /// Path-like display name, e.g. `add/emul/cpp`.
    #[must_use]
    pub fn display_name(self, name: &str) -> String {
        format!("{name}/{}", self.tag())
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.path.as_str(), self.binding.as_str())
    }
}

/// Symbols of the four per-variant suite getters for one suite.
#[must_use]
pub fn suite_symbols(name: &str) -> [String; 4] {
    Variant::ALL.map(|variant| variant.symbol(name))
}
