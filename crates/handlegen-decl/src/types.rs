use smol_str::SmolStr;
use std::fmt;

/// A C type as written in a declaration.
///
/// Qualifiers other than `const` are dropped. An array in parameter position
/// decays to one pointer level, as it does in C.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CType {
    /// Base spelling without pointers, e.g. `int`, `unsigned long`, `struct foo`.
    pub base: SmolStr,
    /// Number of `*` levels.
    pub pointers: u8,
    pub is_const: bool,
}

impl CType {
    pub fn named(base: impl Into<SmolStr>) -> Self {
        Self {
            base: base.into(),
            pointers: 0,
            is_const: false,
        }
    }

    pub fn void() -> Self {
        Self::named("void")
    }

    pub fn pointer_to(mut self) -> Self {
        self.pointers += 1;
        self
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    /// The type one pointer level down, if this is a pointer.
    pub fn pointee(&self) -> Option<CType> {
        if self.pointers == 0 {
            return None;
        }
        Some(Self {
            base: self.base.clone(),
            pointers: self.pointers - 1,
            is_const: self.is_const,
        })
    }

    pub fn is_pointer(&self) -> bool {
        self.pointers > 0
    }

    pub fn is_void(&self) -> bool {
        self.pointers == 0 && self.base == "void"
    }

    /// Canonical spelling used as a type-map key: base plus one `*` per level, no `const`.
    pub fn spelling(&self) -> String {
        let mut s = self.base.to_string();
        for _ in 0..self.pointers {
            s.push('*');
        }
        s
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            f.write_str("const ")?;
        }
        f.write_str(&self.spelling())
    }
}
