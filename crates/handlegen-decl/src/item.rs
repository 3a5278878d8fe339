use handlegen_common::Span;
use smol_str::SmolStr;
use crate::types::CType;

/// A function parameter.
#[derive(Debug, Clone)]
pub struct Param {
    /// `None` for abstract declarators such as `int *`.
    pub name: Option<SmolStr>,
    pub ty: CType,
    pub span: Span,
}

/// A function declaration (prototype).
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub params: Vec<Param>,
    pub ret_ty: CType,
    pub is_variadic: bool,
}

/// A single named constant of an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerator {
    pub name: SmolStr,
    /// Position within the enumerator list.
    pub ordinal: usize,
    /// Initializer text, if one was written.
    pub value: Option<SmolStr>,
}

/// An enum declaration.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    /// True when the enum is named through a typedef; false for a bare `enum tag`.
    pub is_typedef: bool,
    pub enumerators: Vec<Enumerator>,
}

impl EnumDecl {
    pub fn enumerator_names(&self) -> Vec<&str> {
        self.enumerators.iter().map(|e| e.name.as_str()).collect()
    }
}

/// A typedef or record declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDecl {
    /// `typedef <ty> name;`
    Alias(CType),
    /// `struct name { ... };` or a forward declaration.
    Record { is_union: bool, has_body: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKindTag {
    Enum,
    Function,
    Type,
}

#[derive(Debug, Clone)]
pub enum DeclKind {
    Enum(EnumDecl),
    Function(FnDecl),
    Type(TypeDecl),
}

/// One parsed C entity.
#[derive(Debug, Clone)]
pub struct Decl {
    pub name: SmolStr,
    pub kind: DeclKind,
    pub span: Span,
}

impl Decl {
    pub fn new(name: impl Into<SmolStr>, kind: DeclKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            span,
        }
    }

    pub fn tag(&self) -> DeclKindTag {
        match self.kind {
            DeclKind::Enum(_) => DeclKindTag::Enum,
            DeclKind::Function(_) => DeclKindTag::Function,
            DeclKind::Type(_) => DeclKindTag::Type,
        }
    }

    pub fn as_function(&self) -> Option<&FnDecl> {
        match &self.kind {
            DeclKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDecl> {
        match &self.kind {
            DeclKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeDecl> {
        match &self.kind {
            DeclKind::Type(t) => Some(t),
            _ => None,
        }
    }
}
