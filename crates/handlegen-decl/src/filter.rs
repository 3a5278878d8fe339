//! Predicates for [`TranslationUnit::get`](crate::TranslationUnit::get).

use crate::item::{Decl, DeclKindTag};

pub fn enums(decl: &Decl) -> bool {
    decl.tag() == DeclKindTag::Enum
}

pub fn functions(decl: &Decl) -> bool {
    decl.tag() == DeclKindTag::Function
}

pub fn types(decl: &Decl) -> bool {
    decl.tag() == DeclKindTag::Type
}

/// Matches declarations whose name is exactly one of `names`.
pub fn named_in<'a, S: AsRef<str>>(names: &'a [S]) -> impl Fn(&Decl) -> bool + 'a {
    move |decl| names.iter().any(|n| n.as_ref() == decl.name.as_str())
}

/// Matches functions whose name is exactly one of `names`.
pub fn functions_named_in<'a, S: AsRef<str>>(names: &'a [S]) -> impl Fn(&Decl) -> bool + 'a {
    let named = named_in(names);
    move |decl| functions(decl) && named(decl)
}
