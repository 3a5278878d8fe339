use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use crate::item::Decl;

/// All declarations parsed from the headers of one run, in header order.
#[derive(Debug, Clone, Default)]
pub struct TranslationUnit {
    decls: Vec<Decl>,
    by_name: FxHashMap<SmolStr, Vec<usize>>,
}

impl TranslationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_decl(&mut self, decl: Decl) {
        self.by_name
            .entry(decl.name.clone())
            .or_default()
            .push(self.decls.len());
        self.decls.push(decl);
    }

    /// Append every declaration of `other`, keeping its order.
    pub fn extend(&mut self, other: TranslationUnit) {
        for decl in other.decls {
            self.add_decl(decl);
        }
    }

    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// All declarations whose identifier is exactly `name`.
    pub fn lookup(&self, name: &str) -> Vec<&Decl> {
        self.by_name
            .get(name)
            .map(|idx| idx.iter().map(|&i| &self.decls[i]).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Declarations matching `filter`, in header order.
    pub fn get(&self, filter: impl Fn(&Decl) -> bool) -> Vec<&Decl> {
        self.decls.iter().filter(|d| filter(d)).collect()
    }
}
