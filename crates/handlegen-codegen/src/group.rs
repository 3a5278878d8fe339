//! Grouping of C functions by the opaque handle they operate on.

use crate::names::receiver_name;
use crate::signature::GoParam;
use crate::translate::ReceiverSpec;
use crate::types::TypeMapper;
use handlegen_build::Tables;
use handlegen_decl::{filter, Decl, FnDecl, TranslationUnit};
use std::fmt;
use tracing::{debug, info, warn};

/// One handle type and the functions that manage it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverGroup {
    pub c_type: String,
    pub go_type: String,
    pub setters: Vec<String>,
    pub create: Option<String>,
    pub destroy: Option<String>,
}

impl ReceiverGroup {
    /// More than one setter means no single call defines the constructor.
    pub fn is_ambiguous(&self) -> bool {
        self.setters.len() > 1
    }
}

/// Why a group produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnmappedHandle,
    IgnoredSetter(String),
    SetterNotFound,
    NoCreateDestroy,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnmappedHandle => f.write_str("cannot generate: handle type is unmapped"),
            SkipReason::IgnoredSetter(name) => write!(f, "setter {name} is ignored"),
            SkipReason::SetterNotFound => f.write_str("no setter declaration found in the header"),
            SkipReason::NoCreateDestroy => f.write_str("no create/destroy"),
        }
    }
}

/// A group with everything needed to emit it.
#[derive(Debug, Clone)]
pub struct ResolvedGroup<'a> {
    pub group: ReceiverGroup,
    pub create: String,
    pub destroy: String,
    /// The setter whose parameters define the constructor and the struct fields.
    pub shape: &'a Decl,
    pub shape_fn: &'a FnDecl,
    /// Declaration of the create function, if the header has one.
    pub create_decl: Option<&'a Decl>,
}

/// Functions that become methods on one receiver.
#[derive(Debug, Clone)]
pub struct MethodGroup<'a> {
    pub receiver: ReceiverSpec,
    pub decls: Vec<&'a Decl>,
}

/// Applies the curated tables to a translation unit.
pub struct Resolver<'a> {
    tu: &'a TranslationUnit,
    tables: &'a Tables,
    mapper: TypeMapper<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(tu: &'a TranslationUnit, tables: &'a Tables) -> Self {
        Self {
            tu,
            tables,
            mapper: TypeMapper::new(tables),
        }
    }

    /// Handle groups as listed in the `setters` table. Unmapped handles get
    /// an empty Go type and are rejected by [`Resolver::resolve`].
    pub fn groups(&self) -> Vec<ReceiverGroup> {
        self.tables
            .setters
            .iter()
            .map(|(c_type, setters)| ReceiverGroup {
                c_type: c_type.clone(),
                go_type: self
                    .mapper
                    .lookup_name(c_type)
                    .map(|t| t.name)
                    .unwrap_or_default(),
                setters: setters.clone(),
                create: self.tables.creation_for(c_type).map(str::to_string),
                destroy: self.tables.destruction_for(c_type).map(str::to_string),
            })
            .collect()
    }

    pub fn resolve(&self, group: ReceiverGroup) -> Result<ResolvedGroup<'a>, SkipReason> {
        if group.go_type.is_empty() {
            return Err(SkipReason::UnmappedHandle);
        }
        if let Some(ignored) = group.setters.iter().find(|s| self.tables.is_ignored(s)) {
            return Err(SkipReason::IgnoredSetter(ignored.clone()));
        }

        let (shape, shape_fn) = self
            .tu
            .get(filter::functions_named_in(&group.setters))
            .into_iter()
            .find_map(|d| d.as_function().map(|f| (d, f)))
            .ok_or(SkipReason::SetterNotFound)?;

        let (Some(create), Some(destroy)) = (group.create.clone(), group.destroy.clone()) else {
            return Err(SkipReason::NoCreateDestroy);
        };

        let create_decl = self
            .tu
            .lookup(&create)
            .into_iter()
            .find(|d| d.as_function().is_some());
        if create_decl.is_none() {
            debug!(handle = %group.c_type, function = %create, "create function not declared in header");
        }

        Ok(ResolvedGroup {
            group,
            create,
            destroy,
            shape,
            shape_fn,
            create_decl,
        })
    }

    /// Resolve every group, logging and dropping the ones that cannot be emitted.
    pub fn resolve_all(&self) -> Vec<ResolvedGroup<'a>> {
        self.groups()
            .into_iter()
            .filter_map(|group| {
                let handle = group.c_type.clone();
                match self.resolve(group) {
                    Ok(resolved) => Some(resolved),
                    Err(reason) => {
                        warn!(handle = %handle, reason = %reason, "skipping handle group");
                        None
                    }
                }
            })
            .collect()
    }

    /// Receivers from the `methods` table, each with its listed functions in
    /// header order. Ignored functions are left out.
    pub fn method_plan(&self) -> Vec<MethodGroup<'a>> {
        let mut plan = Vec::new();
        for (c_type, names) in &self.tables.methods {
            for name in names {
                if !self.tu.contains(name) {
                    warn!(handle = %c_type, function = %name, reason = "lookup miss", "listed method not found");
                }
            }

            let Some(go) = self.mapper.lookup_name(c_type) else {
                warn!(handle = %c_type, reason = "unmapped type", "skipping receiver");
                continue;
            };

            let decls: Vec<&Decl> = self
                .tu
                .get(filter::functions_named_in(names))
                .into_iter()
                .filter(|d| !self.tables.is_ignored(&d.name))
                .collect();
            info!(receiver = %c_type, functions = decls.len(), "method receiver");

            plan.push(MethodGroup {
                receiver: ReceiverSpec {
                    c_type: c_type.clone(),
                    param: GoParam::new(receiver_name(&go.name), go.name.clone(), go.is_ptr()),
                },
                decls,
            });
        }
        plan
    }
}
