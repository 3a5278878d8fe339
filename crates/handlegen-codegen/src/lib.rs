//! Go (cgo) wrapper generation from the declaration model.
//!
//! ```text
//! TranslationUnit + Tables → Resolver → translate → emit → Go text
//! ```
//!
//! Nothing in this crate fails. Unmapped types, ambiguous handles and
//! lookup misses are logged through `tracing` and left as TODO comments in
//! the generated code.

pub mod names;
pub mod types;
pub mod signature;
pub mod translate;
pub mod group;
pub mod render;
pub mod emit;

pub use group::{MethodGroup, ReceiverGroup, ResolvedGroup, Resolver, SkipReason};
pub use signature::{Binding, GoParam, GoSignature, Unmapped};
pub use translate::{translate, ReceiverSpec, TranslateRequest};
pub use types::{Conversion, GoType, TypeMapper};

use emit::StatusChecks;
use handlegen_build::Tables;
use handlegen_decl::{filter, TranslationUnit};
use render::GoWriter;
use tracing::{debug, warn};

/// Generated code for one handle group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleOutput {
    pub go_type: String,
    pub code: String,
}

/// One generation pass over a translation unit.
pub struct Generator<'a> {
    tables: &'a Tables,
    package: String,
    include: String,
}

impl<'a> Generator<'a> {
    pub fn new(tables: &'a Tables, package: impl Into<String>, include: impl Into<String>) -> Self {
        Self {
            tables,
            package: package.into(),
            include: include.into(),
        }
    }

    /// Header that starts every artifact.
    pub fn preamble(&self) -> String {
        emit::preamble(&self.package, &self.include)
    }

    /// Enums listed in the `enums` table, in header order.
    pub fn enums(&self, tu: &TranslationUnit) -> String {
        let mut w = GoWriter::new();
        for decl in tu.get(filter::enums) {
            if self.tables.is_ignored(&decl.name) {
                debug!(name = %decl.name, "enum ignored");
                continue;
            }
            let Some(go_type) = self.tables.enums.get(decl.name.as_str()) else {
                warn!(name = %decl.name, reason = "unmapped type", "skipping enum");
                continue;
            };
            if let Some(e) = decl.as_enum() {
                emit::enum_decl(&mut w, go_type, &decl.name, e);
            }
        }
        w.finish()
    }

    /// Struct, constructor, getters and destructor per resolvable handle
    /// group, in `setters` table order.
    pub fn handles(&self, tu: &TranslationUnit) -> Vec<HandleOutput> {
        let mapper = TypeMapper::new(self.tables);
        let resolver = Resolver::new(tu, self.tables);

        resolver
            .resolve_all()
            .into_iter()
            .map(|resolved| {
                let group = &resolved.group;
                let request = TranslateRequest {
                    name: format!("New{}", group.go_type),
                    receiver: Some(ReceiverSpec {
                        c_type: group.c_type.clone(),
                        param: GoParam::new(names::receiver_name(&group.go_type), group.go_type.as_str(), true),
                    }),
                    leading_ret: Some(GoParam::new("retVal", group.go_type.as_str(), true)),
                    returns_err: true,
                };
                let mut ctor = translate(&resolved.shape.name, resolved.shape_fn, &request, &mapper, self.tables);
                // The create call can fail even when the setter cannot.
                if self.tables.status_type.is_some() && !ctor.returns_err() {
                    ctor.ret_vals.push(GoParam::new("err", "error", false));
                }
                // The receiver is the handle being built, not a caller argument.
                ctor.receiver = None;

                for unmapped in &ctor.unmapped {
                    warn!(handle = %group.c_type, function = %unmapped.function, reason = %unmapped, "unmapped type");
                }
                if group.is_ambiguous() {
                    warn!(handle = %group.c_type, reason = "more than one setter", "constructor left as TODO");
                }

                let checks = StatusChecks {
                    create: resolved
                        .create_decl
                        .and_then(|d| d.as_function())
                        .is_some_and(|f| self.tables.is_status(&f.ret_ty.spelling())),
                    setter: self.tables.is_status(&resolved.shape_fn.ret_ty.spelling()),
                };

                let mut w = GoWriter::new();
                emit::handle_group(&mut w, &resolved, &ctor, checks);
                HandleOutput {
                    go_type: group.go_type.clone(),
                    code: w.finish(),
                }
            })
            .collect()
    }

    /// Method stubs for every receiver in the `methods` table.
    pub fn methods(&self, tu: &TranslationUnit) -> String {
        let mapper = TypeMapper::new(self.tables);
        let resolver = Resolver::new(tu, self.tables);

        let mut w = GoWriter::new();
        for group in resolver.method_plan() {
            for decl in &group.decls {
                let Some(func) = decl.as_function() else {
                    continue;
                };
                let request = TranslateRequest {
                    name: names::method_name(&decl.name, self.tables),
                    receiver: Some(group.receiver.clone()),
                    leading_ret: None,
                    returns_err: true,
                };
                let mut sig = translate(&decl.name, func, &request, &mapper, self.tables);
                // Methods hang off the receiver even when no parameter matched it.
                if sig.receiver.is_none() {
                    sig.receiver = Some(group.receiver.param.clone());
                }
                for unmapped in &sig.unmapped {
                    warn!(handle = %group.receiver.c_type, function = %decl.name, reason = %unmapped, "unmapped type");
                }
                emit::method_stub(&mut w, &sig);
            }
        }
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handlegen_build::TypeMapping;
    use handlegen_common::SourceMap;
    use handlegen_frontend_c::{parse_file, HeaderOptions};

    const HEADER: &str = r#"
typedef struct fooContext *fooHandle_t;
typedef enum { FOO_STATUS_OK = 0, FOO_STATUS_FAIL = 1 } fooStatus_t;

fooStatus_t fooCreate(fooHandle_t *handle);
fooStatus_t fooDestroy(fooHandle_t handle);
fooStatus_t fooSetA(fooHandle_t handle, int a);
fooStatus_t fooReset(fooHandle_t handle);
"#;

    fn parse() -> TranslationUnit {
        let mut map = SourceMap::new();
        let id = map.add_file("foo.h", HEADER.to_string());
        parse_file(map.get(id).unwrap(), &HeaderOptions::default()).unwrap()
    }

    fn tables() -> Tables {
        let mut tables = Tables {
            status_type: Some("fooStatus_t".to_string()),
            prefix: Some("foo".to_string()),
            ..Tables::default()
        };
        tables.types.insert("int".into(), TypeMapping::plain("int"));
        tables.types.insert("fooHandle_t".into(), TypeMapping::wrapper("Foo"));
        tables.enums.insert("fooStatus_t".into(), "Status".into());
        tables.setters.insert("fooHandle_t".into(), vec!["fooSetA".into()]);
        tables.creations.insert("fooHandle_t".into(), vec!["fooCreate".into()]);
        tables.destructions.insert("fooHandle_t".into(), vec!["fooDestroy".into()]);
        tables.methods.insert("fooHandle_t".into(), vec!["fooReset".into()]);
        tables
    }

    #[test]
    fn test_generator_sections() {
        let tu = parse();
        let tables = tables();
        let generator = Generator::new(&tables, "foo", "foo.h");

        assert!(generator.preamble().starts_with("package foo\n"));

        let enums = generator.enums(&tu);
        assert!(enums.contains("\tOk Status = C.FOO_STATUS_OK\n"));

        let handles = generator.handles(&tu);
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].go_type, "Foo");
        assert!(handles[0].code.contains("func NewFoo(a int) (retVal *Foo, err error) {"));

        let methods = generator.methods(&tu);
        assert_eq!(methods, "func (f *Foo) Reset() (err error) {}\n\n");
    }

    #[test]
    fn test_ignored_enum_is_not_emitted() {
        let tu = parse();
        let mut tables = tables();
        tables.ignored.insert("fooStatus_t".into());
        let generator = Generator::new(&tables, "foo", "foo.h");
        assert!(generator.enums(&tu).is_empty());
    }
}
