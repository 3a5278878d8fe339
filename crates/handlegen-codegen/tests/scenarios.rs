//! End-to-end generation from header text and TOML tables.

use handlegen_build::{Tables, TypeMapping};
use handlegen_codegen::Generator;
use handlegen_common::SourceMap;
use handlegen_decl::TranslationUnit;
use handlegen_frontend_c::{parse_file, HeaderOptions};

const HEADER: &str = r#"
#ifndef FOO_H
#define FOO_H

typedef struct fooContext *fooHandle_t;
typedef struct barContext *barHandle_t;
typedef struct bazContext *bazHandle_t;
typedef struct quxContext *quxHandle_t;

typedef enum {
    FOO_STATUS_SUCCESS = 0,
    FOO_STATUS_FAILURE = 1,
} fooStatus_t;

typedef enum {
    FOO_FOO_BAR = 0,
    FOO_FOO_BAZ = 1,
} fooFoo_t;

fooStatus_t fooCreate(fooHandle_t *handle);
fooStatus_t fooDestroy(fooHandle_t handle);
fooStatus_t fooSetA(fooHandle_t handle, int a);
fooStatus_t fooReset(fooHandle_t handle);
fooStatus_t fooScale(fooHandle_t handle, const double *alpha, int n);

fooStatus_t barCreate(barHandle_t *bar);
fooStatus_t barDestroy(barHandle_t bar);
fooStatus_t barSetX(barHandle_t bar, int x);
fooStatus_t barSetY(barHandle_t bar, int y);

fooStatus_t bazCreate(bazHandle_t *baz);
fooStatus_t bazSet(bazHandle_t baz, double alpha, int n);

fooStatus_t quxCreate(quxHandle_t *qux);
fooStatus_t quxDestroy(quxHandle_t qux);
fooStatus_t quxSetScale(quxHandle_t qux, double scale);
fooStatus_t quxSetN(quxHandle_t qux, int n);

#endif
"#;

const TABLES: &str = r#"
status_type = "fooStatus_t"
prefix = "foo"

[enums]
fooFoo_t = "Foo"

[types]
int = "int"
fooHandle_t = { go = "Handle", wrapper = true }
barHandle_t = { go = "Bar", wrapper = true }
bazHandle_t = { go = "Baz", wrapper = true }

[setters]
fooHandle_t = ["fooSetA"]
barHandle_t = ["barSetX", "barSetY"]
bazHandle_t = ["bazSet"]

[creations]
fooHandle_t = ["fooCreate"]
barHandle_t = ["barCreate"]
bazHandle_t = ["bazCreate"]

[destructions]
fooHandle_t = ["fooDestroy"]
barHandle_t = ["barDestroy"]

[methods]
fooHandle_t = ["fooReset", "fooScale"]
"#;

fn parse() -> TranslationUnit {
    let mut map = SourceMap::new();
    let id = map.add_file("foo.h", HEADER.to_string());
    parse_file(map.get(id).unwrap(), &HeaderOptions::default()).expect("header parses")
}

fn tables() -> Tables {
    let tables: Tables = toml::from_str(TABLES).expect("tables parse");
    tables.validate().expect("tables are valid");
    tables
}

fn handle_code(generator: &Generator<'_>, tu: &TranslationUnit, go_type: &str) -> Option<String> {
    generator
        .handles(tu)
        .into_iter()
        .find(|h| h.go_type == go_type)
        .map(|h| h.code)
}

#[test]
fn test_enum_constants_strip_common_prefix() {
    let tu = parse();
    let tables = tables();
    let generator = Generator::new(&tables, "foo", "foo.h");

    let enums = generator.enums(&tu);
    assert!(enums.contains("type Foo int\n"));
    assert!(enums.contains("\tBar Foo = C.FOO_FOO_BAR\n"));
    assert!(enums.contains("\tBaz Foo = C.FOO_FOO_BAZ\n"));
    assert!(enums.contains("func (e Foo) c() C.fooFoo_t { return C.fooFoo_t(e) }"));
    // fooStatus_t has no entry in the enums table.
    assert!(!enums.contains("FOO_STATUS_SUCCESS"));
}

#[test]
fn test_single_setter_handle() {
    let tu = parse();
    let tables = tables();
    let generator = Generator::new(&tables, "foo", "foo.h");

    let code = handle_code(&generator, &tu, "Handle").expect("Handle is generated");
    let expected = "\
type Handle struct {
\tinternal C.fooHandle_t

\ta int
}

func NewHandle(a int) (retVal *Handle, err error) {
\tvar internal C.fooHandle_t
\tif err = result(C.fooCreate(&internal)); err != nil {
\t\treturn
\t}
\tif err = result(C.fooSetA(internal, C.int(a))); err != nil {
\t\treturn
\t}
\tretVal = &Handle{
\t\tinternal: internal,
\t\ta: a,
\t}
\truntime.SetFinalizer(retVal, destroyHandle)
\treturn
}

func (h *Handle) A() int { return h.a }

func destroyHandle(obj *Handle) {
\tC.fooDestroy(obj.internal)
}
";
    assert_eq!(code, expected);
}

#[test]
fn test_single_setter_constructor_calls_create_and_setter_once() {
    let tu = parse();
    let tables = tables();
    let generator = Generator::new(&tables, "foo", "foo.h");

    let code = handle_code(&generator, &tu, "Handle").unwrap();
    assert_eq!(code.matches("C.fooCreate(").count(), 1);
    assert_eq!(code.matches("C.fooSetA(").count(), 1);
    assert!(!code.contains("TODO"));
}

#[test]
fn test_multi_setter_handle_degrades_to_todo() {
    let tu = parse();
    let tables = tables();
    let generator = Generator::new(&tables, "foo", "foo.h");

    let code = handle_code(&generator, &tu, "Bar").expect("Bar is generated");
    assert!(code.contains("type Bar struct {"));
    assert!(code.contains("func NewBar(x int) (retVal *Bar, err error) {"));
    assert!(code.contains("// TODO: Bar is configured by more than one setter: barSetX, barSetY"));
    assert!(code.contains("// TODO: Getters for Bar"));
    assert!(code.contains("func destroyBar(obj *Bar) {\n\tC.barDestroy(obj.internal)\n}"));

    assert!(!code.contains("C.barCreate("));
    assert!(!code.contains("C.barSetX("));
    assert!(!code.contains("C.barSetY("));
    assert!(!code.contains("func (b *Bar)"));
}

#[test]
fn test_multi_setter_handle_keeps_unmapped_todo() {
    let tu = parse();
    let mut tables = tables();
    tables
        .types
        .insert("quxHandle_t".into(), TypeMapping::wrapper("Qux"));
    tables
        .setters
        .insert("quxHandle_t".into(), vec!["quxSetScale".into(), "quxSetN".into()]);
    tables
        .creations
        .insert("quxHandle_t".into(), vec!["quxCreate".into()]);
    tables
        .destructions
        .insert("quxHandle_t".into(), vec!["quxDestroy".into()]);
    let generator = Generator::new(&tables, "foo", "foo.h");

    let code = handle_code(&generator, &tu, "Qux").expect("Qux is generated");
    assert!(code.contains(
        r#"// TODO: "quxSetScale": Parameter 1 Skipped "scale" of double - unmapped type"#
    ));
    assert!(code.contains("// TODO: Qux is configured by more than one setter: quxSetScale, quxSetN"));
    assert!(code.contains("// TODO: Getters for Qux"));
    assert!(!code.contains("C.quxSetScale("));
}

#[test]
fn test_group_without_destroy_emits_nothing() {
    let tu = parse();
    let tables = tables();
    let generator = Generator::new(&tables, "foo", "foo.h");

    let handles = generator.handles(&tu);
    let names: Vec<_> = handles.iter().map(|h| h.go_type.as_str()).collect();
    assert_eq!(names, vec!["Handle", "Bar"]);
    assert!(handles.iter().all(|h| !h.code.contains("Baz")));
}

#[test]
fn test_unmapped_setter_parameter_leaves_todo() {
    let tu = parse();
    let mut tables = tables();
    tables
        .destructions
        .insert("bazHandle_t".into(), vec!["bazDestroy".into()]);
    let generator = Generator::new(&tables, "foo", "foo.h");

    let code = handle_code(&generator, &tu, "Baz").expect("Baz is generated");
    assert!(code.contains("func NewBaz(n int) (retVal *Baz, err error) {"));
    assert!(code.contains(
        r#"//TODO: "bazSet": Parameter 1 Skipped "alpha" of double - unmapped type"#
    ));
    assert!(code.contains("func (b *Baz) N() int { return b.n }"));
    assert!(!code.contains("C.bazSet("));

    // The other groups are unaffected.
    let handle = handle_code(&generator, &tu, "Handle").unwrap();
    assert!(!handle.contains("TODO"));
}

#[test]
fn test_method_stubs() {
    let tu = parse();
    let tables = tables();
    let generator = Generator::new(&tables, "foo", "foo.h");

    let methods = generator.methods(&tu);
    let expected = "\
func (h *Handle) Reset() (err error) {}

//TODO: \"fooScale\": Parameter 1 Skipped \"alpha\" of const double* - unmapped type
func (h *Handle) Scale(n int) (err error) {}

";
    assert_eq!(methods, expected);
}

#[test]
fn test_output_is_deterministic() {
    let tu = parse();
    let tables = tables();
    let generator = Generator::new(&tables, "foo", "foo.h");

    assert_eq!(generator.handles(&tu), generator.handles(&tu));
    assert_eq!(generator.methods(&tu), generator.methods(&tu));
}
