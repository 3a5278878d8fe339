//! Header parsing through the public entry point.

use handlegen_common::SourceMap;
use handlegen_decl::{filter, CType, TypeDecl};
use handlegen_frontend_c::{parse_file, HeaderOptions};

fn options() -> HeaderOptions {
    HeaderOptions {
        strip_tokens: vec!["BARAPI".to_string(), "BAR_DEPRECATED".to_string()],
    }
}

#[test]
fn test_library_style_header() {
    let header = r#"
#pragma once
#include <stddef.h>
#define BAR_VERSION_MAJOR 7 \
    /* continued */

typedef void (*barCallback_t)(void *userData, int level);
typedef struct barRuntime *barHandle_t;
typedef unsigned long long barSize_t;

BAR_DEPRECATED int BARAPI barSetCallback(barHandle_t handle, barCallback_t cb, void *userData);
int BARAPI barQuery(barHandle_t handle, unsigned int flags, barSize_t *out);
"#;
    let mut map = SourceMap::new();
    let id = map.add_file("bar.h", header.to_string());
    let unit = parse_file(map.get(id).unwrap(), &options()).unwrap();

    let callback = unit.lookup("barCallback_t")[0];
    assert_eq!(callback.as_type(), Some(&TypeDecl::Alias(CType::void().pointer_to())));

    let size = unit.lookup("barSize_t")[0];
    assert_eq!(size.as_type(), Some(&TypeDecl::Alias(CType::named("unsigned long long"))));

    let query = unit.lookup("barQuery")[0].as_function().unwrap();
    let tys: Vec<_> = query.params.iter().map(|p| p.ty.spelling()).collect();
    assert_eq!(tys, vec!["barHandle_t", "unsigned int", "barSize_t*"]);

    let names: Vec<_> = unit.get(filter::functions).iter().map(|d| d.name.to_string()).collect();
    assert_eq!(names, vec!["barSetCallback", "barQuery"]);
}

#[test]
fn test_unstripped_macro_is_a_fatal_report() {
    let header = "int BARAPI barQuery(int flags);\n";
    let mut map = SourceMap::new();
    let id = map.add_file("bar.h", header.to_string());

    let report = parse_file(map.get(id).unwrap(), &HeaderOptions::default()).unwrap_err();
    assert!(report.to_string().contains("bar.h"));
}
