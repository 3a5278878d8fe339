//! Full generation runs against a temporary directory.

use handlegen_driver::{Driver, Section};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = r#"
#ifndef FOO_H
#define FOO_H

#define FOOAPI __attribute__((visibility("default")))

#if defined(__cplusplus)
extern "C" {
#endif

typedef struct fooContext *fooHandle_t;
typedef struct fooTensorStruct *fooTensor_t;

typedef enum {
    FOO_STATUS_SUCCESS = 0,
    FOO_STATUS_BAD_PARAM = 1,
} fooStatus_t;

typedef enum {
    FOO_DATA_FLOAT = 0,
    FOO_DATA_DOUBLE = 1,
    FOO_DATA_HALF = 2,
} fooDataType_t;

fooStatus_t FOOAPI fooCreate(fooHandle_t *handle);
fooStatus_t FOOAPI fooDestroy(fooHandle_t handle);

fooStatus_t FOOAPI fooCreateTensor(fooTensor_t *tensor);
fooStatus_t FOOAPI fooDestroyTensor(fooTensor_t tensor);
fooStatus_t FOOAPI fooSetTensor(fooTensor_t tensor, fooDataType_t dataType, int n, int c);

fooStatus_t FOOAPI fooSetStream(fooHandle_t handle, void *stream);
fooStatus_t FOOAPI fooGetTensorSize(fooHandle_t handle, fooTensor_t tensor, size_t *size);

#if defined(__cplusplus)
}
#endif

#endif
"#;

fn config(formatter: &str, split: bool) -> String {
    format!(
        r#"
[package]
name = "foo"
include = "foo.h"

[input]
headers = ["include/foo.h"]
strip_tokens = ["FOOAPI"]

[output]
dir = "gen"
split = {split}
formatter = [{formatter:?}]

[tables]
status_type = "fooStatus_t"
prefix = "foo"

[tables.enums]
fooDataType_t = "DataType"

[tables.types]
int = "int"
size_t = "uintptr"
"void*" = "unsafe.Pointer"
fooHandle_t = {{ go = "Handle", wrapper = true }}
fooTensor_t = {{ go = "Tensor", wrapper = true }}

[tables.setters]
fooTensor_t = ["fooSetTensor"]

[tables.creations]
fooTensor_t = ["fooCreateTensor"]

[tables.destructions]
fooTensor_t = ["fooDestroyTensor"]

[tables.methods]
fooHandle_t = ["fooSetStream", "fooGetTensorSize"]

[tables.return_params]
fooGetTensorSize = [2]
"#
    )
}

fn workspace(formatter: &str, split: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("include")).unwrap();
    fs::write(dir.path().join("include/foo.h"), HEADER).unwrap();
    fs::write(dir.path().join("handlegen.toml"), config(formatter, split)).unwrap();
    dir
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_generate_split_artifacts() {
    // `true` accepts any arguments and succeeds.
    let dir = workspace("true", true);
    let mut driver = Driver::from_config_file(dir.path().join("handlegen.toml")).unwrap();

    let written = driver.generate(&Section::ALL).unwrap();
    let gen = dir.path().join("gen");
    assert_eq!(
        written,
        vec![gen.join("enums.go"), gen.join("Tensor_gen.go"), gen.join("methods_gen.go")]
    );

    let enums = read(&gen.join("enums.go"));
    assert!(enums.starts_with("package foo\n\n/* Generated by handlegen. DO NOT EDIT */\n"));
    assert!(enums.contains("\tFloat DataType = C.FOO_DATA_FLOAT\n"));
    assert!(enums.contains("\tHalf DataType = C.FOO_DATA_HALF\n"));

    let tensor = read(&gen.join("Tensor_gen.go"));
    assert!(tensor.contains("// #include <foo.h>\nimport \"C\"\n"));
    assert!(tensor.contains("func NewTensor(dataType DataType, n int, c int) (retVal *Tensor, err error) {"));
    assert!(tensor.contains("C.fooSetTensor(internal, dataType.c(), C.int(n), C.int(c))"));
    assert!(tensor.contains("func (t *Tensor) DataType() DataType { return t.dataType }"));

    let methods = read(&gen.join("methods_gen.go"));
    assert!(methods.contains("func (h *Handle) SetStream(stream unsafe.Pointer) (err error) {}"));
    assert!(methods.contains("func (h *Handle) GetTensorSize(tensor *Tensor) (size uintptr, err error) {}"));
}

#[test]
fn test_generate_single_handles_file() {
    let dir = workspace("true", false);
    let mut driver = Driver::from_config_file(dir.path().join("handlegen.toml")).unwrap();

    let written = driver.generate(&[Section::Handles]).unwrap();
    assert_eq!(written, vec![dir.path().join("gen/handles_gen.go")]);
    assert!(read(&written[0]).contains("func destroyTensor(obj *Tensor) {"));
}

#[test]
fn test_output_dir_override() {
    let dir = workspace("true", true);
    let out = dir.path().join("elsewhere");
    let mut driver = Driver::from_config_file(dir.path().join("handlegen.toml"))
        .unwrap()
        .with_output_dir(&out);

    driver.generate(&[Section::Enums]).unwrap();
    assert!(out.join("enums.go").exists());
    assert!(!dir.path().join("gen").exists());
}

#[test]
fn test_formatter_failure_does_not_fail_the_run() {
    let dir = workspace("handlegen-formatter-that-does-not-exist", true);
    let mut driver = Driver::from_config_file(dir.path().join("handlegen.toml")).unwrap();

    let written = driver.generate(&Section::ALL).unwrap();
    assert!(written.iter().all(|p| p.exists()));
}

#[test]
fn test_regeneration_overwrites() {
    let dir = workspace("true", true);
    let enums = dir.path().join("gen/enums.go");
    fs::create_dir_all(enums.parent().unwrap()).unwrap();
    fs::write(&enums, "stale").unwrap();

    let mut driver = Driver::from_config_file(dir.path().join("handlegen.toml")).unwrap();
    driver.generate(&[Section::Enums]).unwrap();
    assert!(!read(&enums).contains("stale"));
}

#[test]
fn test_missing_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(Driver::from_config_file(dir.path().join("handlegen.toml")).is_err());
}
