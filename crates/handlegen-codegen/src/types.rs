//! C type → Go type mapping.

use handlegen_build::Tables;
use handlegen_decl::CType;

/// How a Go value is handed back to C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Generated wrapper struct: pass `x.internal`.
    Wrapper,
    /// Mapped enum: pass `x.c()`.
    Enum,
    /// Anything else: a cgo cast of the C spelling.
    Cast,
}

/// Result of a successful type lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoType {
    pub name: String,
    pub conversion: Conversion,
}

impl GoType {
    /// Wrapper structs are always passed by pointer.
    pub fn is_ptr(&self) -> bool {
        self.conversion == Conversion::Wrapper
    }
}

/// Direct table lookup from C type spelling to Go type.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    tables: &'a Tables,
}

impl<'a> TypeMapper<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    /// Look up a C type. `None` means unmapped; callers decide how to degrade.
    pub fn lookup(&self, ty: &CType) -> Option<GoType> {
        let spelling = ty.spelling();
        if let Some(mapping) = self.tables.types.get(&spelling) {
            let conversion = if mapping.wrapper {
                Conversion::Wrapper
            } else {
                Conversion::Cast
            };
            return Some(GoType {
                name: mapping.go.clone(),
                conversion,
            });
        }

        if ty.pointers == 0 {
            if let Some(go) = self.tables.enums.get(ty.base.as_str()) {
                return Some(GoType {
                    name: go.clone(),
                    conversion: Conversion::Enum,
                });
            }
        }
        None
    }

    /// Look up a bare C type name such as `fooHandle_t`.
    pub fn lookup_name(&self, c_name: &str) -> Option<GoType> {
        self.lookup(&CType::named(c_name))
    }

    /// Go type name of a C type, if mapped.
    pub fn go_name_of(&self, ty: &CType) -> Option<String> {
        self.lookup(ty).map(|t| t.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handlegen_build::TypeMapping;

    fn tables() -> Tables {
        let mut tables = Tables::default();
        tables.types.insert("int".into(), TypeMapping::plain("int"));
        tables.types.insert("float*".into(), TypeMapping::plain("[]float32"));
        tables.types.insert("fooHandle_t".into(), TypeMapping::wrapper("Foo"));
        tables.enums.insert("fooMode_t".into(), "Mode".into());
        tables
    }

    #[test]
    fn test_lookup_by_spelling() {
        let tables = tables();
        let mapper = TypeMapper::new(&tables);

        let int = mapper.lookup(&CType::named("int")).unwrap();
        assert_eq!(int.name, "int");
        assert_eq!(int.conversion, Conversion::Cast);

        let floats = mapper
            .lookup(&CType::named("float").with_const(true).pointer_to())
            .unwrap();
        assert_eq!(floats.name, "[]float32");

        let handle = mapper.lookup_name("fooHandle_t").unwrap();
        assert!(handle.is_ptr());
    }

    #[test]
    fn test_enum_fallback() {
        let tables = tables();
        let mapper = TypeMapper::new(&tables);

        let mode = mapper.lookup_name("fooMode_t").unwrap();
        assert_eq!(mode.conversion, Conversion::Enum);
        assert!(mapper.lookup(&CType::named("fooMode_t").pointer_to()).is_none());
    }

    #[test]
    fn test_miss_is_none() {
        let tables = tables();
        let mapper = TypeMapper::new(&tables);
        assert!(mapper.lookup(&CType::named("double")).is_none());
        assert!(mapper.go_name_of(&CType::named("int").pointer_to()).is_none());
    }
}
