//! Go text building blocks: an indenting writer and cgo conversion expressions.

use crate::names::cgo_type;
use crate::signature::{Binding, GoParam, GoSignature};
use crate::types::Conversion;
use handlegen_decl::CType;

/// Append-only Go source buffer. Indents with tabs, as gofmt does.
#[derive(Debug, Default)]
pub struct GoWriter {
    output: String,
    indent: usize,
}

impl GoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writeln(&mut self, s: &str) {
        if !s.is_empty() {
            for _ in 0..self.indent {
                self.output.push('\t');
            }
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// `<header> {`, then indent.
    pub fn open(&mut self, header: &str) {
        self.writeln(&format!("{header} {{"));
        self.indent();
    }

    /// Dedent, then `}`.
    pub fn close(&mut self) {
        self.dedent();
        self.writeln("}");
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// cgo spelling of a C type: `C.int`, `*C.float`. `void*` is `unsafe.Pointer`.
pub fn cgo_spelling(ty: &CType) -> String {
    if ty.base == "void" && ty.pointers > 0 {
        return format!("{}unsafe.Pointer", "*".repeat(ty.pointers as usize - 1));
    }
    format!("{}C.{}", "*".repeat(ty.pointers as usize), cgo_type(&ty.base))
}

/// Expression handing the Go value `name` to C.
pub fn to_c(name: &str, go: &GoParam, conversion: Conversion, c_type: &CType) -> String {
    match conversion {
        Conversion::Wrapper => format!("{name}.internal"),
        Conversion::Enum => format!("{name}.c()"),
        Conversion::Cast if c_type.base == "void" && c_type.pointers == 1 => {
            format!("unsafe.Pointer({name})")
        }
        Conversion::Cast if c_type.is_pointer() => {
            let target = cgo_spelling(c_type);
            if go.ty.starts_with("[]") {
                format!("({target})(unsafe.Pointer(&{name}[0]))")
            } else {
                format!("({target})(unsafe.Pointer({name}))")
            }
        }
        Conversion::Cast => format!("{}({name})", cgo_spelling(c_type)),
    }
}

/// Expression turning the C value `expr` into `go`.
pub fn from_c(expr: &str, go: &GoParam) -> String {
    if go.is_ptr {
        format!("&{}{{internal: {expr}}}", go.ty)
    } else {
        format!("{}({expr})", go.ty)
    }
}

/// Local variable that receives a C output parameter.
pub fn out_var(name: &str) -> String {
    format!("c{}", crate::names::title(name))
}

/// Arguments of the C call described by the bindings of `sig`.
///
/// `receiver` is the expression passed for [`Binding::Receiver`]. Returns
/// `None` when a parameter was skipped, since no correct call can be built.
pub fn call_args(sig: &GoSignature, receiver: &str) -> Option<Vec<String>> {
    sig.bindings
        .iter()
        .map(|binding| match binding {
            Binding::Receiver => Some(receiver.to_string()),
            Binding::Input {
                param,
                conversion,
                c_type,
            } => {
                let go = &sig.params[*param];
                Some(to_c(&go.name, go, *conversion, c_type))
            }
            Binding::Output { ret, .. } => Some(format!("&{}", out_var(&sig.ret_vals[*ret].name))),
            Binding::Skipped => None,
        })
        .collect()
}

/// `var cX C.int` declarations for every output parameter of `sig`.
pub fn out_decls(sig: &GoSignature) -> Vec<String> {
    sig.bindings
        .iter()
        .filter_map(|binding| match binding {
            Binding::Output { ret, c_type } => Some(format!(
                "var {} {}",
                out_var(&sig.ret_vals[*ret].name),
                cgo_spelling(c_type)
            )),
            _ => None,
        })
        .collect()
}

/// Assignments copying every C output variable into its named Go return.
pub fn out_assigns(sig: &GoSignature) -> Vec<String> {
    sig.bindings
        .iter()
        .filter_map(|binding| match binding {
            Binding::Output { ret, .. } => {
                let go = &sig.ret_vals[*ret];
                Some(format!("{} = {}", go.name, from_c(&out_var(&go.name), go)))
            }
            _ => None,
        })
        .collect()
}
