//! Target signature model and its text rendering.

use crate::types::Conversion;
use handlegen_decl::CType;
use smol_str::SmolStr;
use std::fmt;

/// A Go parameter, receiver, or return value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoParam {
    /// Empty for unnamed return values.
    pub name: String,
    pub ty: String,
    pub is_ptr: bool,
}

impl GoParam {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, is_ptr: bool) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_ptr,
        }
    }

    /// The type as written in Go, e.g. `*Foo`.
    pub fn type_str(&self) -> String {
        if self.is_ptr {
            format!("*{}", self.ty)
        } else {
            self.ty.clone()
        }
    }
}

impl fmt::Display for GoParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.type_str())
        } else {
            write!(f, "{} {}", self.name, self.type_str())
        }
    }
}

/// How one C parameter is fed when the C function is called from Go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The receiver's handle.
    Receiver,
    /// `params[param]`, converted back to C.
    Input {
        param: usize,
        conversion: Conversion,
        c_type: CType,
    },
    /// Written by C through a pointer; surfaces as `ret_vals[ret]`.
    /// `c_type` is the pointee type.
    Output { ret: usize, c_type: CType },
    /// Unmapped; recorded in [`GoSignature::unmapped`].
    Skipped,
}

/// A C parameter or return type with no Go mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmapped {
    pub function: SmolStr,
    /// Parameter position; `None` for the return type.
    pub index: Option<usize>,
    pub name: String,
    pub c_type: CType,
}

impl fmt::Display for Unmapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(
                f,
                "{:?}: Parameter {} Skipped {:?} of {} - unmapped type",
                self.function.as_str(),
                index,
                self.name,
                self.c_type
            ),
            None => write!(
                f,
                "{:?}: Return value of {} Skipped - unmapped type",
                self.function.as_str(),
                self.c_type
            ),
        }
    }
}

/// A translated Go function or method signature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoSignature {
    pub receiver: Option<GoParam>,
    pub name: String,
    pub params: Vec<GoParam>,
    pub ret_vals: Vec<GoParam>,
    /// One entry per C parameter, in C order.
    pub bindings: Vec<Binding>,
    /// Non-fatal translation failures.
    pub unmapped: Vec<Unmapped>,
}

impl GoSignature {
    pub fn is_complete(&self) -> bool {
        self.unmapped.is_empty()
    }

    /// Whether the last return value is a Go `error`.
    pub fn returns_err(&self) -> bool {
        self.ret_vals.last().is_some_and(|r| r.ty == "error")
    }
}

impl fmt::Display for GoSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func ")?;
        if let Some(receiver) = &self.receiver {
            write!(f, "({receiver}) ")?;
        }
        write!(f, "{}(", self.name)?;
        write_list(f, &self.params)?;
        f.write_str(")")?;

        match self.ret_vals.as_slice() {
            [] => Ok(()),
            [single] if single.name.is_empty() => write!(f, " {single}"),
            rets => {
                f.write_str(" (")?;
                write_list(f, rets)?;
                f.write_str(")")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, params: &[GoParam]) -> fmt::Result {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{param}")?;
    }
    Ok(())
}
