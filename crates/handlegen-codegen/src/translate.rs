//! C function declaration → [`GoSignature`].
//!
//! Translation never fails outright. Parameters without a type mapping are
//! skipped and recorded in [`GoSignature::unmapped`]; the emitter turns them
//! into TODO comments.

use crate::names::go_param_name;
use crate::signature::{Binding, GoParam, GoSignature, Unmapped};
use crate::types::TypeMapper;
use handlegen_build::Tables;
use handlegen_decl::FnDecl;

/// The receiver a translated function may be attached to.
#[derive(Debug, Clone)]
pub struct ReceiverSpec {
    /// C handle type whose parameter becomes the receiver.
    pub c_type: String,
    pub param: GoParam,
}

/// What to produce for one declaration.
#[derive(Debug, Clone, Default)]
pub struct TranslateRequest {
    pub name: String,
    pub receiver: Option<ReceiverSpec>,
    /// Return value placed before everything else (the constructed wrapper).
    pub leading_ret: Option<GoParam>,
    /// Translate a status return into a trailing `err error`.
    pub returns_err: bool,
}

/// Translate one C function into a Go signature.
pub fn translate(
    c_name: &str,
    decl: &FnDecl,
    request: &TranslateRequest,
    mapper: &TypeMapper<'_>,
    tables: &Tables,
) -> GoSignature {
    let mut sig = GoSignature {
        name: request.name.clone(),
        ..GoSignature::default()
    };
    if let Some(leading) = &request.leading_ret {
        sig.ret_vals.push(leading.clone());
    }

    let out_positions = tables.return_positions(c_name);

    for (i, param) in decl.params.iter().enumerate() {
        if let Some(receiver) = &request.receiver {
            if sig.receiver.is_none() && !param.ty.is_pointer() && param.ty.base == receiver.c_type {
                sig.receiver = Some(receiver.param.clone());
                sig.bindings.push(Binding::Receiver);
                continue;
            }
        }

        let name = go_param_name(param.name.as_deref(), i);
        let unmapped = |name: String| Unmapped {
            function: c_name.into(),
            index: Some(i),
            name,
            c_type: param.ty.clone(),
        };

        if out_positions.contains(&i) {
            if let Some(pointee) = param.ty.pointee() {
                match mapper.lookup(&pointee) {
                    Some(go) => {
                        sig.bindings.push(Binding::Output {
                            ret: sig.ret_vals.len(),
                            c_type: pointee,
                        });
                        sig.ret_vals.push(GoParam::new(name, go.name.clone(), go.is_ptr()));
                    }
                    None => {
                        sig.unmapped.push(unmapped(name));
                        sig.bindings.push(Binding::Skipped);
                    }
                }
                continue;
            }
            // A listed position that is not a pointer cannot be written by C.
        }

        match mapper.lookup(&param.ty) {
            Some(go) => {
                sig.bindings.push(Binding::Input {
                    param: sig.params.len(),
                    conversion: go.conversion,
                    c_type: param.ty.clone(),
                });
                sig.params.push(GoParam::new(name, go.name.clone(), go.is_ptr()));
            }
            None => {
                sig.unmapped.push(unmapped(name));
                sig.bindings.push(Binding::Skipped);
            }
        }
    }

    let ret_ty = &decl.ret_ty;
    if tables.is_status(&ret_ty.spelling()) {
        if request.returns_err {
            sig.ret_vals.push(GoParam::new("err", "error", false));
        }
    } else if !ret_ty.is_void() {
        match mapper.lookup(ret_ty) {
            Some(go) => {
                let name = if request.leading_ret.is_some() { "cRetVal" } else { "retVal" };
                let at = usize::from(request.leading_ret.is_some());
                sig.ret_vals.insert(at, GoParam::new(name, go.name.clone(), go.is_ptr()));
                // Output positions recorded above shift by one.
                for binding in &mut sig.bindings {
                    if let Binding::Output { ret, .. } = binding {
                        if *ret >= at {
                            *ret += 1;
                        }
                    }
                }
            }
            None => sig.unmapped.push(Unmapped {
                function: c_name.into(),
                index: None,
                name: String::new(),
                c_type: ret_ty.clone(),
            }),
        }
    }

    sig
}
