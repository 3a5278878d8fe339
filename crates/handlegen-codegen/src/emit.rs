//! Rendering of enums, handle lifecycles and method stubs.
//!
//! Every function here appends to a [`GoWriter`]; none of them look at the
//! header or the tables beyond what they are handed.

use crate::group::ResolvedGroup;
use crate::names::{cgo_type, derive_enum_names, getter_name, receiver_name};
use crate::render::{call_args, from_c, out_assigns, out_decls, GoWriter};
use crate::signature::{Binding, GoParam, GoSignature};
use handlegen_decl::EnumDecl;

/// Go helper that turns a C status value into an `error`. The target package
/// provides it.
pub const STATUS_CHECK: &str = "result";

/// Fixed header of every artifact.
pub fn preamble(package: &str, include: &str) -> String {
    format!(
        "package {package}\n\n/* Generated by handlegen. DO NOT EDIT */\n\n// #include <{include}>\nimport \"C\"\n"
    )
}

/// `type Foo int`, its constants and the `c()` accessor.
pub fn enum_decl(w: &mut GoWriter, go_type: &str, c_name: &str, decl: &EnumDecl) {
    let c_spelling = if decl.is_typedef {
        c_name.to_string()
    } else {
        cgo_type(&format!("enum {c_name}"))
    };

    w.writeln(&format!("type {go_type} int"));
    w.blank();

    if !decl.enumerators.is_empty() {
        let names = derive_enum_names(&decl.enumerator_names());
        w.writeln("const (");
        w.indent();
        for (name, enumerator) in names.iter().zip(&decl.enumerators) {
            w.writeln(&format!("{name} {go_type} = C.{}", enumerator.name));
        }
        w.dedent();
        w.writeln(")");
        w.blank();
    }

    w.writeln(&format!("// c returns the C representation of {go_type}."));
    w.writeln(&format!(
        "func (e {go_type}) c() C.{c_spelling} {{ return C.{c_spelling}(e) }}"
    ));
    w.blank();
}

/// How the C calls of a constructor report failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusChecks {
    /// The create function returns the status type.
    pub create: bool,
    /// The setter returns the status type.
    pub setter: bool,
}

/// Struct, constructor, getters and destructor of one handle group.
pub fn handle_group(w: &mut GoWriter, resolved: &ResolvedGroup<'_>, ctor: &GoSignature, checks: StatusChecks) {
    let group = &resolved.group;
    let go_type = &group.go_type;

    w.open(&format!("type {go_type} struct"));
    w.writeln(&format!("internal C.{}", cgo_type(&group.c_type)));
    if !ctor.params.is_empty() {
        w.blank();
        for field in &ctor.params {
            w.writeln(&format!("{} {}", field.name, field.type_str()));
        }
    }
    w.close();
    w.blank();

    w.open(&ctor.to_string());
    if group.is_ambiguous() {
        for unmapped in &ctor.unmapped {
            w.writeln(&format!("// TODO: {unmapped}"));
        }
        w.writeln(&format!(
            "// TODO: {go_type} is configured by more than one setter: {}",
            group.setters.join(", ")
        ));
        w.writeln(&format!(
            "// Call C.{}, then the setters, then set a finalizer calling destroy{go_type}",
            resolved.create
        ));
        w.writeln("return");
    } else {
        constructor_body(w, resolved, ctor, checks);
    }
    w.close();
    w.blank();

    if group.is_ambiguous() {
        w.writeln(&format!("// TODO: Getters for {go_type}"));
        w.blank();
    } else {
        getters(w, resolved, ctor);
    }

    let destructor = GoSignature {
        name: format!("destroy{go_type}"),
        params: vec![GoParam::new("obj", go_type.as_str(), true)],
        ..GoSignature::default()
    };
    w.open(&destructor.to_string());
    w.writeln(&format!("C.{}(obj.internal)", resolved.destroy));
    w.close();
}

fn constructor_body(w: &mut GoWriter, resolved: &ResolvedGroup<'_>, ctor: &GoSignature, checks: StatusChecks) {
    let go_type = &resolved.group.go_type;
    let setter = resolved.shape.name.as_str();

    let Some(args) = call_args(ctor, "internal") else {
        for unmapped in &ctor.unmapped {
            w.writeln(&format!("// TODO: {unmapped}"));
        }
        w.writeln(&format!(
            "// Call C.{}, then C.{setter}, then set a finalizer calling destroy{go_type}",
            resolved.create
        ));
        w.writeln("return");
        return;
    };

    // Only an unmapped C return type can be left here.
    for unmapped in &ctor.unmapped {
        w.writeln(&format!("// TODO: {unmapped}"));
    }

    let returns_err = ctor.returns_err();
    w.writeln(&format!("var internal C.{}", cgo_type(&resolved.group.c_type)));
    checked_call(
        w,
        &format!("C.{}(&internal)", resolved.create),
        returns_err && checks.create,
    );

    for decl in out_decls(ctor) {
        w.writeln(&decl);
    }
    let call = format!("C.{setter}({})", args.join(", "));
    match ctor.ret_vals.iter().find(|r| r.name == "cRetVal") {
        Some(ret) => w.writeln(&format!("cRetVal = {}", from_c(&call, ret))),
        None => checked_call(w, &call, returns_err && checks.setter),
    }
    for assign in out_assigns(ctor) {
        w.writeln(&assign);
    }

    w.writeln(&format!("retVal = &{go_type}{{"));
    w.indent();
    w.writeln("internal: internal,");
    for field in &ctor.params {
        w.writeln(&format!("{}: {},", field.name, field.name));
    }
    w.dedent();
    w.writeln("}");
    w.writeln(&format!("runtime.SetFinalizer(retVal, destroy{go_type})"));
    w.writeln("return");
}

fn checked_call(w: &mut GoWriter, call: &str, check: bool) {
    if check {
        w.open(&format!("if err = {STATUS_CHECK}({call}); err != nil"));
        w.writeln("return");
        w.close();
    } else {
        w.writeln(call);
    }
}

fn getters(w: &mut GoWriter, resolved: &ResolvedGroup<'_>, ctor: &GoSignature) {
    let group = &resolved.group;
    let receiver = GoParam::new(receiver_name(&group.go_type), group.go_type.as_str(), true);

    for (i, (param, binding)) in resolved.shape_fn.params.iter().zip(&ctor.bindings).enumerate() {
        if matches!(binding, Binding::Output { .. }) {
            continue;
        }
        // Self-reference wins over the unmapped-type TODO.
        if !param.ty.is_pointer() && param.ty.base == group.c_type {
            continue;
        }
        match binding {
            Binding::Skipped => {
                if let Some(unmapped) = ctor.unmapped.iter().find(|u| u.index == Some(i)) {
                    w.writeln(&format!("//TODO: {unmapped}"));
                    w.blank();
                }
            }
            Binding::Input { param: field, .. } => {
                let field = &ctor.params[*field];
                let getter = GoSignature {
                    receiver: Some(receiver.clone()),
                    name: getter_name(param.name.as_deref(), i),
                    ret_vals: vec![GoParam::new("", field.ty.as_str(), field.is_ptr)],
                    ..GoSignature::default()
                };
                w.writeln(&format!("{getter} {{ return {}.{} }}", receiver.name, field.name));
                w.blank();
            }
            Binding::Receiver | Binding::Output { .. } => {}
        }
    }
}

/// Empty-bodied method stub, preceded by a TODO per unmapped parameter.
pub fn method_stub(w: &mut GoWriter, sig: &GoSignature) {
    for unmapped in &sig.unmapped {
        w.writeln(&format!("//TODO: {unmapped}"));
    }
    w.writeln(&format!("{sig} {{}}"));
    w.blank();
}
