use handlegen_common::{Diagnostic, SourceFile, Span};
use handlegen_decl::{
    CType, Decl, DeclKind, EnumDecl, Enumerator, FnDecl, Param, TranslationUnit, TypeDecl,
};
use smol_str::SmolStr;
use tracing::debug;
use tree_sitter::{Node, Tree};

/// Lower a tree-sitter Tree to the declaration model.
///
/// `text` is the preprocessed header the tree was parsed from; it has the
/// same byte offsets as `source.content`.
pub fn lower(tree: &Tree, text: &str, source: &SourceFile) -> Result<TranslationUnit, Diagnostic> {
    let ctx = LoweringContext::new(text, source);
    let root = tree.root_node();
    if root.has_error() {
        return Err(ctx.syntax_error(root));
    }
    ctx.lower_unit(root)
}

struct LoweringContext<'a> {
    text: &'a str,
    source: &'a SourceFile,
}

/// What a declarator chain resolves to once pointers and parentheses are peeled off.
struct Declarator<'t> {
    name: Option<SmolStr>,
    pointers: u8,
    function: Option<Node<'t>>,
}

impl<'a> LoweringContext<'a> {
    fn new(text: &'a str, source: &'a SourceFile) -> Self {
        Self { text, source }
    }

    fn span(&self, node: Node) -> Span {
        Span::new(
            self.source.id,
            node.start_byte() as u32,
            node.end_byte() as u32,
        )
    }

    fn text(&self, node: Node) -> &str {
        node.utf8_text(self.text.as_bytes()).unwrap_or("")
    }

    /// Node text with runs of whitespace collapsed, e.g. `unsigned   long` → `unsigned long`.
    fn normalized(&self, node: Node) -> SmolStr {
        SmolStr::new(self.text(node).split_whitespace().collect::<Vec<_>>().join(" "))
    }

    fn syntax_error(&self, root: Node) -> Diagnostic {
        let node = first_error(root).unwrap_or(root);
        let (line, col) = self.source.line_col(node.start_byte() as u32);
        let label = if node.is_missing() {
            format!("expected `{}`", node.kind())
        } else {
            "unexpected input".to_string()
        };

        Diagnostic::error(format!(
            "failed to parse {} at {}:{}",
            self.source.name(),
            line + 1,
            col + 1
        ))
        .with_span(self.span(node))
        .with_label(label)
        .with_help("unknown macros in prototypes can be removed with `strip_tokens`")
    }

    fn lower_unit(&self, node: Node) -> Result<TranslationUnit, Diagnostic> {
        let mut unit = TranslationUnit::new();
        self.lower_items(node, &mut unit)?;
        Ok(unit)
    }

    fn lower_items(&self, node: Node, unit: &mut TranslationUnit) -> Result<(), Diagnostic> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.lower_item(child, unit)?;
        }
        Ok(())
    }

    fn lower_item(&self, node: Node, unit: &mut TranslationUnit) -> Result<(), Diagnostic> {
        match node.kind() {
            "declaration" | "function_definition" => self.lower_declaration(node, unit),
            "type_definition" => self.lower_type_definition(node, unit),
            "enum_specifier" => {
                if let Some(decl) = self.lower_enum(node, None) {
                    unit.add_decl(decl);
                }
                Ok(())
            }
            "struct_specifier" | "union_specifier" => {
                if let Some(decl) = self.lower_record(node) {
                    unit.add_decl(decl);
                }
                Ok(())
            }
            "linkage_specification" => {
                // extern "C" { ... } or extern "C" <declaration>
                match node.child_by_field_name("body") {
                    Some(body) if body.kind() == "declaration_list" => self.lower_items(body, unit),
                    Some(body) => self.lower_item(body, unit),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    fn has_const(&self, node: Node) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|c| c.kind() == "type_qualifier" && self.text(c) == "const");
        found
    }

    fn lower_base_type(&self, node: Node, is_const: bool) -> CType {
        CType::named(self.normalized(node)).with_const(is_const)
    }

    fn unwrap_declarator<'t>(&self, mut node: Node<'t>) -> Declarator<'t> {
        let mut pointers = 0u8;
        loop {
            match node.kind() {
                "pointer_declarator"
                | "abstract_pointer_declarator"
                | "reference_declarator"
                | "array_declarator"
                | "abstract_array_declarator" => {
                    pointers += 1;
                }
                "parenthesized_declarator" | "abstract_parenthesized_declarator" => {}
                "function_declarator" | "abstract_function_declarator" => {
                    return Declarator { name: None, pointers, function: Some(node) };
                }
                "identifier" | "field_identifier" | "type_identifier" => {
                    return Declarator {
                        name: Some(SmolStr::new(self.text(node))),
                        pointers,
                        function: None,
                    };
                }
                _ => return Declarator { name: None, pointers, function: None },
            }

            match inner_declarator(node) {
                Some(inner) => node = inner,
                None => return Declarator { name: None, pointers, function: None },
            }
        }
    }

    fn lower_declaration(&self, node: Node, unit: &mut TranslationUnit) -> Result<(), Diagnostic> {
        let Some(type_node) = node.child_by_field_name("type") else {
            return Ok(());
        };

        // enum tag { ... } var;
        if type_node.kind() == "enum_specifier" {
            if let Some(decl) = self.lower_enum(type_node, None) {
                unit.add_decl(decl);
            }
        }

        let is_const = self.has_const(node);
        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let outer = self.unwrap_declarator(declarator);
            let Some(fn_node) = outer.function else {
                // Variable declarations are not part of the API surface we wrap.
                continue;
            };
            if let Some(decl) = self.lower_function(node, type_node, is_const, outer.pointers, fn_node)? {
                unit.add_decl(decl);
            }
        }
        Ok(())
    }

    fn lower_function(
        &self,
        node: Node,
        type_node: Node,
        is_const: bool,
        ret_pointers: u8,
        fn_node: Node,
    ) -> Result<Option<Decl>, Diagnostic> {
        let inner = fn_node
            .child_by_field_name("declarator")
            .map(|d| self.unwrap_declarator(d));

        let name = match inner {
            Some(Declarator { name: Some(name), pointers: 0, function: None }) => name,
            // `int (*fp)(int);` declares a variable of function pointer type
            Some(Declarator { pointers, .. }) if pointers > 0 => return Ok(None),
            _ => {
                return Err(Diagnostic::error("function declarator without a name")
                    .with_span(self.span(fn_node))
                    .with_label("declared here"));
            }
        };

        let mut ret_ty = self.lower_base_type(type_node, is_const);
        ret_ty.pointers = ret_pointers;

        let (params, is_variadic) = match fn_node.child_by_field_name("parameters") {
            Some(list) => self.lower_parameters(list),
            None => (vec![], false),
        };

        Ok(Some(Decl::new(
            name,
            DeclKind::Function(FnDecl {
                params,
                ret_ty,
                is_variadic,
            }),
            self.span(node),
        )))
    }

    fn lower_parameters(&self, list: Node) -> (Vec<Param>, bool) {
        let mut params = vec![];
        let mut is_variadic = false;

        let mut cursor = list.walk();
        for child in list.children(&mut cursor) {
            match child.kind() {
                "parameter_declaration" | "optional_parameter_declaration" => {
                    if let Some(param) = self.lower_parameter(child) {
                        params.push(param);
                    }
                }
                "..." | "variadic_parameter" | "variadic_parameter_declaration" => {
                    is_variadic = true;
                }
                _ => {}
            }
        }

        // f(void) takes no parameters
        if params.len() == 1 && params[0].name.is_none() && params[0].ty.is_void() {
            params.clear();
        }

        (params, is_variadic)
    }

    fn lower_parameter(&self, node: Node) -> Option<Param> {
        let type_node = node.child_by_field_name("type")?;
        let mut ty = self.lower_base_type(type_node, self.has_const(node));

        let name = match node.child_by_field_name("declarator") {
            Some(declarator) => {
                let d = self.unwrap_declarator(declarator);
                match d.function {
                    Some(fn_node) => {
                        // Function pointer parameter: keep the written type so it shows up
                        // verbatim in unmapped-type reports.
                        ty = CType::named(self.normalized(node));
                        fn_node
                            .child_by_field_name("declarator")
                            .and_then(|inner| self.unwrap_declarator(inner).name)
                    }
                    None => {
                        ty.pointers = d.pointers;
                        d.name
                    }
                }
            }
            None => None,
        };

        Some(Param {
            name,
            ty,
            span: self.span(node),
        })
    }

    fn lower_type_definition(&self, node: Node, unit: &mut TranslationUnit) -> Result<(), Diagnostic> {
        let Some(type_node) = node.child_by_field_name("type") else {
            return Ok(());
        };
        let is_const = self.has_const(node);

        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let d = self.unwrap_declarator(declarator);

            if let Some(fn_node) = d.function {
                // typedef void (*fooCallback_t)(int); function pointers are modelled as void*
                let name = fn_node
                    .child_by_field_name("declarator")
                    .and_then(|inner| self.unwrap_declarator(inner).name);
                if let Some(name) = name {
                    let alias = CType::void().pointer_to();
                    unit.add_decl(Decl::new(name, DeclKind::Type(TypeDecl::Alias(alias)), self.span(node)));
                }
                continue;
            }

            let Some(name) = d.name else {
                continue;
            };

            if type_node.kind() == "enum_specifier" && d.pointers == 0 {
                if let Some(decl) = self.lower_enum(type_node, Some(name.clone())) {
                    unit.add_decl(decl);
                    continue;
                }
            }

            let mut alias = self.lower_base_type(type_node, is_const);
            alias.pointers = d.pointers;
            unit.add_decl(Decl::new(name, DeclKind::Type(TypeDecl::Alias(alias)), self.span(node)));
        }
        Ok(())
    }

    /// Lower an enum with a body. Returns `None` for forward declarations and
    /// anonymous enums that are not named through a typedef.
    fn lower_enum(&self, node: Node, typedef_name: Option<SmolStr>) -> Option<Decl> {
        let body = node.child_by_field_name("body")?;
        let is_typedef = typedef_name.is_some();
        let name = match typedef_name {
            Some(name) => name,
            None => match node.child_by_field_name("name") {
                Some(tag) => SmolStr::new(self.text(tag)),
                None => {
                    debug!(span = ?self.span(node), "skipping anonymous enum");
                    return None;
                }
            },
        };

        let mut enumerators = vec![];
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            if child.kind() != "enumerator" {
                continue;
            }
            let Some(name_node) = child.child_by_field_name("name") else {
                continue;
            };
            enumerators.push(Enumerator {
                name: SmolStr::new(self.text(name_node)),
                ordinal: enumerators.len(),
                value: child.child_by_field_name("value").map(|v| self.normalized(v)),
            });
        }

        Some(Decl::new(
            name,
            DeclKind::Enum(EnumDecl {
                is_typedef,
                enumerators,
            }),
            self.span(node),
        ))
    }

    fn lower_record(&self, node: Node) -> Option<Decl> {
        let name = node.child_by_field_name("name")?;
        Some(Decl::new(
            self.text(name),
            DeclKind::Type(TypeDecl::Record {
                is_union: node.kind() == "union_specifier",
                has_body: node.child_by_field_name("body").is_some(),
            }),
            self.span(node),
        ))
    }
}

fn inner_declarator(node: Node) -> Option<Node> {
    if let Some(inner) = node.child_by_field_name("declarator") {
        return Some(inner);
    }
    let mut cursor = node.walk();
    let last = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "type_qualifier")
        .last();
    last
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(err) = first_error(child) {
            return Some(err);
        }
    }
    None
}
