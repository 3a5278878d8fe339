//! Identifier derivation.
//!
//! Pure functions over plain strings, independent of parsing and emission.

use handlegen_build::Tables;

/// Go reserved keywords that need a trailing underscore when used as identifiers.
const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var",
];

/// Longest prefix shared by every name, compared character by character.
pub fn longest_common_prefix<S: AsRef<str>>(names: &[S]) -> String {
    let Some((first, rest)) = names.split_first() else {
        return String::new();
    };
    let first = first.as_ref();

    let mut len = first.len();
    for name in rest {
        let common: usize = first
            .chars()
            .zip(name.as_ref().chars())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.len_utf8())
            .sum();
        len = len.min(common);
    }
    first[..len].to_string()
}

/// Cut a prefix back to its last `_`, keeping the underscore.
///
/// `FOO_FOO_BA` → `FOO_FOO_`; a prefix without `_` has no word boundary and yields `""`.
pub fn word_boundary(prefix: &str) -> &str {
    match prefix.rfind('_') {
        Some(i) => &prefix[..=i],
        None => "",
    }
}

/// The prefix stripped from every enumerator of one enum.
pub fn enum_prefix<S: AsRef<str>>(names: &[S]) -> String {
    word_boundary(&longest_common_prefix(names)).to_string()
}

/// Strip `prefix` from `name` and turn the rest into an exported Go constant.
///
/// If nothing identifier-like is left, the prefix is kept from its last letter
/// onward: `FOO_` + `1D` → `O_1D` → `O1d`. A prefix without any letter
/// falls back to a leading `X`: `_1` → `X1`.
pub fn process_enum_name(prefix: &str, name: &str) -> String {
    let rest = name.strip_prefix(prefix).unwrap_or(name);
    let direct = exported(rest);
    if starts_with_letter(&direct) {
        return direct;
    }

    let kept = prefix
        .rfind(|c: char| c.is_ascii_alphabetic())
        .map(|i| &prefix[i..])
        .unwrap_or("X");
    exported(&format!("{kept}_{rest}"))
}

/// Derive the Go constant names for all enumerators of one enum.
pub fn derive_enum_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let prefix = enum_prefix(names);
    names
        .iter()
        .map(|n| process_enum_name(&prefix, n.as_ref()))
        .collect()
}

fn starts_with_letter(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// `SPATIAL_TRANSFORMER` → `SpatialTransformer`; mixed-case words keep their casing.
///
/// A result with no lower-case letter at all is title-cased as a whole so that
/// feeding the result back in yields the same name.
pub fn exported(s: &str) -> String {
    let joined: String = s
        .split('_')
        .filter(|w| !w.is_empty())
        .map(title_word)
        .collect();

    if joined.chars().any(|c| c.is_ascii_lowercase()) {
        joined
    } else {
        title_word(&joined)
    }
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest: String = chars.collect();
    let rest = if word.chars().any(|c| c.is_ascii_lowercase()) {
        rest
    } else {
        rest.to_ascii_lowercase()
    };
    format!("{}{}", first.to_ascii_uppercase(), rest)
}

/// Upper-case the first character: `nbDims` → `NbDims`.
pub fn title(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Lower-case the first character: `Foo` → `foo`.
pub fn untitle(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_lowercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Go identifier for a C parameter. Unnamed parameters become `arg<index>`.
pub fn go_param_name(c_name: Option<&str>, index: usize) -> String {
    let Some(name) = c_name.filter(|n| !n.is_empty()) else {
        return format!("arg{index}");
    };
    let name = untitle(name);
    if GO_KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Exported accessor name for a C parameter.
pub fn getter_name(c_name: Option<&str>, index: usize) -> String {
    match c_name.filter(|n| !n.is_empty()) {
        Some(name) => title(name),
        None => format!("Arg{index}"),
    }
}

/// Receiver variable name: the first letter of the type, lower-cased.
pub fn receiver_name(type_name: &str) -> String {
    type_name
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase().to_string())
        .unwrap_or_else(|| "r".to_string())
}

/// Go method name for a raw C function.
///
/// The `method_names` table wins; otherwise the library prefix is stripped.
pub fn method_name(raw: &str, tables: &Tables) -> String {
    if let Some(name) = tables.method_names.get(raw) {
        return name.clone();
    }
    let stripped = tables
        .prefix
        .as_deref()
        .and_then(|p| raw.strip_prefix(p))
        .filter(|rest| starts_with_letter(rest))
        .unwrap_or(raw);
    title(stripped)
}

/// cgo spelling of a C base type: `unsigned int` → `uint`, `struct foo` → `struct_foo`.
pub fn cgo_type(base: &str) -> String {
    let known = match base {
        "unsigned" | "unsigned int" => Some("uint"),
        "unsigned char" => Some("uchar"),
        "signed char" => Some("schar"),
        "unsigned short" | "unsigned short int" => Some("ushort"),
        "short int" => Some("short"),
        "long int" => Some("long"),
        "unsigned long" | "unsigned long int" => Some("ulong"),
        "long long" | "long long int" => Some("longlong"),
        "unsigned long long" | "unsigned long long int" => Some("ulonglong"),
        _ => None,
    };
    if let Some(name) = known {
        return name.to_string();
    }
    for keyword in ["struct ", "enum ", "union "] {
        if let Some(tag) = base.strip_prefix(keyword) {
            return format!("{}_{}", keyword.trim_end(), tag);
        }
    }
    base.replace(' ', "")
}
