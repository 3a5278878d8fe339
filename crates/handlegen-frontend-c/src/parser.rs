use miette::{IntoDiagnostic, Result};
use tree_sitter::{Parser, Tree};

/// Parse header text into a tree-sitter Tree.
///
/// The C++ grammar is used: it accepts C declarations as well as the
/// `extern "C" { ... }` blocks that guard most library headers.
pub fn parse(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    let language = tree_sitter_cpp::LANGUAGE;
    parser.set_language(&language.into()).into_diagnostic()?;

    parser
        .parse(source, None)
        .ok_or_else(|| miette::miette!("Failed to parse header"))
}

/// Blank out preprocessor directives and the given macro tokens.
///
/// Every removed byte is replaced by a space so byte offsets, and with them
/// diagnostic spans, still point into the original header text.
pub fn preprocess(source: &str, strip_tokens: &[String]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut in_directive = false;

    for line in source.split_inclusive('\n') {
        let starts_directive = line.trim_start().starts_with('#');
        if in_directive || starts_directive {
            let body = line.trim_end_matches(&['\n', '\r'][..]);
            in_directive = body.ends_with('\\');
            for c in line.chars() {
                if c == '\n' {
                    out.push('\n');
                } else {
                    out.extend(std::iter::repeat(' ').take(c.len_utf8()));
                }
            }
        } else {
            out.push_str(line);
        }
    }

    if strip_tokens.is_empty() {
        return out;
    }
    strip_identifiers(&out, strip_tokens)
}

fn strip_identifiers(source: &str, tokens: &[String]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        if tokens.iter().any(|t| t == word) {
            out.extend(std::iter::repeat(' ').take(word.len()));
        } else {
            out.push_str(word);
        }
        word.clear();
    };

    for c in source.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            flush(&mut word, &mut out);
            out.push(c);
        }
    }
    flush(&mut word, &mut out);
    out
}
