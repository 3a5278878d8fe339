//! C header frontend: header text to [`TranslationUnit`].
//!
//! ```text
//! header text → preprocess → tree-sitter → lower → TranslationUnit
//! ```
//!
//! Preprocessing does not expand macros. Directive lines are blanked and a
//! configured list of macro tokens (calling-convention or deprecation
//! markers) is removed, which is enough for the flat prototype lists that
//! library headers consist of. Any syntax error left after that is fatal.

mod parser;
mod lower;

pub use parser::{parse, preprocess};
pub use lower::lower;

use handlegen_common::SourceFile;
use handlegen_decl::TranslationUnit;
use miette::Result;

/// Options applied to every header before parsing.
#[derive(Debug, Clone, Default)]
pub struct HeaderOptions {
    /// Identifiers removed from the header text before parsing.
    pub strip_tokens: Vec<String>,
}

/// Parse one header file into the declaration model.
pub fn parse_file(source: &SourceFile, options: &HeaderOptions) -> Result<TranslationUnit> {
    let text = parser::preprocess(&source.content, &options.strip_tokens);
    let tree = parser::parse(&text)?;
    lower::lower(&tree, &text, source).map_err(|diag| diag.into_report(source))
}
