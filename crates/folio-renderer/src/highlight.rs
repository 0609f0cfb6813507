//! Server-side syntax highlighting for code blocks.
//!
//! Source is tokenized with the bundled syntect grammars and emitted as
//! nested `<span class="hl-...">` elements, one class per scope atom. The
//! matching colours come from [`theme_css`]. Languages without a bundled
//! grammar are emitted as escaped plain text.

use std::sync::LazyLock;

use folio_api::CodeLanguage;
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::warn;

use crate::util::escape_html;

/// Class prefix of highlighted token spans.
pub const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Theme the reader stylesheet is generated from.
pub const THEME: &str = "InspiredGitHub";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Error generating the highlight stylesheet.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The configured theme is not in the bundled theme set.
    #[error("highlight theme '{0}' is not bundled")]
    MissingTheme(&'static str),
    /// Syntect failed to render the theme.
    #[error(transparent)]
    Syntect(#[from] syntect::Error),
}

/// Grammar lookup token for a language, if a bundled grammar covers it.
///
/// SCSS and Less are close enough to CSS, and TypeScript to JavaScript, to
/// share their grammars.
fn syntax_token(language: CodeLanguage) -> Option<&'static str> {
    let token = match language {
        CodeLanguage::Bash | CodeLanguage::Shell => "sh",
        CodeLanguage::C => "c",
        CodeLanguage::Cpp => "cpp",
        CodeLanguage::Csharp => "cs",
        CodeLanguage::Css | CodeLanguage::Less | CodeLanguage::Scss => "css",
        CodeLanguage::Diff => "diff",
        CodeLanguage::Go => "go",
        CodeLanguage::Java => "java",
        CodeLanguage::Javascript | CodeLanguage::Typescript => "js",
        CodeLanguage::Json => "json",
        CodeLanguage::Lua => "lua",
        CodeLanguage::Makefile => "makefile",
        CodeLanguage::Markdown => "md",
        CodeLanguage::Objectivec => "m",
        CodeLanguage::Php => "php",
        CodeLanguage::Python => "py",
        CodeLanguage::Ruby => "rb",
        CodeLanguage::Rust => "rs",
        CodeLanguage::Sql => "sql",
        CodeLanguage::Xml => "xml",
        CodeLanguage::Yaml => "yaml",
        CodeLanguage::Apache
        | CodeLanguage::Dockerfile
        | CodeLanguage::Ini
        | CodeLanguage::Kotlin
        | CodeLanguage::Nginx
        | CodeLanguage::Swift => return None,
    };
    Some(token)
}

/// Bundled grammar for `language`.
#[must_use]
pub fn syntax_for(language: CodeLanguage) -> Option<&'static SyntaxReference> {
    syntax_token(language).and_then(|token| SYNTAXES.find_syntax_by_token(token))
}

/// Highlight `source` as `language`, returning HTML for the inside of a
/// `<code>` element.
#[must_use]
pub fn highlight(source: &str, language: CodeLanguage) -> String {
    let source = source.replace("\r\n", "\n");
    let Some(syntax) = syntax_for(language) else {
        return escape_html(&source);
    };

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, CLASS_STYLE);
    for line in LinesWithEndings::from(&source) {
        if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
            warn!(%language, error = %e, "Highlighting failed, emitting plain text");
            return escape_html(&source);
        }
    }
    generator.finalize()
}

/// Stylesheet colouring the `hl-` token classes.
pub fn theme_css() -> Result<String, HighlightError> {
    let themes = ThemeSet::load_defaults();
    let theme = themes
        .themes
        .get(THEME)
        .ok_or(HighlightError::MissingTheme(THEME))?;
    Ok(css_for_theme_with_class_style(theme, CLASS_STYLE)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rust_tokens_are_wrapped() {
        let html = highlight("let b = a < 2;", CodeLanguage::Rust);

        assert!(html.starts_with(r#"<span class="hl-source hl-rust">"#));
        assert!(html.contains(">let</span>"));
        assert!(html.contains("&lt;"));
        assert!(!html.contains("a < 2"));
    }

    #[test]
    fn test_language_without_grammar_is_escaped_text() {
        assert_eq!(
            highlight("val ok = 1 < 2", CodeLanguage::Kotlin),
            "val ok = 1 &lt; 2"
        );
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(highlight("a\r\nb", CodeLanguage::Swift), "a\nb");
    }

    #[test]
    fn test_mapped_languages_resolve_to_bundled_grammars() {
        for language in CodeLanguage::ALL {
            if syntax_token(language).is_some() {
                assert!(syntax_for(language).is_some(), "no grammar for {language}");
            }
        }
        assert_eq!(syntax_for(CodeLanguage::Python).map(|s| s.name.as_str()), Some("Python"));
    }

    #[test]
    fn test_theme_css_covers_token_classes() {
        let css = theme_css().unwrap();
        assert!(css.contains(".hl-"));
    }
}
