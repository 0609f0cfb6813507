//! HTML output for blocks and display units.
//!
//! Markup hooks used by the reader stylesheet and script:
//! - `.block-row` / `.block-cell` for horizontal rows
//! - `.block-video` with a `.video-loader` hidden once the frame loads
//! - `.code-block` with a `.code-copy` button; the button carries its
//!   confirmation window in `data-copy-ms` and the highlighted source sits in
//!   `<code>` as `hl-` token spans

use std::fmt::Write;
use std::time::Duration;

use folio_api::CodeLanguage;

use crate::block::Block;
use crate::highlight::highlight;
use crate::util::{class_attr, escape_html};

/// Alt text of content images.
pub const IMAGE_ALT: &str = "Blog Image";

/// Title of embedded video frames.
pub const VIDEO_TITLE: &str = "YouTube video player";

/// Permissions granted to embedded video frames.
pub const VIDEO_ALLOW: &str = "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";

/// Label of the copy button before it is pressed.
pub const COPY_LABEL: &str = "Copy";

/// Label of the copy button while the confirmation is shown.
pub const COPIED_LABEL: &str = "Copied";

/// How long the copy button shows [`COPIED_LABEL`] before reverting.
pub const COPY_CONFIRMATION: Duration = Duration::from_millis(2000);

/// Write one block.
pub fn write_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, text, class } => {
            let level = (*level).clamp(1, 6);
            write!(
                out,
                "<h{level}{}>{}</h{level}>",
                class_attr("", class),
                escape_html(text)
            )
            .unwrap();
        }
        Block::Paragraph { text, class } | Block::Fallback { text, class } => {
            write!(out, "<p{}>{}</p>", class_attr("", class), escape_html(text)).unwrap();
        }
        Block::Image { src, class } => {
            write!(
                out,
                r#"<img{} src="{}" alt="{IMAGE_ALT}" loading="lazy">"#,
                class_attr("block-image", class),
                escape_html(src)
            )
            .unwrap();
        }
        Block::Video { src, class } => write_video(src, class, out),
        Block::Code {
            source,
            language,
            class,
        } => write_code(source, *language, class, out),
        Block::OrderedList { items, class } => write_list("ol", items, class, out),
        Block::UnorderedList { items, class } => write_list("ul", items, class, out),
    }
}

/// Write a horizontal row of blocks, each cell centered.
pub fn write_row(blocks: &[Block], out: &mut String) {
    out.push_str(r#"<div class="block-row">"#);
    for block in blocks {
        out.push_str(r#"<div class="block-cell">"#);
        write_block(block, out);
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn write_video(src: &str, class: &str, out: &mut String) {
    write!(
        out,
        r#"<div{}><div class="video-frame"><div class="video-loader" aria-hidden="true"></div><iframe src="{}" title="{VIDEO_TITLE}" allow="{VIDEO_ALLOW}" allowfullscreen></iframe></div></div>"#,
        class_attr("block-video", class),
        escape_html(src)
    )
    .unwrap();
}

fn write_code(source: &str, language: CodeLanguage, class: &str, out: &mut String) {
    write!(
        out,
        r#"<div{} data-language="{language}"><div class="code-header"><span class="code-language">{}</span><button type="button" class="code-copy" data-copy-ms="{}" data-copied-label="{COPIED_LABEL}">{COPY_LABEL}</button></div><pre><code class="language-{language}">{}</code></pre></div>"#,
        class_attr("code-block", class),
        language.label(),
        COPY_CONFIRMATION.as_millis(),
        highlight(source, language)
    )
    .unwrap();
}

fn write_list(tag: &str, items: &[String], class: &str, out: &mut String) {
    write!(out, "<{tag}{}>", class_attr("", class)).unwrap();
    for item in items {
        write!(out, "<li>{}</li>", escape_html(item)).unwrap();
    }
    write!(out, "</{tag}>").unwrap();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(block: &Block) -> String {
        let mut out = String::new();
        write_block(block, &mut out);
        out
    }

    #[test]
    fn test_heading_with_class() {
        let block = Block::Heading {
            level: 2,
            text: "A & B".to_owned(),
            class: "accent".to_owned(),
        };
        assert_eq!(render(&block), r#"<h2 class="accent">A &amp; B</h2>"#);
    }

    #[test]
    fn test_paragraph_escapes_markup() {
        let block = Block::Paragraph {
            text: "<script>".to_owned(),
            class: String::new(),
        };
        assert_eq!(render(&block), "<p>&lt;script&gt;</p>");
    }

    #[test]
    fn test_fallback_is_plain_paragraph() {
        let block = Block::Fallback {
            text: "Hi".to_owned(),
            class: String::new(),
        };
        assert_eq!(render(&block), "<p>Hi</p>");
    }

    #[test]
    fn test_image() {
        let block = Block::Image {
            src: "http://localhost:3000/api/uploads/a.png".to_owned(),
            class: String::new(),
        };
        assert_eq!(
            render(&block),
            r#"<img class="block-image" src="http://localhost:3000/api/uploads/a.png" alt="Blog Image" loading="lazy">"#
        );
    }

    #[test]
    fn test_video_has_loader_and_frame() {
        let html = render(&Block::Video {
            src: "https://www.youtube.com/embed/abc".to_owned(),
            class: String::new(),
        });
        assert!(html.starts_with(r#"<div class="block-video"><div class="video-frame">"#));
        assert!(html.contains(r#"<div class="video-loader" aria-hidden="true"></div>"#));
        assert!(html.contains(r#"title="YouTube video player""#));
        assert!(html.contains("allowfullscreen"));
    }

    #[test]
    fn test_ordered_list_keeps_empty_items() {
        let block = Block::OrderedList {
            items: vec!["a".into(), "b".into(), String::new(), "c".into()],
            class: String::new(),
        };
        assert_eq!(
            render(&block),
            "<ol><li>a</li><li>b</li><li></li><li>c</li></ol>"
        );
    }

    #[test]
    fn test_code_block() {
        let html = render(&Block::Code {
            source: "let a = 1;\nlet b = a < 2;".to_owned(),
            language: CodeLanguage::Rust,
            class: String::new(),
        });

        assert!(html.starts_with(concat!(
            r#"<div class="code-block" data-language="rust">"#,
            r#"<div class="code-header"><span class="code-language">RUST</span>"#,
            r#"<button type="button" class="code-copy" data-copy-ms="2000" data-copied-label="Copied">Copy</button></div>"#,
            r#"<pre><code class="language-rust"><span class="hl-source hl-rust">"#,
        )));
        assert!(html.contains(">let</span>"));
        assert!(html.contains("&lt;"));
        assert!(html.ends_with("</code></pre></div>"));
    }

    #[test]
    fn test_code_without_grammar_is_escaped() {
        let html = render(&Block::Code {
            source: "fun main() = println(1 < 2)".to_owned(),
            language: CodeLanguage::Kotlin,
            class: "wide".to_owned(),
        });

        assert!(html.starts_with(r#"<div class="code-block wide" data-language="kotlin">"#));
        assert!(html.contains(
            r#"<code class="language-kotlin">fun main() = println(1 &lt; 2)</code>"#
        ));
    }

    #[test]
    fn test_row_keeps_cell_order() {
        let cell = |t: &str| Block::Paragraph {
            text: t.to_owned(),
            class: String::new(),
        };
        let mut out = String::new();
        write_row(&[cell("X"), cell("Y"), cell("Z")], &mut out);
        assert_eq!(
            out,
            concat!(
                r#"<div class="block-row">"#,
                r#"<div class="block-cell"><p>X</p></div>"#,
                r#"<div class="block-cell"><p>Y</p></div>"#,
                r#"<div class="block-cell"><p>Z</p></div>"#,
                "</div>"
            )
        );
    }
}
