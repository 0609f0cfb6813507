//! Typed content blocks.
//!
//! A [`Block`] is a page component after dispatch on its type tag. The set
//! of block kinds is closed; anything the renderer cannot display as its
//! declared type becomes [`Block::Fallback`], a plain paragraph of the
//! component's description.

use folio_api::{CodeLanguage, ComponentKind, ImageUrlResolver, PageComponent};
use tracing::warn;

/// One renderable block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// `h1`..`h5`.
    Heading {
        /// Level 1-5.
        level: u8,
        /// Heading text.
        text: String,
        /// Class hook.
        class: String,
    },
    /// `p`.
    Paragraph {
        /// Paragraph text.
        text: String,
        /// Class hook.
        class: String,
    },
    /// Responsive image.
    Image {
        /// Absolute image URL.
        src: String,
        /// Class hook.
        class: String,
    },
    /// Embedded 16:9 video.
    Video {
        /// Embed URL.
        src: String,
        /// Class hook.
        class: String,
    },
    /// Highlighted source code with a copy control.
    Code {
        /// Source text.
        source: String,
        /// Highlighter language.
        language: CodeLanguage,
        /// Class hook.
        class: String,
    },
    /// Numbered list.
    OrderedList {
        /// Items, empty lines preserved.
        items: Vec<String>,
        /// Class hook.
        class: String,
    },
    /// Bulleted list.
    UnorderedList {
        /// Items, empty lines preserved.
        items: Vec<String>,
        /// Class hook.
        class: String,
    },
    /// Unrecognized or malformed component shown as a paragraph.
    Fallback {
        /// The component's description.
        text: String,
        /// Class hook.
        class: String,
    },
}

impl Block {
    /// Dispatch a component on its type tag.
    ///
    /// Never fails. Unknown tags, images without a reference, videos without
    /// a URL, and code without a supported language all fall back to a plain
    /// paragraph.
    #[must_use]
    pub fn from_component(component: &PageComponent, images: &ImageUrlResolver) -> Self {
        let text = component.text().to_owned();
        let class = component.class().to_owned();

        match component.kind() {
            ComponentKind::Heading(level) => Self::Heading { level, text, class },
            ComponentKind::Paragraph => Self::Paragraph { text, class },
            ComponentKind::Image => match component.image.as_deref().map(str::trim) {
                Some(reference) if !reference.is_empty() => Self::Image {
                    src: images.resolve(reference),
                    class,
                },
                _ => fallback(component, "image without reference", text, class),
            },
            ComponentKind::Youtube => {
                let src = text.trim();
                if src.is_empty() {
                    fallback(component, "video without URL", text, class)
                } else {
                    Self::Video {
                        src: embed_url(src),
                        class,
                    }
                }
            }
            ComponentKind::Code => {
                match component.language.as_deref().map(str::parse::<CodeLanguage>) {
                    Some(Ok(language)) => Self::Code {
                        source: text,
                        language,
                        class,
                    },
                    _ => fallback(component, "code without supported language", text, class),
                }
            }
            ComponentKind::OrderedList => Self::OrderedList {
                items: list_items(&text),
                class,
            },
            ComponentKind::UnorderedList => Self::UnorderedList {
                items: list_items(&text),
                class,
            },
            ComponentKind::Unknown(_) => fallback(component, "unknown type", text, class),
        }
    }

    /// Whether this block is the fallback rendering.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

fn fallback(component: &PageComponent, reason: &str, text: String, class: String) -> Block {
    warn!(
        id = component.id,
        component_type = component.component_type.as_deref().unwrap_or_default(),
        reason,
        "Rendering component as plain paragraph"
    );
    Block::Fallback { text, class }
}

/// Rewrite YouTube watch, short-link and shorts URLs to the embeddable
/// form. Anything else is returned unchanged.
#[must_use]
pub fn embed_url(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest
        .strip_prefix("www.")
        .or_else(|| rest.strip_prefix("m."))
        .unwrap_or(rest);

    let id = if let Some(path) = rest.strip_prefix("youtu.be/") {
        path.split(['?', '#', '/']).next()
    } else if let Some(path) = rest.strip_prefix("youtube.com/shorts/") {
        path.split(['?', '#', '/']).next()
    } else if let Some(query) = rest.strip_prefix("youtube.com/watch?") {
        query
            .split('#')
            .next()
            .unwrap_or_default()
            .split('&')
            .find_map(|pair| pair.strip_prefix("v="))
    } else {
        None
    };

    match id {
        Some(id) if !id.is_empty() => format!("https://www.youtube.com/embed/{id}"),
        _ => url.to_owned(),
    }
}

/// Split list text into items: one per `\n`-separated line, trimmed.
///
/// Empty lines are kept as empty items.
#[must_use]
pub fn list_items(text: &str) -> Vec<String> {
    text.split('\n').map(|line| line.trim().to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn resolver() -> ImageUrlResolver {
        ImageUrlResolver::new("http://localhost:3000/api")
    }

    fn component(kind: &str, text: &str) -> PageComponent {
        PageComponent {
            id: 1,
            component_type: Some(kind.to_owned()),
            description: Some(text.to_owned()),
            special_class: Some("lead".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn test_list_items_preserve_empty_lines() {
        assert_eq!(list_items("a\nb\n\nc"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_list_items_trim() {
        assert_eq!(list_items("  one \r\n two"), vec!["one", "two"]);
    }

    #[test]
    fn test_heading() {
        assert_eq!(
            Block::from_component(&component("h3", "Setup"), &resolver()),
            Block::Heading {
                level: 3,
                text: "Setup".to_owned(),
                class: "lead".to_owned(),
            }
        );
    }

    #[test]
    fn test_ordered_list() {
        let block = Block::from_component(&component("ol", "a\nb\n\nc"), &resolver());
        assert_eq!(
            block,
            Block::OrderedList {
                items: vec!["a".into(), "b".into(), String::new(), "c".into()],
                class: "lead".to_owned(),
            }
        );
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let block = Block::from_component(&component("marquee", "Hi"), &resolver());
        assert_eq!(
            block,
            Block::Fallback {
                text: "Hi".to_owned(),
                class: "lead".to_owned(),
            }
        );
    }

    #[test]
    fn test_fallback_logged_as_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(Block::from_component(&component("marquee", "Hi"), &resolver()).is_fallback());
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Rendering component as plain paragraph"));
        assert!(output.contains("unknown type"));
    }

    #[test]
    fn test_missing_type_falls_back() {
        let block = Block::from_component(&PageComponent::default(), &resolver());
        assert!(block.is_fallback());
    }

    #[test]
    fn test_image_resolves_reference() {
        let mut image = component("image", "");
        image.image = Some("uploads/a.png".to_owned());
        assert_eq!(
            Block::from_component(&image, &resolver()),
            Block::Image {
                src: "http://localhost:3000/api/uploads/a.png".to_owned(),
                class: "lead".to_owned(),
            }
        );
    }

    #[test]
    fn test_image_without_reference_falls_back() {
        assert!(Block::from_component(&component("image", ""), &resolver()).is_fallback());
    }

    #[test]
    fn test_code_with_language() {
        let mut code = component("code", "fn main() {}");
        code.language = Some("rust".to_owned());
        assert_eq!(
            Block::from_component(&code, &resolver()),
            Block::Code {
                source: "fn main() {}".to_owned(),
                language: CodeLanguage::Rust,
                class: "lead".to_owned(),
            }
        );
    }

    #[test]
    fn test_code_without_language_falls_back() {
        let mut code = component("code", "x = 1");
        assert!(Block::from_component(&code, &resolver()).is_fallback());
        code.language = Some("brainfuck".to_owned());
        assert!(Block::from_component(&code, &resolver()).is_fallback());
    }

    #[test]
    fn test_youtube() {
        let video = component("youtube", " https://www.youtube.com/embed/abc ");
        assert_eq!(
            Block::from_component(&video, &resolver()),
            Block::Video {
                src: "https://www.youtube.com/embed/abc".to_owned(),
                class: "lead".to_owned(),
            }
        );
    }

    #[test]
    fn test_youtube_watch_url_becomes_embed() {
        let video = component("youtube", "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(
            Block::from_component(&video, &resolver()),
            Block::Video {
                src: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_owned(),
                class: "lead".to_owned(),
            }
        );
    }

    #[test]
    fn test_embed_url() {
        let embed = "https://www.youtube.com/embed/abc";
        assert_eq!(embed_url("https://youtu.be/abc?t=42"), embed);
        assert_eq!(embed_url("https://youtube.com/shorts/abc"), embed);
        assert_eq!(embed_url("http://m.youtube.com/watch?feature=share&v=abc#t=1"), embed);
        assert_eq!(embed_url(embed), embed);
        assert_eq!(
            embed_url("https://www.youtube.com/watch?list=x"),
            "https://www.youtube.com/watch?list=x"
        );
        assert_eq!(embed_url("https://vimeo.com/123"), "https://vimeo.com/123");
    }
}
