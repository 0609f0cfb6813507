//! HTML page layout.
//!
//! Pages are assembled as strings around the rendered [`Document`] markup.

use std::fmt::Write;

use axum::http::StatusCode;
use folio_api::{ImageUrlResolver, NavSubTitle, Subject};
use folio_navigator::SubjectOutline;
use folio_renderer::{Document, EMPTY_MESSAGE, escape_html};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::handlers::{subject_path, sub_title_path};
use crate::static_files::HIGHLIGHT_CSS;

/// Site name shown in the header and page titles.
const SITE_NAME: &str = "Folio";

/// Catalogue message when no subject matches.
const NO_SUBJECTS_MESSAGE: &str = "No subjects found.";

/// Wrap `body` in the document shell.
pub(crate) fn page(title: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if title.is_empty() {
        writeln!(out, "<title>{SITE_NAME}</title>").unwrap();
    } else {
        writeln!(out, "<title>{} · {SITE_NAME}</title>", escape_html(title)).unwrap();
    }
    out.push_str("<link rel=\"stylesheet\" href=\"/assets/reader.css\">\n");
    writeln!(out, r#"<link rel="stylesheet" href="/assets/{HIGHLIGHT_CSS}">"#).unwrap();
    out.push_str("<script src=\"/assets/reader.js\" defer></script>\n");
    out.push_str("</head>\n");
    out.push_str("<body>\n");
    writeln!(
        out,
        r#"<header class="site-header"><a class="site-name" href="/">{SITE_NAME}</a></header>"#
    )
    .unwrap();
    out.push_str(body);
    out.push_str("\n</body>\n</html>\n");
    out
}

/// Standalone error page.
pub(crate) fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<main class="error-page"><h1>{}</h1><p class="notice notice-error" role="alert">{}</p><a href="/">Back to all subjects</a></main>"#,
        escape_html(heading),
        escape_html(message)
    );
    page(heading, &body)
}

/// Subject catalogue with its search form.
pub(crate) fn catalogue_page(
    subjects: &[&Subject],
    query: &str,
    images: &ImageUrlResolver,
    error: Option<&str>,
) -> String {
    let mut body = String::from(r#"<main class="catalogue">"#);
    body.push_str("<h1>Subjects</h1>");
    write_search_form(&mut body, "/", query, "Search subjects");

    if let Some(message) = error {
        write!(
            body,
            r#"<div class="notice notice-error" role="alert">{}</div>"#,
            escape_html(message)
        )
        .unwrap();
    } else if subjects.is_empty() {
        write!(body, r#"<p class="empty-state">{NO_SUBJECTS_MESSAGE}</p>"#).unwrap();
    } else {
        body.push_str(r#"<ul class="subject-grid">"#);
        for subject in subjects {
            write!(
                body,
                r#"<li class="subject-card"><a href="{}">"#,
                subject_path(subject.id)
            )
            .unwrap();
            if let Some(image) = subject.image.as_deref().filter(|i| !i.is_empty()) {
                write!(
                    body,
                    r#"<img src="{}" alt="{}" loading="lazy">"#,
                    escape_html(&images.resolve(image)),
                    escape_html(&subject.name)
                )
                .unwrap();
            }
            write!(body, "<h2>{}</h2>", escape_html(&subject.name)).unwrap();
            if !subject.description.is_empty() {
                write!(body, "<p>{}</p>", escape_html(&subject.description)).unwrap();
            }
            body.push_str("</a></li>");
        }
        body.push_str("</ul>");
    }
    body.push_str("</main>");
    page("", &body)
}

/// Subject page: outline sidebar plus the selected sub title.
///
/// `document` is `None` when the subject has no sub titles at all.
pub(crate) fn subject_page(
    outline: &SubjectOutline,
    document: Option<&Document>,
    query: &str,
) -> String {
    let subject = outline.subject();
    let mut body = String::from(r#"<div class="reader">"#);

    write_sidebar(&mut body, outline, query);

    body.push_str(r#"<main class="content">"#);
    let breadcrumbs = outline.breadcrumbs();
    if let Some(crumbs) = &breadcrumbs {
        write!(
            body,
            r#"<nav class="breadcrumbs" aria-label="Breadcrumb"><a href="{}">{}</a><span class="separator">/</span><span>{}</span><span class="separator">/</span><span aria-current="page">{}</span></nav>"#,
            subject_path(subject.id),
            escape_html(&crumbs.subject),
            escape_html(&crumbs.main_title),
            escape_html(&crumbs.sub_title)
        )
        .unwrap();
        write!(body, "<h1>{}</h1>", escape_html(&crumbs.sub_title)).unwrap();
    } else {
        write!(body, "<h1>{}</h1>", escape_html(&subject.name)).unwrap();
    }

    match document {
        Some(document) => {
            body.push_str(r#"<article class="document">"#);
            body.push_str(&document.render_html());
            body.push_str("</article>");
        }
        None => write!(body, r#"<p class="empty-state">{EMPTY_MESSAGE}</p>"#).unwrap(),
    }

    write_pager(&mut body, outline);
    body.push_str("</main></div>");

    let title = breadcrumbs.map_or_else(
        || subject.name.clone(),
        |c| format!("{} · {}", c.sub_title, c.subject),
    );
    page(&title, &body)
}

fn write_sidebar(out: &mut String, outline: &SubjectOutline, query: &str) {
    let subject = outline.subject();
    let action = outline.selected().map_or_else(
        || subject_path(subject.id),
        |id| sub_title_path(subject.id, id),
    );

    out.push_str(r#"<aside class="sidebar">"#);
    write!(
        out,
        r#"<h2 class="sidebar-title"><a href="{}">{}</a></h2>"#,
        subject_path(subject.id),
        escape_html(&subject.name)
    )
    .unwrap();
    write_search_form(out, &action, query, "Search this subject");

    let visible = outline.visible();
    if visible.is_empty() {
        write!(out, r#"<p class="empty-state">No matching titles.</p>"#).unwrap();
    }
    out.push_str(r#"<nav class="outline"><ul>"#);
    for main in visible {
        // An active search opens every matching main title.
        let open = !query.trim().is_empty() || outline.is_expanded(main.main_subject_id);
        write!(
            out,
            r#"<li class="outline-main"><details{}><summary>{}</summary><ul>"#,
            if open { " open" } else { "" },
            escape_html(&main.main_subject_title)
        )
        .unwrap();
        for sub in &main.sub_titles {
            write_outline_link(out, subject.id, sub, outline.selected(), query);
        }
        out.push_str("</ul></details></li>");
    }
    out.push_str("</ul></nav></aside>");
}

fn write_outline_link(
    out: &mut String,
    subject_id: folio_api::Id,
    sub: &NavSubTitle,
    selected: Option<folio_api::Id>,
    query: &str,
) {
    let href = with_query(&sub_title_path(subject_id, sub.sub_subject_id), query);
    if selected == Some(sub.sub_subject_id) {
        write!(
            out,
            r#"<li><a class="active" aria-current="page" href="{}">{}</a></li>"#,
            escape_html(&href),
            escape_html(&sub.sub_subject_title)
        )
        .unwrap();
    } else {
        write!(
            out,
            r#"<li><a href="{}">{}</a></li>"#,
            escape_html(&href),
            escape_html(&sub.sub_subject_title)
        )
        .unwrap();
    }
}

fn write_pager(out: &mut String, outline: &SubjectOutline) {
    let neighbors = outline.neighbors();
    if neighbors.previous.is_none() && neighbors.next.is_none() {
        return;
    }
    let subject_id = outline.subject().id;
    out.push_str(r#"<nav class="pager" aria-label="Pages">"#);
    if let Some(previous) = &neighbors.previous {
        write!(
            out,
            r#"<a class="pager-previous" rel="prev" href="{}">{}</a>"#,
            sub_title_path(subject_id, previous.sub_subject_id),
            escape_html(&previous.sub_subject_title)
        )
        .unwrap();
    }
    if let Some(next) = &neighbors.next {
        write!(
            out,
            r#"<a class="pager-next" rel="next" href="{}">{}</a>"#,
            sub_title_path(subject_id, next.sub_subject_id),
            escape_html(&next.sub_subject_title)
        )
        .unwrap();
    }
    out.push_str("</nav>");
}

fn write_search_form(out: &mut String, action: &str, query: &str, label: &str) {
    write!(
        out,
        r#"<form class="search" method="get" action="{}" role="search"><input type="search" name="q" value="{}" placeholder="{label}" aria-label="{label}"></form>"#,
        escape_html(action),
        escape_html(query)
    )
    .unwrap();
}

/// Append a `?q=` parameter when the search text is not blank.
fn with_query(path: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?q={}", utf8_percent_encode(query, NON_ALPHANUMERIC))
    }
}
