//! Server-rendered HTML pages.

use v0mon_core::element::{ElementType, TypePair};
use v0mon_db::models::creature::Creature;
use v0mon_pipeline::GenerationResult;

use crate::render::og::{OG_HEIGHT, OG_WIDTH};

const SITE_NAME: &str = "v0mon";

const STYLE: &str = "\
body{margin:0;font-family:system-ui,-apple-system,sans-serif;background:#0f0f23;color:#e2e8f0}\
main{max-width:42rem;margin:0 auto;padding:2rem 1.5rem}\
header{display:flex;justify-content:space-between;align-items:center;padding:1.5rem}\
a{color:#a5b4fc}\
.card{background:#1a1a2e;border-radius:1rem;padding:2rem;text-align:center}\
.card img{max-width:300px;width:100%;border-radius:.5rem}\
.badge{display:inline-block;padding:.5rem 1rem;border-radius:9999px;font-weight:600;margin:0 .25rem}\
.muted{color:#94a3b8}\
.error{background:#7f1d1d;border-radius:.5rem;padding:1rem;text-align:center}\
form{display:flex;flex-direction:column;gap:1rem}\
input{font-size:1.125rem;padding:1rem;border-radius:.5rem;border:1px solid #334155;background:#111827;color:inherit}\
button{font-size:1.125rem;padding:1rem;border-radius:.5rem;border:0;background:#667eea;color:#fff;cursor:pointer}\
ul.recent{list-style:none;padding:0;display:flex;flex-wrap:wrap;gap:.5rem;justify-content:center}";

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap `body` in a full document. `head` is inserted verbatim.
fn document(title: &str, head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>\n{head}<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn badge(element: ElementType) -> String {
    let text = if element.prefers_dark_text() {
        "#000"
    } else {
        "#fff"
    };
    format!(
        "<span class=\"badge\" style=\"background:{bg};color:{text}\">{label}</span>",
        bg = element.badge_css(),
        label = escape(&element.label()),
    )
}

fn badges(types: &TypePair) -> String {
    types.iter().map(badge).collect()
}

/// Absolute URL of the preview card for `handle`.
pub fn og_image_url(base_url: &str, handle: &str) -> String {
    format!("{base_url}/api/og?username={handle}")
}

/// The per-handle creature page, with OpenGraph and Twitter card metadata
/// pointing at the preview card.
pub fn creature_page(result: &GenerationResult, base_url: &str) -> String {
    let handle = &result.handle;
    let title = format!("{} | @{handle} | {SITE_NAME}", result.creature_name);
    let description = &result.description;
    let image_url = og_image_url(base_url, handle);
    let page_url = format!("{base_url}/{handle}");
    let image_alt = format!("{} - creature for @{handle}", result.creature_name);

    let head = format!(
        "<meta name=\"description\" content=\"{description}\">\n\
<meta property=\"og:title\" content=\"{title}\">\n\
<meta property=\"og:description\" content=\"{description}\">\n\
<meta property=\"og:type\" content=\"website\">\n\
<meta property=\"og:url\" content=\"{page_url}\">\n\
<meta property=\"og:site_name\" content=\"{SITE_NAME}\">\n\
<meta property=\"og:image\" content=\"{image_url}\">\n\
<meta property=\"og:image:width\" content=\"{OG_WIDTH}\">\n\
<meta property=\"og:image:height\" content=\"{OG_HEIGHT}\">\n\
<meta property=\"og:image:alt\" content=\"{image_alt}\">\n\
<meta name=\"twitter:card\" content=\"summary_large_image\">\n\
<meta name=\"twitter:title\" content=\"{title}\">\n\
<meta name=\"twitter:description\" content=\"{description}\">\n\
<meta name=\"twitter:image\" content=\"{image_url}\">\n\
<meta name=\"robots\" content=\"index, follow\">\n",
        description = escape(description),
        title = escape(&title),
        page_url = escape(&page_url),
        image_url = escape(&image_url),
        image_alt = escape(&image_alt),
    );

    let body = format!(
        "<header><a href=\"/\">&larr; Back to home</a><strong>{SITE_NAME}</strong></header>\n\
<main>\n<h2>@{handle}</h2>\n<p class=\"muted\">Your creature companion has been generated!</p>\n\
<div class=\"card\">\n<img src=\"{image}\" alt=\"{name}\" width=\"300\" height=\"300\">\n\
<h3>{name}</h3>\n<div>{badges}</div>\n<p class=\"muted\">{description}</p>\n</div>\n\
<p style=\"text-align:center\"><a href=\"/\">Create another</a></p>\n</main>",
        handle = escape(handle),
        image = escape(&result.image_location),
        name = escape(&result.creature_name),
        badges = badges(&result.types),
        description = escape(description),
    );

    document(&title, &head, &body)
}

/// Page shown when no creature could be produced for `raw_handle`.
pub fn not_found_page(raw_handle: &str) -> String {
    let head = "<meta name=\"description\" content=\"This creature could not be generated.\">\n\
<meta name=\"robots\" content=\"noindex\">\n";
    let body = format!(
        "<header><a href=\"/\">&larr; Back to home</a><strong>{SITE_NAME}</strong></header>\n\
<main>\n<div class=\"card\">\n<h2>Creature not found</h2>\n\
<p class=\"muted\">We couldn't generate a creature for <strong>{handle}</strong>.</p>\n\
<p><a href=\"/\">Try another handle</a></p>\n</div>\n</main>",
        handle = escape(raw_handle),
    );
    document(&format!("Creature not found | {SITE_NAME}"), head, &body)
}

/// Landing page with the handle form, the most recent creatures and an
/// optional validation error.
pub fn landing_page(
    recent: &[Creature],
    total: i64,
    base_url: &str,
    error: Option<&str>,
) -> String {
    let image_url = format!("{base_url}/api/og-home");
    let description = "Turn any X/Twitter handle into a unique generated creature.";
    let head = format!(
        "<meta name=\"description\" content=\"{description}\">\n\
<meta property=\"og:title\" content=\"{SITE_NAME}\">\n\
<meta property=\"og:description\" content=\"{description}\">\n\
<meta property=\"og:image\" content=\"{image_url}\">\n\
<meta name=\"twitter:card\" content=\"summary_large_image\">\n\
<meta name=\"twitter:image\" content=\"{image_url}\">\n",
        image_url = escape(&image_url),
    );

    let error_html = error
        .map(|msg| format!("<div class=\"error\">{}</div>\n", escape(msg)))
        .unwrap_or_default();

    let recent_html = if recent.is_empty() {
        String::new()
    } else {
        let items: String = recent
            .iter()
            .map(|c| {
                format!(
                    "<li><a href=\"/{handle}\">{name} <span class=\"muted\">@{handle}</span></a></li>",
                    handle = escape(&c.handle),
                    name = escape(&c.creature_name),
                )
            })
            .collect();
        format!("<h3>Recently generated</h3>\n<ul class=\"recent\">{items}</ul>\n")
    };

    let body = format!(
        "<header><strong>{SITE_NAME}</strong></header>\n<main>\n\
<h2>Generate your creature avatar</h2>\n\
<p class=\"muted\">Enter an X/Twitter handle and discover its personalized creature.</p>\n\
{error_html}\
<form method=\"get\" action=\"/go\">\n\
<input type=\"text\" name=\"handle\" placeholder=\"@elonmusk\" maxlength=\"16\" required>\n\
<button type=\"submit\">Generate my creature</button>\n</form>\n\
<p class=\"muted\">{total} creatures generated so far</p>\n{recent_html}</main>",
    );

    document(SITE_NAME, &head, &body)
}
