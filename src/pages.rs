use serde_json::Value;

use crate::sites::SiteConfig;

const BASE_TEMPLATE: &str = include_str!("../templates/base.html");
const SSSTIK_TEMPLATE: &str = include_str!("../templates/ssstik_style.html");

/// Relative proxy path used when no absolute URL is known.
pub const API_DOWNLOAD_PATH: &str = "/api/download";

pub fn render_page(site: &SiteConfig, api_url: &str) -> String {
    let template = if site.uses_ssstik_template() {
        SSSTIK_TEMPLATE
    } else {
        BASE_TEMPLATE
    };
    let post_payload_json = script_safe_json(&Value::Object(site.default_options_map()));

    render_template(template, |name| match name {
        "site_name" => Some(escape_html(site.display_name)),
        "theme_slug" => Some(escape_html(site.theme_slug)),
        "api_url" => Some(escape_html(api_url)),
        "post_payload_json" => Some(post_payload_json.clone()),
        _ => None,
    })
}

/// Replaces `{{ name }}` placeholders in one pass. Unknown names are left as-is.
fn render_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            rest = &rest[start..];
            break;
        };

        match lookup(after_open[..end].trim()) {
            Some(value) => output.push_str(&value),
            None => output.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    output
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// Keeps `</script>` inside a JSON string from closing the element.
fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
