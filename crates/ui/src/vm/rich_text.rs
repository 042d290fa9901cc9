use std::collections::{HashMap, HashSet};

/// Cleans face HTML before it is rendered as inner HTML.
///
/// Keeps the inline markup the formatting toolbar produces, including the
/// colour styles written by `styleWithCSS`.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "u", "font", "ul", "ol", "li",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("span", ["style"].into_iter().collect());
    attributes.insert("font", ["color"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

/// First line of `text`, cut to `max_chars` with a trailing ellipsis.
#[must_use]
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut lines = trimmed.lines();
    let first_line = lines.next().unwrap_or("");
    let has_more_lines = lines.next().is_some();

    let mut out = String::with_capacity(max_chars + 3);
    let mut count = 0usize;
    let mut cut = false;
    for ch in first_line.chars() {
        if count >= max_chars {
            cut = true;
            break;
        }
        out.push(ch);
        count = count.saturating_add(1);
    }

    if has_more_lines || cut {
        out.push_str("...");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_toolbar_markup() {
        let html = r#"<b>Paris</b> <u>is</u> <span style="color: rgb(255, 0, 0);">red</span>"#;
        let cleaned = sanitize_html(html);
        assert!(cleaned.contains("<b>Paris</b>"));
        assert!(cleaned.contains("<u>is</u>"));
        assert!(cleaned.contains("style=\"color: rgb(255, 0, 0);\""));
    }

    #[test]
    fn sanitize_drops_scripts_and_handlers() {
        let cleaned = sanitize_html(r#"<img src=x onerror="alert(1)"><script>alert(2)</script>ok"#);
        assert_eq!(cleaned, "ok");
    }

    #[test]
    fn preview_cuts_long_first_lines() {
        assert_eq!(truncate_preview("abcdef", 3), "abc...");
        assert_eq!(truncate_preview("ab\ncd", 10), "ab...");
        assert_eq!(truncate_preview("  ", 10), "");
    }
}
