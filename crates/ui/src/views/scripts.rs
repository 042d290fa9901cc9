use dioxus::document::eval;
use dioxus::prelude::spawn;
use quizcards_core::page::{Clipboard, ClipboardError};

pub async fn read_editable_html(element_id: &str) -> Option<String> {
    let script = read_editable_html_script(element_id);
    eval(&script).join::<String>().await.ok()
}

pub async fn run_scripts(scripts: Vec<String>) {
    for script in scripts {
        let _ = eval(&script).await;
    }
}

/// Focuses the editable region and runs one editing command on it.
pub fn exec_command_script(
    element_id: &str,
    command: &str,
    value: Option<&str>,
    style_with_css: bool,
) -> String {
    let command_literal = js_string_literal(command);
    let value_literal = value.map_or_else(|| "null".to_string(), js_string_literal);
    format!(
        r#"
        const el = document.getElementById("{element_id}");
        if (!el) {{ return; }}
        el.focus();
        document.execCommand("styleWithCSS", false, {style_with_css});
        document.execCommand({command_literal}, false, {value_literal});
        "#
    )
}

fn read_editable_html_script(element_id: &str) -> String {
    format!(
        r#"
        const el = document.getElementById("{element_id}");
        return el ? el.innerHTML : "";
        "#
    )
}

fn write_clipboard_script(text: &str) -> String {
    let text_literal = js_string_literal(text);
    format!(
        r#"
        const text = {text_literal};
        try {{
            if (navigator.clipboard && navigator.clipboard.writeText) {{
                await navigator.clipboard.writeText(text);
                return;
            }}
        }} catch (_) {{}}
        const area = document.createElement("textarea");
        area.value = text;
        document.body.appendChild(area);
        area.select();
        document.execCommand("copy");
        area.remove();
        "#
    )
}

/// Clipboard of the webview; writes are fire-and-forget.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebviewClipboard;

impl Clipboard for WebviewClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let script = write_clipboard_script(text);
        spawn(async move {
            let _ = eval(&script).await;
        });
        Ok(())
    }
}

fn js_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
