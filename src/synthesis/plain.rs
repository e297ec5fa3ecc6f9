//! Plain-mode documents: splicing into author markup, or the default shell.

use super::console::shim_block;
use super::{escape_style, guarded_script, DocumentKind, SynthesizedDocument};
use crate::entry::ResolvedEntries;
use once_cell::sync::Lazy;
use regex::Regex;

static HEAD_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</head\s*>").expect("valid"));
static HEAD_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<head(?:\s[^>]*)?>").expect("valid"));
static HTML_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html(?:\s[^>]*)?>").expect("valid"));
static DOCTYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*<!DOCTYPE[^>]*>").expect("valid"));
static BODY_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</body\s*>").expect("valid"));
static HTML_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</html\s*>").expect("valid"));

fn style_block(style: &str) -> String {
    format!("<style>\n{}\n</style>\n", escape_style(style))
}

fn script_block(script: &str) -> String {
    format!("<script>\nconsole.log('Live preview loaded');\n{}</script>\n", guarded_script(script))
}

/// Splice the style entry into the author's head and the script entry before the
/// body closes. Anything the author wrote is kept in place.
pub(super) fn splice(entries: &ResolvedEntries) -> SynthesizedDocument {
    let markup = entries.markup.content.as_str();
    let head_payload = format!("{}{}", shim_block(), style_block(&entries.style.content));

    let mut text = if let Some(m) = HEAD_CLOSE.find(markup) {
        insert_at(markup, m.start(), &head_payload)
    } else if let Some(m) = HEAD_OPEN.find(markup) {
        insert_at(markup, m.end(), &format!("\n{}", head_payload))
    } else if let Some(m) = HTML_OPEN.find(markup) {
        insert_at(markup, m.end(), &format!("\n<head>\n{}</head>\n", head_payload))
    } else if let Some(m) = DOCTYPE.find(markup) {
        insert_at(markup, m.end(), &format!("\n{}", head_payload))
    } else {
        format!("{}{}", head_payload, markup)
    };

    let tail = script_block(&entries.script.content);
    let close = BODY_CLOSE
        .find_iter(&text)
        .last()
        .or_else(|| HTML_CLOSE.find_iter(&text).last())
        .map(|m| m.start());
    text = match close {
        Some(at) => insert_at(&text, at, &tail),
        None => {
            let mut out = text;
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&tail);
            out
        }
    };

    SynthesizedDocument {
        kind: DocumentKind::PlainCustomMarkup,
        text,
    }
}

fn insert_at(text: &str, at: usize, payload: &str) -> String {
    let mut out = String::with_capacity(text.len() + payload.len());
    out.push_str(&text[..at]);
    out.push_str(payload);
    out.push_str(&text[at..]);
    out
}

const SHELL_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Live Preview</title>
<style>
  body {
    font-family: Arial, sans-serif;
    margin: 0;
    padding: 20px;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    min-height: 100vh;
    color: white;
    text-align: center;
  }
  .container {
    max-width: 800px;
    margin: 0 auto;
    padding: 40px 20px;
  }
  h1 {
    font-size: 2.5em;
    margin-bottom: 20px;
  }
  p {
    font-size: 1.2em;
    opacity: 0.9;
    margin-bottom: 30px;
  }
  button {
    padding: 12px 24px;
    background: #007acc;
    color: white;
    border: none;
    border-radius: 8px;
    cursor: pointer;
    font-size: 16px;
    margin: 10px;
  }
  button:hover {
    background: #005a9e;
  }
  #output {
    margin-top: 20px;
    padding: 20px;
    background: rgba(255, 255, 255, 0.1);
    border-radius: 8px;
  }
</style>
"#;

const SHELL_BODY: &str = r#"</head>
<body>
<div class="container">
  <h1>Live Preview</h1>
  <p>Edit your HTML, CSS, and JavaScript files to see live changes here!</p>
  <button onclick="sayHello()">Click Me!</button>
  <button onclick="showTime()">Show Current Time</button>
  <div id="output"></div>
</div>
<script>
function sayHello() {
  document.getElementById('output').innerHTML = '<p>Hello from Live Preview!</p>';
}
function showTime() {
  document.getElementById('output').innerHTML = '<p>Current time: ' + new Date().toLocaleTimeString() + '</p>';
}
</script>
"#;

const SHELL_TAIL: &str = "</body>\n</html>\n";

/// Fixed shell used when the project has no markup entry
pub(super) fn default_shell(entries: &ResolvedEntries) -> SynthesizedDocument {
    let mut text = String::new();
    text.push_str(SHELL_HEAD);
    text.push_str(&shim_block());
    text.push_str(&style_block(&entries.style.content));
    text.push_str(SHELL_BODY);
    text.push_str(&script_block(&entries.script.content));
    text.push_str(SHELL_TAIL);
    SynthesizedDocument {
        kind: DocumentKind::PlainDefaultShell,
        text,
    }
}
