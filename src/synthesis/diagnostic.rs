//! Fixed page shown when the error detector fires. It contains no script: no user
//! code runs while a static diagnostic is displayed.

use super::{escape_html, DocumentKind, SynthesizedDocument};
use crate::diagnose::StaticDiagnostic;

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Code Error - Live Preview</title>
<style>
  body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    background: #1e1e1e;
    color: white;
    padding: 40px 20px;
    text-align: center;
  }
  .error-container {
    max-width: 600px;
    margin: 0 auto;
    background: #2d2d2d;
    padding: 30px;
    border-radius: 10px;
    border-left: 4px solid #ff4444;
  }
  pre {
    background: #1e1e1e;
    padding: 15px;
    border-radius: 5px;
    text-align: left;
    margin: 20px 0;
    overflow: auto;
    white-space: pre-wrap;
  }
</style>
</head>
<body>
<div class="error-container">
  <h1>Syntax Error Detected</h1>
  <p>Your code contains syntax errors that prevent execution:</p>
  <pre>"#;

const TAIL: &str = r#"</pre>
  <p>Please fix the errors and try again.</p>
</div>
</body>
</html>
"#;

pub(super) fn render(diagnostic: &StaticDiagnostic) -> SynthesizedDocument {
    let message = escape_html(&diagnostic.message);
    let mut text = String::with_capacity(HEAD.len() + message.len() + TAIL.len());
    text.push_str(HEAD);
    text.push_str(&message);
    text.push_str(TAIL);
    SynthesizedDocument {
        kind: DocumentKind::Diagnostic,
        text,
    }
}
