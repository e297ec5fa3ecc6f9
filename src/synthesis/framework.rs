//! Framework-mode shell
//!
//! The shell declares the `#root` mount element, loads the framework runtime and the
//! in-browser transpiler from the configured allowlist, embeds the entry source
//! as an inert JSON string in an `application/json` script, and ends with a harness that transpiles,
//! evaluates and mounts the entry's default export.
//!
//! When the entry does not satisfy the component contract, or its evaluated export is
//! not callable, the harness mounts [`SCAFFOLD_COMPONENT`] instead. That fallback is a
//! rendering choice, not an error.

use super::console::shim_block;
use super::{escape_html, escape_style, DocumentKind, SynthesizedDocument};
use crate::config::RuntimeConfig;
use crate::entry::ResolvedEntries;

/// Structural check on the entry source: mentions a function, a return and an export.
///
/// This is intentionally the same loose text check the editor has always used. It
/// can accept code that is not a component and reject components written as arrow
/// functions; both cases end up on the scaffold or the runtime check, never on a
/// blank preview.
pub fn satisfies_component_contract(source: &str) -> bool {
    source.contains("function") && source.contains("return") && source.contains("export")
}

/// Entry source as it is embedded in the framework shell: a JSON string literal with
/// `<` written as `\u003c`, so no sequence in the source can close the element and
/// the harness hands Babel the exact original text.
pub fn encode_entry_source(source: &str) -> String {
    serde_json::Value::String(source.to_string())
        .to_string()
        .replace('<', "\\u003c")
}

/// Fallback component mounted when the entry cannot be used
pub const SCAFFOLD_COMPONENT: &str = r#"function Scaffold() {
    var greeting = React.useState(false);
    var greeted = greeting[0];
    var setGreeted = greeting[1];
    return React.createElement('div', {
      style: {
        textAlign: 'center',
        padding: '50px 20px',
        background: 'linear-gradient(135deg, #667eea 0%, #764ba2 100%)',
        minHeight: '100vh',
        color: 'white',
        fontFamily: 'Arial, sans-serif'
      }
    }, [
      React.createElement('h1', { key: 'title', style: { fontSize: '2.5em', marginBottom: '20px' } },
        'Welcome to Live Preview!'),
      React.createElement('p', { key: 'subtitle', style: { fontSize: '1.2em', marginBottom: '30px', opacity: 0.9 } },
        'Export a component from your entry file to render it here.'),
      React.createElement('button', {
        key: 'button',
        onClick: function () { setGreeted(true); },
        style: {
          padding: '12px 24px',
          background: '#007acc',
          color: 'white',
          border: 'none',
          borderRadius: '8px',
          cursor: 'pointer',
          fontSize: '16px',
          marginTop: '20px'
        }
      }, 'Click Me!'),
      greeted ? React.createElement('p', { key: 'greeting', style: { marginTop: '20px' } },
        'Hello from Live Preview!') : null
    ]);
  }"#;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>Live Preview</title>
<style>
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
    background: #ffffff;
    color: #333;
  }
  #root { min-height: 100vh; width: 100%; }
  .preview-loading {
    padding: 40px;
    text-align: center;
    color: #888;
    min-height: 100vh;
    display: flex;
    flex-direction: column;
    justify-content: center;
    align-items: center;
  }
</style>
"#;

const BODY_OPEN: &str = r#"</head>
<body>
<div id="root"><div class="preview-loading"><h2>Loading your app...</h2></div></div>
"#;

const HARNESS: &str = r#"(function () {
  var CONTRACT_SATISFIED = __CONTRACT__;
  var rootElement = document.getElementById('root');
  var modules = { 'react': React, 'react-dom': ReactDOM, 'react-dom/client': ReactDOM };

  __SCAFFOLD__

  function mount(Component) {
    var element = React.createElement(Component);
    if (typeof ReactDOM.createRoot === 'function') {
      ReactDOM.createRoot(rootElement).render(element);
    } else {
      ReactDOM.render(element, rootElement);
    }
  }

  function requireModule(name) {
    if (Object.prototype.hasOwnProperty.call(modules, name)) { return modules[name]; }
    if (/\.css$/.test(name)) { return {}; }
    throw new Error('Cannot resolve module ' + name);
  }

  function evaluateEntry() {
    var entry = document.getElementById('preview-entry');
    var compiled = Babel.transform(JSON.parse(entry.textContent), {
      presets: ['env', 'react'],
      filename: entry.getAttribute('data-path') || 'entry.jsx'
    }).code;
    var module = { exports: {} };
    new Function('require', 'module', 'exports', 'React', 'ReactDOM', compiled)(
      requireModule, module, module.exports, React, ReactDOM);
    var exported = module.exports;
    if (exported && typeof exported['default'] === 'function') { return exported['default']; }
    if (typeof exported === 'function') { return exported; }
    if (exported && typeof exported.App === 'function') { return exported.App; }
    return null;
  }

  console.log('Starting preview application...');
  if (!CONTRACT_SATISFIED) {
    console.warn('Entry does not look like an exported component; rendering scaffold');
    mount(Scaffold);
    return;
  }
  try {
    var Component = evaluateEntry();
    if (Component === null) {
      console.warn('Entry exports no component; rendering scaffold');
      mount(Scaffold);
      return;
    }
    mount(Component);
    console.log('Component mounted');
  } catch (err) {
    console.error('Initialization error:', err);
    window.__previewRenderError('Initialization Error', String(err));
  }
})();"#;

pub(super) fn render(entries: &ResolvedEntries, runtime: &RuntimeConfig) -> SynthesizedDocument {
    let source = entries.script.content.as_str();
    let entry_path = entries.script.path.as_deref().unwrap_or("/entry.jsx");
    let contract = satisfies_component_contract(source);

    let mut text = String::new();
    text.push_str(HEAD);
    text.push_str(&format!("<style>\n{}\n</style>\n", escape_style(&entries.style.content)));
    text.push_str(&shim_block());
    text.push_str(BODY_OPEN);

    text.push_str(&format!(
        "<script type=\"application/json\" id=\"preview-entry\" data-path=\"{}\">",
        escape_html(entry_path)
    ));
    text.push_str(&encode_entry_source(source));
    text.push_str("</script>\n");

    for url in &runtime.framework_scripts {
        text.push_str(&format!(
            "<script crossorigin src=\"{}\"></script>\n",
            escape_html(url)
        ));
    }
    text.push_str(&format!("<script src=\"{}\"></script>\n", escape_html(&runtime.transpiler)));

    let harness = HARNESS
        .replace("__CONTRACT__", if contract { "true" } else { "false" })
        .replace("__SCAFFOLD__", SCAFFOLD_COMPONENT);
    text.push_str("<script>\n");
    text.push_str(&harness);
    text.push_str("\n</script>\n</body>\n</html>\n");

    SynthesizedDocument {
        kind: DocumentKind::Framework,
        text,
    }
}
