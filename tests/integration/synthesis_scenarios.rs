//! End-to-end synthesis scenarios: detect, classify, synthesize

use super::test_utils::{project, COMPONENT};
use livepreview::config::RuntimeConfig;
use livepreview::entry::EntryConventions;
use livepreview::synthesis::{
    encode_entry_source, DocumentKind, DocumentSynthesizer, SCAFFOLD_COMPONENT,
};
use livepreview::{classify, detect, synthesize, ModeClassification};

#[test]
fn test_empty_project_yields_default_shell() {
    let files = project(&[]);
    let mode = classify(&files);
    assert_eq!(mode, ModeClassification::Plain);

    let document = synthesize(&files, mode, None);
    assert_eq!(document, DocumentSynthesizer::default().default_shell());
    assert!(document.as_str().contains("Show Current Time"));
}

#[test]
fn test_component_project_embeds_harness_and_source() {
    let files = project(&[("/App.js", COMPONENT)]);
    assert!(detect(COMPONENT).is_none());
    let mode = classify(&files);
    assert_eq!(mode, ModeClassification::Framework);

    let document = synthesize(&files, mode, None);
    let text = document.as_str();
    assert_eq!(document.kind(), DocumentKind::Framework);
    assert!(text.contains(&encode_entry_source(COMPONENT)));
    assert!(text.contains("Babel.transform"));
    assert!(text.contains("var CONTRACT_SATISFIED = true;"));
    assert!(text.contains("<div id=\"root\">"));
}

#[test]
fn test_custom_markup_is_spliced_not_replaced() {
    let markup = "<!DOCTYPE html>\n<html>\n<head><title>Mine</title></head>\n<body>\n<main id=\"app\">Hello</main>\n</body>\n</html>\n";
    let files = project(&[
        ("/index.html", markup),
        ("/script.js", "document.getElementById('app').textContent = 'Hi';"),
        ("/styles.css", "main { color: teal; }"),
    ]);
    let document = synthesize(&files, classify(&files), None);
    let text = document.as_str();

    assert_eq!(document.kind(), DocumentKind::PlainCustomMarkup);
    assert!(text.contains("<title>Mine</title>"));
    assert!(text.contains("<main id=\"app\">Hello</main>"));
    assert!(!text.contains("Show Current Time"));

    let style_at = text.find("main { color: teal; }").unwrap();
    let head_close = text.find("</head>").unwrap();
    assert!(style_at < head_close);

    let script_at = text.find("textContent = 'Hi'").unwrap();
    assert!(script_at > text.find("<main").unwrap());
    assert!(script_at < text.rfind("</body>").unwrap());
}

#[test]
fn test_interception_precedes_user_script() {
    let files = project(&[("/script.js", "console.log('first');")]);
    let document = synthesize(&files, ModeClassification::Plain, None);
    let text = document.as_str();
    assert!(text.find("postMessage").unwrap() < text.find("console.log('first')").unwrap());
}

#[test]
fn test_truncated_export_shows_only_the_diagnostic_page() {
    let files = project(&[("/App.js", "port default App")]);
    let diagnostic = detect("port default App").unwrap();
    let document = synthesize(&files, classify(&files), Some(&diagnostic));
    assert_eq!(document.kind(), DocumentKind::Diagnostic);
    assert!(document.as_str().contains("Syntax Error Detected"));
    assert!(detect("export default App").is_none());
}

#[test]
fn test_script_close_tag_in_user_code_is_neutralised() {
    let files = project(&[("/script.js", "const s = '</script><script>alert(1)</script>';")]);
    let document = synthesize(&files, ModeClassification::Plain, None);
    assert!(!document.as_str().contains("'</script><script>alert(1)"));
    assert!(document.as_str().contains("<\\/script>"));
}

#[test]
fn test_arrow_component_falls_back_to_scaffold() {
    let files = project(&[("/App.jsx", "const App = () => <h1>Hi</h1>;\nexport default App;")]);
    let document = synthesize(&files, classify(&files), None);
    assert_eq!(document.kind(), DocumentKind::Framework);
    assert!(document.as_str().contains("var CONTRACT_SATISFIED = false;"));
    assert!(document.as_str().contains(SCAFFOLD_COMPONENT));
}

#[test]
fn test_runtime_resources_follow_configuration() {
    let runtime = RuntimeConfig {
        framework_scripts: vec!["https://cdn.example/react.js".to_string()],
        transpiler: "https://cdn.example/babel.js".to_string(),
    };
    let synthesizer = DocumentSynthesizer::new(EntryConventions::default(), runtime);
    let files = project(&[("/App.js", COMPONENT)]);
    let text = synthesizer
        .synthesize(&files, ModeClassification::Framework, None)
        .into_string();
    assert!(text.contains("src=\"https://cdn.example/react.js\""));
    assert!(text.contains("src=\"https://cdn.example/babel.js\""));
    assert!(!text.contains("unpkg.com"));
}

#[test]
fn test_doctype_without_optional_tags_keeps_standards_mode() {
    let files = project(&[
        ("/index.html", "<!DOCTYPE html>\n<body><p id=\"x\">hi</p></body>"),
        ("/script.js", "document.getElementById('x').textContent = 'bye';"),
    ]);
    let document = synthesize(&files, classify(&files), None);
    let text = document.as_str();
    assert_eq!(document.kind(), DocumentKind::PlainCustomMarkup);
    assert!(text.starts_with("<!DOCTYPE html>"));
    assert!(text.find("<script").unwrap() > text.find("<!DOCTYPE").unwrap());
}

#[test]
fn test_component_rendering_script_markup_is_embedded_intact() {
    let source = "function App(){ return (<script>x</script>); } export default App;";
    let files = project(&[("/App.js", source)]);
    let document = synthesize(&files, classify(&files), None);
    assert_eq!(document.kind(), DocumentKind::Framework);
    assert!(document.as_str().contains(&encode_entry_source(source)));
    assert!(!document.as_str().contains("x<\\/script>"));
}
