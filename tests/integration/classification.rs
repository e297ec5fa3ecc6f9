//! Mode classification over realistic project snapshots

use super::test_utils::{project, COMPONENT};
use livepreview::classify::{classify, classify_detailed, MarkerKind, MARKERS};
use livepreview::ModeClassification;

#[test]
fn test_empty_project_is_plain() {
    assert_eq!(classify(&project(&[])), ModeClassification::Plain);
}

#[test]
fn test_component_entry_is_framework() {
    let report = classify_detailed(&project(&[("/App.js", COMPONENT)]));
    assert_eq!(report.mode, ModeClassification::Framework);
    assert!(report
        .hits
        .iter()
        .any(|hit| hit.kind == MarkerKind::ComponentShape && hit.path == "/App.js"));
}

#[test]
fn test_plain_dom_scripting_stays_plain() {
    let files = project(&[
        ("/index.html", "<html><body><div id=\"out\"></div></body></html>"),
        (
            "/script.js",
            "const el = document.createElement('p');\nel.textContent = 'hi';\ndocument.body.appendChild(el);",
        ),
        ("/styles.css", "body { color: red; }"),
    ]);
    assert_eq!(classify(&files), ModeClassification::Plain);
}

#[test]
fn test_markers_in_non_script_files_are_ignored() {
    let files = project(&[
        ("/README.md", "import React from 'react';\nuseState()"),
        ("/index.html", "<script>function A(){ return (<div/>) }</script>"),
    ]);
    assert_eq!(classify(&files), ModeClassification::Plain);
}

#[test]
fn test_each_marker_family_alone_is_sufficient() {
    let cases: &[(&str, &str)] = &[
        ("/Widget.jsx", "export const x = 1;"),
        ("/main.js", "import React from 'react';"),
        ("/main.js", "const { render } = require('react-dom');"),
        ("/main.js", "const [n, setN] = useState(0);"),
        ("/main.js", "useEffect(() => {}, []);"),
        ("/main.js", "React.createElement('div');"),
        ("/main.js", "const App = () => { return <section/>; };"),
    ];
    for (path, content) in cases {
        assert_eq!(
            classify(&project(&[(path, content)])),
            ModeClassification::Framework,
            "{path}: {content}"
        );
    }
}

#[test]
fn test_marker_table_covers_every_family() {
    for kind in [
        MarkerKind::ComponentSyntax,
        MarkerKind::RuntimeImport,
        MarkerKind::FrameworkApi,
        MarkerKind::ComponentShape,
    ] {
        assert!(MARKERS.iter().any(|marker| marker.kind == kind), "{kind:?}");
    }
}
