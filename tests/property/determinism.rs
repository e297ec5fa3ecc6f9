//! Property-based tests for classification and synthesis

use livepreview::classify::classify;
use livepreview::diagnose::detect;
use livepreview::files::ProjectFileSet;
use livepreview::synthesis::DocumentSynthesizer;
use livepreview::ModeClassification;
use proptest::prelude::*;

/// Script text drawn from words that never form a framework marker
fn plain_script() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "const", "let", "x", "=", "1;", "document.getElementById('a')", "console.log(x);",
            "if", "(x)", "{", "}", "\n", "el.textContent", "'<p>'", "return", "x;", "+",
        ]),
        0..40,
    )
    .prop_map(|words| words.join(" "))
}

fn identifier() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,8}"
}

/// Test that a snapshot without markers always classifies as plain
#[test]
fn test_plain_mode_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(plain_script(), plain_script(), "[a-z]{1,8}"),
            |(script, other, name)| {
                let files = ProjectFileSet::from_files([
                    ("/script.js".to_string(), script),
                    (format!("/{}.js", name), other),
                ])
                .unwrap();
                assert_eq!(classify(&files), ModeClassification::Plain);
                Ok(())
            },
        )
        .unwrap();
}

/// Test that a function returning markup always classifies as framework
#[test]
fn test_framework_structural_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(identifier(), "[a-z]{1,6}", plain_script(), any::<bool>()),
            |(component, tag, prefix, parenthesized)| {
                let body = if parenthesized {
                    format!("return (<{tag}/>);")
                } else {
                    format!("return <{tag}>x</{tag}>;")
                };
                let script = format!("{prefix}\nfunction {component}() {{ {body} }}");
                let files = ProjectFileSet::from_files([("/main.js", script)]).unwrap();
                assert_eq!(classify(&files), ModeClassification::Framework);
                Ok(())
            },
        )
        .unwrap();
}

/// Test that synthesis is a pure function of its inputs
#[test]
fn test_synthesis_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let synthesizer = DocumentSynthesizer::default();

    runner
        .run(
            &(
                prop::option::of(".{0,200}"),
                ".{0,200}",
                ".{0,100}",
                any::<bool>(),
            ),
            |(markup, script, style, framework)| {
                let mut pairs = vec![
                    ("/script.js".to_string(), script.clone()),
                    ("/styles.css".to_string(), style),
                ];
                if let Some(markup) = markup {
                    pairs.push(("/index.html".to_string(), markup));
                }
                let files = ProjectFileSet::from_files(pairs).unwrap();
                let mode = if framework {
                    ModeClassification::Framework
                } else {
                    ModeClassification::Plain
                };
                let diagnostic = detect(&script);

                let first = synthesizer.synthesize(&files, mode, diagnostic.as_ref());
                let second = synthesizer.synthesize(&files.clone(), mode, diagnostic.as_ref());
                assert_eq!(first, second);
                assert_eq!(first.fingerprint(), second.fingerprint());
                assert!(!first.is_empty());
                Ok(())
            },
        )
        .unwrap();
}
