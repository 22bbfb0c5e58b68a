use pagewatch_engine::{
    decode_body, ExtractError, Extractor, FailureKind, FetchMetadata, FetchOutput,
    SelectorExtractor,
};
use pretty_assertions::assert_eq;

const PAGE: &str = r#"
<html><head><title>Shop</title></head>
<body>
    <h1 id="name">Widget</h1>
    <p class="price">10 EUR</p>
    <p class="price">12 EUR</p>
</body></html>
"#;

fn selectors(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn no_selectors_means_empty_content() {
    let extracted = SelectorExtractor.extract(PAGE, &[]).unwrap();
    assert_eq!(extracted, "");

    // Not even parsed: garbage input is fine.
    let extracted = SelectorExtractor.extract("\u{0}<<<", &[]).unwrap();
    assert_eq!(extracted, "");
}

#[test]
fn first_match_of_each_selector_is_joined_in_order() {
    let extracted = SelectorExtractor
        .extract(PAGE, &selectors(&["p.price", "#name"]))
        .unwrap();
    assert_eq!(
        extracted,
        r#"<p class="price">10 EUR</p>,<h1 id="name">Widget</h1>"#
    );
}

#[test]
fn unmatched_selector_fails_whole_extraction() {
    let err = SelectorExtractor
        .extract(PAGE, &selectors(&["#name", "div.missing"]))
        .unwrap_err();
    assert_eq!(err, ExtractError::NoMatch("div.missing".into()));
    assert_eq!(err.to_string(), "no element matches \"div.missing\"");
}

#[test]
fn invalid_selector_is_reported() {
    let err = SelectorExtractor
        .extract(PAGE, &selectors(&["p[["]))
        .unwrap_err();
    assert!(matches!(err, ExtractError::InvalidSelector { ref selector, .. } if selector == "p[["));
}

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_body(bytes, Some("text/html; charset=ISO-8859-1")).unwrap();
    assert_eq!(decoded.text, "café");
    assert!(
        decoded.encoding_label.eq_ignore_ascii_case("ISO-8859-1")
            || decoded.encoding_label.eq_ignore_ascii_case("windows-1252")
    );
}

#[test]
fn decode_strips_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_body(bytes, Some("text/html")).unwrap();
    assert_eq!(decoded.text, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_then_extract_is_deterministic() {
    let bytes = br#"<html><body><div id="a"><p>A</p><p>B</p></div></body></html>"#;
    let decoded = decode_body(bytes, Some("text/html; charset=utf-8")).unwrap();
    let first = SelectorExtractor
        .extract(&decoded.text, &selectors(&["#a"]))
        .unwrap();
    let second = SelectorExtractor
        .extract(&decoded.text, &selectors(&["#a"]))
        .unwrap();
    assert_eq!(first, r#"<div id="a"><p>A</p><p>B</p></div>"#);
    assert_eq!(first, second);
}

#[test]
fn body_invalid_in_declared_charset_is_a_decode_failure() {
    let output = FetchOutput {
        bytes: b"caf\xe9".to_vec(),
        metadata: FetchMetadata {
            original_url: "https://example.com".into(),
            final_url: "https://example.com".into(),
            status: 200,
            redirect_count: 0,
            content_type: Some("text/html; charset=utf-8".into()),
            byte_len: 4,
        },
    };

    let err = output.text().unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert_eq!(err.message, "body is not valid UTF-8");
}
