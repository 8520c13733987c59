//! Extractor against a live DOM. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use phosent::config::SiteProfile;
use phosent::extractor::extract_article;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document_with(body: &str) -> web_sys::Document {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(body);
    document
}

#[wasm_bindgen_test]
fn extracts_title_and_paragraphs() {
    let document = document_with(
        r#"<h1 class="detail__title"> Thị trường tăng </h1>
           <div class="detail__content"><p>A.</p><p> B. </p></div>"#,
    );

    let payload = extract_article(&document, &SiteProfile::default(), 1.0).unwrap();

    assert_eq!(payload.title, "Thị trường tăng");
    assert_eq!(payload.content, "A.\nB.\n");
}

#[wasm_bindgen_test]
fn degrades_on_missing_elements() {
    let document = document_with("<p>unrelated</p>");
    let site = SiteProfile::default();

    let payload = extract_article(&document, &site, 1.0).unwrap();

    assert_eq!(payload.title, site.missing_title_placeholder);
    assert_eq!(payload.content, "");
}

#[wasm_bindgen_test]
fn invalid_selector_fails() {
    let document = document_with("");
    let site = SiteProfile {
        title_selector: "h1[[".to_string(),
        ..SiteProfile::default()
    };

    assert!(extract_article(&document, &site, 1.0).is_err());
}
