//! Custom assertions para tests.

use serde_json::Value;

/// Verifica que un valor tenga la forma de la metadata de una pagina.
pub fn assert_page_meta_schema(meta: &Value) {
    let obj = meta.as_object().expect("Page meta should be a JSON object");

    for field in ["title", "description"] {
        assert!(obj[field].is_string(), "'{}' should be a string", field);
    }

    let og = obj["og"].as_object().expect("'og' should be an object");
    for field in ["title", "type", "image", "url"] {
        assert!(og[field].is_string(), "'og.{}' should be a string", field);
    }
}

/// Verifica que el body sea un objeto `{url: meta | null}` con exactamente esas keys.
pub fn assert_batch_keys(json: &Value, expected: &[&str]) {
    let obj = json.as_object().expect("Batch response should be a JSON object");

    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), expected.len(), "Unexpected keys: {:?}", keys);
    for url in expected {
        assert!(obj.contains_key(*url), "Missing key '{}'", url);
    }

    for value in obj.values().filter(|v| !v.is_null()) {
        assert_page_meta_schema(value);
    }
}
