use annograph::*;
use serde_json::{json, Value};

#[allow(dead_code)]
pub const CARGO_MANIFEST_DIR: &'static str = env!("CARGO_MANIFEST_DIR");

/// Returns the full path of a file in the test data directory
#[allow(dead_code)]
pub fn datafile(name: &str) -> String {
    format!("{}/tests/data/{}", CARGO_MANIFEST_DIR, name)
}

/// A configuration matching the test data directory, loaded from its properties file
#[allow(dead_code)]
pub fn setup_config() -> Result<Config, AnnoError> {
    Config::from_properties_file(&datafile("config.properties"))
}

/// A programmatic configuration with two annotation groups
#[allow(dead_code)]
pub fn setup_config_builder() -> Result<Config, AnnoError> {
    ConfigBuilder::new()
        .with_text_key("text")
        .with_tokens_key("tokens")
        .with_metadata_key("meta")
        .with_token_keys("tok", "ini", "end")
        .with_annotation_keys("val", "ini", "end")
        .with_group("persons", "person")
        .with_group("motives", "motive")
        .build()
}

/// Builds a document consisting of `count` tokens, with one person annotation per token
/// and one motive annotation covering everything. If `broken` is set, the motive annotation
/// ends one beyond the last token.
#[allow(dead_code)]
pub fn make_document(count: usize, broken: bool) -> Value {
    let mut text = String::new();
    let mut tokens = Vec::with_capacity(count);
    let mut persons = Vec::with_capacity(count);
    for i in 0..count {
        if i > 0 {
            text.push(' ');
        }
        let word = format!("w{}", i);
        let begin = text.chars().count();
        text.push_str(&word);
        let end = text.chars().count();
        tokens.push(json!({"tok": word, "ini": begin, "end": end}));
        persons.push(json!({"val": format!("P{}", i), "ini": i, "end": i}));
    }
    let last = if broken { count } else { count - 1 };
    json!({
        "text": text,
        "tokens": tokens,
        "meta": { "title": "generated" },
        "persons": persons,
        "motives": [ {"val": "all", "ini": 0, "end": last} ]
    })
}
