use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // An unterminated `<` swallows the rest of the text.
    static ref MARKUP: Regex = Regex::new(r"<[^>]*>?|&quot;|&#39;").unwrap();
}

/// Strips markup tags and the `&quot;` / `&#39;` entities. Every other
/// character, other entities included, is kept as is.
pub fn clean_text(raw: &str) -> String {
    let mut text = MARKUP.replace_all(raw, "").into_owned();
    // Removing an entity can splice a new one together ("&&quot;quot;").
    while MARKUP.is_match(&text) {
        text = MARKUP.replace_all(&text, "").into_owned();
    }
    text
}
