/// Transform code conventions to human readable strings.
///
/// Splits on underscores, then on uppercase letters, lowercases every word
/// and capitalizes only the first one.
pub fn humanize(text: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for part in text.split('_').filter(|p| !p.is_empty()) {
        let mut word = String::new();
        for c in part.chars() {
            if c.is_uppercase() && !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
            word.extend(c.to_lowercase());
        }
        if !word.is_empty() {
            words.push(word);
        }
    }

    if let Some(first) = words.first_mut() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            *first = c.to_uppercase().chain(chars).collect();
        }
    }
    words.join(" ")
}

/// First non-blank line of a documentation string, trimmed
pub fn doc_label(doc: Option<&str>) -> Option<String> {
    doc?.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Format a float with a fixed number of decimal digits
pub fn format_float(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}
