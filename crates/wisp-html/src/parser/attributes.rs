use wisp_dom::AttributesMap;

/// Split tag markup into a lower-cased tag name and its attributes.
///
/// The markup is split on whitespace. The first piece names the tag; every
/// other piece is `key=value`, split at the first `=`. A piece with no `=`
/// is a boolean attribute with an empty value. Values wrapped in matching
/// single or double quotes lose the quotes. Keys are lower-cased and a later
/// duplicate overwrites an earlier one.
///
/// Because splitting happens before quotes are looked at, a quoted value
/// containing spaces is cut at the first space.
#[must_use]
pub fn parse_tag(markup: &str) -> (String, AttributesMap) {
    let mut pieces = markup.split_whitespace();
    let tag = pieces.next().unwrap_or_default().to_lowercase();
    let mut attributes = AttributesMap::new();

    for piece in pieces {
        let (key, value) = match piece.split_once('=') {
            Some((key, value)) => (key, strip_quotes(value)),
            None => (piece, ""),
        };
        let _ = attributes.insert(key.to_lowercase(), value.to_string());
    }

    (tag, attributes)
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
