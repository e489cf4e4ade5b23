//! Channel selection from the request query string.
//!
//! Every query parameter key names a channel to subscribe to; values are
//! ignored. `GET /?news&sports` selects the channels `news` and `sports`.

/// Extract the channel set from a raw query string.
///
/// Duplicate keys collapse to one channel and the order of first
/// appearance is kept for the subscribe call. Keys are percent-decoded.
/// A missing or malformed query degrades to no channels (a valid, if
/// silent, subscription) rather than failing the request.
pub fn from_query(query: Option<&str>) -> Vec<String> {
    let Some(query) = query else {
        return Vec::new();
    };

    let mut channels: Vec<String> = Vec::new();
    for (key, _value) in form_urlencoded::parse(query.as_bytes()) {
        let key = key.into_owned();
        if key.is_empty() || channels.contains(&key) {
            continue;
        }
        channels.push(key);
    }
    channels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_keys_become_channels() {
        assert_eq!(from_query(Some("news&sports")), ["news", "sports"]);
    }

    #[test]
    fn values_are_ignored() {
        assert_eq!(from_query(Some("news=1&sports=latest")), ["news", "sports"]);
    }

    #[test]
    fn duplicate_keys_collapse() {
        assert_eq!(from_query(Some("news&sports&news")), ["news", "sports"]);
    }

    #[test]
    fn empty_and_missing_queries_select_nothing() {
        assert!(from_query(Some("")).is_empty());
        assert!(from_query(None).is_empty());
    }

    #[test]
    fn keys_are_percent_decoded() {
        assert_eq!(from_query(Some("rock%20news&a+b")), ["rock news", "a b"]);
    }

    #[test]
    fn empty_keys_are_dropped() {
        assert_eq!(from_query(Some("=orphan&news")), ["news"]);
    }
}
