//! Content negotiation for the event-stream representation.
//!
//! Implements enough of RFC 9110 `Accept` handling to answer one question:
//! may this request be answered with `text/event-stream`?

/// The only representation this service offers.
pub const EVENT_STREAM: &str = "text/event-stream";

/// Whether the given `Accept` header value allows `text/event-stream`.
///
/// A missing header means the client accepts anything. Media ranges are
/// matched exactly, by type wildcard (`text/*`) or by full wildcard
/// (`*/*`); the most specific matching range decides, and its `q` weight
/// must be above zero. Unparseable `q` values fall back to 1.
pub fn accepts_event_stream(header: Option<&str>) -> bool {
    let Some(header) = header else {
        return true;
    };

    // (specificity, q) of the best-matching media range seen so far.
    let mut best: Option<(u8, f32)> = None;

    for range in header.split(',') {
        let mut parts = range.split(';');
        let media = match parts.next() {
            Some(media) => media.trim().to_ascii_lowercase(),
            None => continue,
        };
        let specificity = match media.as_str() {
            EVENT_STREAM => 2,
            "text/*" => 1,
            "*/*" => 0,
            _ => continue,
        };
        let q = parts
            .filter_map(|p| p.trim().to_ascii_lowercase().strip_prefix("q=").map(str::to_string))
            .next()
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(1.0);

        match best {
            Some((s, _)) if s > specificity => {}
            Some((s, prev)) if s == specificity => {
                if q > prev {
                    best = Some((specificity, q));
                }
            }
            _ => best = Some((specificity, q)),
        }
    }

    match best {
        Some((_, q)) => q > 0.0,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_accepts_anything() {
        assert!(accepts_event_stream(None));
    }

    #[test]
    fn exact_match() {
        assert!(accepts_event_stream(Some("text/event-stream")));
    }

    #[test]
    fn exact_match_among_others() {
        assert!(accepts_event_stream(Some(
            "text/html;q=0.9, text/event-stream, application/json"
        )));
    }

    #[test]
    fn full_wildcard_matches() {
        assert!(accepts_event_stream(Some("*/*")));
        assert!(accepts_event_stream(Some("text/html, */*;q=0.1")));
    }

    #[test]
    fn type_wildcard_matches() {
        assert!(accepts_event_stream(Some("text/*;q=0.5")));
    }

    #[test]
    fn no_matching_range_is_refused() {
        assert!(!accepts_event_stream(Some("application/json")));
        assert!(!accepts_event_stream(Some("text/html, application/xml;q=0.9")));
    }

    #[test]
    fn explicit_q_zero_is_a_refusal() {
        assert!(!accepts_event_stream(Some("text/event-stream;q=0")));
        // The specific refusal wins over the broad acceptance.
        assert!(!accepts_event_stream(Some("text/event-stream;q=0, */*")));
        assert!(!accepts_event_stream(Some("text/*;q=0, */*")));
    }

    #[test]
    fn case_and_whitespace_are_tolerated() {
        assert!(accepts_event_stream(Some("  TEXT/Event-Stream ; q=0.8 ")));
    }

    #[test]
    fn empty_header_matches_nothing() {
        assert!(!accepts_event_stream(Some("")));
    }

    #[test]
    fn garbage_q_value_defaults_to_one() {
        assert!(accepts_event_stream(Some("text/event-stream;q=banana")));
    }
}
