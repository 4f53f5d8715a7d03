//! Float-list resource parsing.
//!
//! Geometry blobs are human-edited text: floats separated by commas,
//! spaces, tabs, or newlines, with `//` line comments. The same blob must
//! yield identical values everywhere, so parsing goes through
//! `f32::from_str` — decimal point is always `.`, independent of any
//! system locale.

/// Result of parsing a float-list blob.
///
/// Parsing never fails as a whole: `values` holds every float that parsed,
/// in input order, and `skipped` the non-numeric tokens that were dropped
/// so callers can surface a diagnostic instead of drawing garbage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatList {
    pub values: Vec<f32>,
    pub skipped: Vec<String>,
}

/// Parses a float-list blob.
///
/// A token containing `//` ends its line: the token itself and everything
/// after it are treated as a comment.
pub fn parse_float_list(input: &str) -> FloatList {
    let mut list = FloatList::default();

    for line in input.lines() {
        for token in line.split([',', ' ', '\t']) {
            if token.is_empty() {
                continue;
            }
            if token.contains("//") {
                break;
            }
            match token.parse::<f32>() {
                Ok(value) => list.values.push(value),
                Err(_) => list.skipped.push(token.to_owned()),
            }
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(input: &str) -> Vec<f32> {
        parse_float_list(input).values
    }

    // ── separators ────────────────────────────────────────────────────────

    #[test]
    fn splits_on_commas_spaces_tabs_and_newlines() {
        assert_eq!(values("1.0,2.0 3.0\t4.0\n5.0"), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn consecutive_separators_collapse() {
        assert_eq!(values("1.0,,  2.0\n\n3.0"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn negative_and_exponent_forms_parse() {
        assert_eq!(values("-1.5 2e3 0.25"), vec![-1.5, 2000.0, 0.25]);
    }

    // ── comments ──────────────────────────────────────────────────────────

    #[test]
    fn comment_line_is_skipped() {
        assert_eq!(values("1.0, 2.0 3.0\n// 9.9\n4.0"), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn comment_after_data_skips_rest_of_line() {
        assert_eq!(values("1.0 // trailing 9.9\n2.0"), vec![1.0, 2.0]);
    }

    #[test]
    fn token_containing_marker_is_dropped_with_its_line() {
        // "1.0//x" is a comment token, not a float followed by a comment.
        assert_eq!(values("1.0//x 9.9\n2.0"), vec![2.0]);
    }

    // ── skipped tokens ────────────────────────────────────────────────────

    #[test]
    fn non_numeric_tokens_are_recorded_not_fatal() {
        let list = parse_float_list("1.0 banana 2.0");
        assert_eq!(list.values, vec![1.0, 2.0]);
        assert_eq!(list.skipped, vec!["banana".to_owned()]);
    }

    #[test]
    fn empty_and_comment_only_input_yields_nothing() {
        assert_eq!(parse_float_list(""), FloatList::default());
        assert_eq!(parse_float_list("// nothing\n//here"), FloatList::default());
    }

    // ── round trip ────────────────────────────────────────────────────────

    #[test]
    fn comma_reemission_round_trips_bit_exactly() {
        let first = values("0.5, -1.25 3.0\n// comment\n1e-3 42.0");
        let emitted = first
            .iter()
            .map(|v| format!("{v:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        let second = values(&emitted);
        assert_eq!(
            first.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            second.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
        );
    }
}
