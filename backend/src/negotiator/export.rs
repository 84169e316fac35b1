//! Building the export payload for the negotiator system.

use std::sync::LazyLock;

use regex::Regex;

use common::negotiator_query::NegotiatorQuery;

use crate::query::rsql::{and, in_query, transform_to_rsql};

const CUSTOM_SELECTION_SUFFIX: &str = " and with custom collection selection.";
const CUSTOM_SELECTION_ONLY: &str = "Custom collection selection.";

// The negotiator hands out a 32 character edit token; a URL sent back to
// it must not carry the token again or edits would stack up.
static N_TOKEN_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&nToken=\w{32}").expect("valid nToken pattern"));

pub fn strip_n_token(url: &str) -> String {
    N_TOKEN_PARAM.replace_all(url, "").into_owned()
}

/// Assemble the export payload. When `custom_collection_ids` is given (the
/// user hand-picked collections), the compiled query is replaced by an
/// `in`-query over exactly those ids and the summary gets a fixed suffix.
pub fn negotiator_query(
    url: &str,
    entity_id: &str,
    rsql: &str,
    n_token: Option<&str>,
    human_readable: &str,
    custom_collection_ids: Option<&[String]>,
) -> NegotiatorQuery {
    let (rsql, human_readable) = match custom_collection_ids {
        Some(collection_ids) => {
            let rsql = transform_to_rsql(&and(in_query("id", collection_ids)));
            let human_readable = if human_readable.is_empty() {
                CUSTOM_SELECTION_ONLY.to_string()
            } else {
                format!("{human_readable}{CUSTOM_SELECTION_SUFFIX}")
            };
            (rsql, human_readable)
        }
        None => (rsql.to_string(), human_readable.to_string()),
    };
    NegotiatorQuery {
        url: strip_n_token(url),
        entity_id: entity_id.to_string(),
        rsql,
        n_token: n_token.map(|t| t.to_string()),
        human_readable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn n_token_is_stripped_from_the_url() {
        let url = format!("https://example.org/explorer?country=NL&nToken={TOKEN}&materials=RNA");
        assert_eq!(
            strip_n_token(&url),
            "https://example.org/explorer?country=NL&materials=RNA"
        );
    }

    #[test]
    fn short_tokens_are_left_alone() {
        let url = "https://example.org/explorer?country=NL&nToken=short";
        assert_eq!(strip_n_token(url), url);
    }

    #[test]
    fn compiled_query_passes_through_without_custom_selection() {
        let query = negotiator_query(
            "https://example.org/explorer?materials=CELL_LINES",
            "eu_bbmri_eric_collections",
            "materials=in=CELL_LINES",
            None,
            "selected material types are CELL_LINES",
            None,
        );
        assert_eq!(query.rsql, "materials=in=CELL_LINES");
        assert_eq!(
            query.human_readable,
            "selected material types are CELL_LINES"
        );
    }

    #[test]
    fn custom_selection_overrides_the_compiled_query() {
        let collection_ids = vec!["collection1".to_string(), "collection2".to_string()];
        let query = negotiator_query(
            "https://example.org/explorer",
            "eu_bbmri_eric_collections",
            "materials=in=CELL_LINES",
            Some(TOKEN),
            "selected material types are CELL_LINES",
            Some(&collection_ids),
        );
        assert_eq!(query.rsql, "id=in=(collection1,collection2)");
        assert_eq!(
            query.human_readable,
            "selected material types are CELL_LINES and with custom collection selection."
        );
        assert_eq!(query.n_token.as_deref(), Some(TOKEN));
    }

    #[test]
    fn custom_selection_with_no_active_filters_uses_the_fixed_sentence() {
        let collection_ids = vec!["collection1".to_string()];
        let query = negotiator_query(
            "https://example.org/explorer",
            "eu_bbmri_eric_collections",
            "",
            None,
            "",
            Some(&collection_ids),
        );
        assert_eq!(query.human_readable, "Custom collection selection.");
    }
}
