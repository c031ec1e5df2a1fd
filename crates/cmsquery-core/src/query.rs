//! Query text for the repository's SQL-like query dialect.
//!
//! Every literal that ends up inside a query passes through [`quote_literal`].
//! Identifiers are never escaped: anything that could break out of a
//! single-quoted literal is rejected instead.

use crate::error::{Error, Result};
use crate::types::Identifier;

/// Virtual tables searched by every query.
pub const TABLES: &str = "CI_INFOOBJECTS, CI_APPOBJECTS, CI_SYSTEMOBJECTS";

const QUOTE: char = '\'';

/// Quote one identifier as a string literal.
///
/// Rejects empty identifiers and those containing a quote, a backslash or a
/// control character.
pub fn quote_literal(id: &Identifier) -> Result<String> {
    let s = id.as_str();
    let reason = if s.is_empty() {
        Some("empty identifier")
    } else if s.contains(QUOTE) {
        Some("contains a quote character")
    } else if s.contains('\\') {
        Some("contains a backslash")
    } else if s.chars().any(char::is_control) {
        Some("contains a control character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidIdentifier {
            id: s.to_string(),
            reason,
        }),
        None => Ok(format!("{QUOTE}{s}{QUOTE}")),
    }
}

/// Quoted, comma-joined identifiers for an `IN (...)` predicate.
pub fn in_list<'a, I>(ids: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Identifier>,
{
    let quoted = ids
        .into_iter()
        .map(quote_literal)
        .collect::<Result<Vec<_>>>()?;
    if quoted.is_empty() {
        return Err(Error::EmptySelection);
    }
    Ok(quoted.join(","))
}

/// Direct children (CUID and kind) of every folder in `parents`.
pub fn children_query<'a, I>(parents: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Identifier>,
{
    Ok(format!(
        "SELECT SI_CUID, SI_KIND FROM {TABLES} WHERE SI_PARENT_CUID IN ({})",
        in_list(parents)?
    ))
}

/// Bulk metadata lookup of every object in `ids`.
pub fn lookup_query<'a, I>(ids: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Identifier>,
{
    Ok(format!(
        "SELECT * FROM {TABLES} WHERE SI_CUID IN ({})",
        in_list(ids)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<Identifier> {
        v.iter().map(|s| Identifier::from(*s)).collect()
    }

    #[test]
    fn children_query_shape() {
        let q = children_query(&ids(&["A", "B"])).unwrap();
        assert_eq!(
            q,
            "SELECT SI_CUID, SI_KIND FROM CI_INFOOBJECTS, CI_APPOBJECTS, CI_SYSTEMOBJECTS \
             WHERE SI_PARENT_CUID IN ('A','B')"
        );
    }

    #[test]
    fn lookup_query_shape() {
        let q = lookup_query(&ids(&["F1"])).unwrap();
        assert_eq!(
            q,
            "SELECT * FROM CI_INFOOBJECTS, CI_APPOBJECTS, CI_SYSTEMOBJECTS WHERE SI_CUID IN ('F1')"
        );
    }

    #[test]
    fn quote_rejects_breakout_characters() {
        for bad in ["", "a'b", "a\\b", "a\nb"] {
            let err = quote_literal(&Identifier::from(bad)).unwrap_err();
            assert!(matches!(err, Error::InvalidIdentifier { .. }), "{bad:?}");
        }
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(in_list(&ids(&[])), Err(Error::EmptySelection)));
    }

    #[test]
    fn one_bad_identifier_fails_the_whole_list() {
        assert!(in_list(&ids(&["ok", "n'ok"])).is_err());
    }
}
