//! MAQL object reference notation parser using nom.
//!
//! MAQL addresses catalog objects either by URI in square brackets
//! (`[/gdc/md/PROJECT/obj/1]`) or by identifier in curly braces
//! (`{label.product.id}`). Inside either form a backslash escapes the next
//! `]`, `}` or `\`, which is how [`ObjQualifier`]'s `Display` writes values
//! containing their closing delimiter.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_till1},
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{all_consuming, map, map_res},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::error::{ModelError, ModelResult};
use crate::qualifier::ObjQualifier;

/// Parses a MAQL object reference into a qualifier.
///
/// ```rust
/// use gooddata_model::ObjQualifier;
///
/// let q: ObjQualifier = "[/gdc/md/p/obj/1]".parse().unwrap();
/// assert!(q.is_uri());
///
/// let q: ObjQualifier = "{label.id}".parse().unwrap();
/// assert!(!q.is_uri());
///
/// let q: ObjQualifier = r"{odd\}id}".parse().unwrap();
/// assert_eq!(q.as_identifier().unwrap().identifier(), "odd}id");
/// ```
pub fn parse_reference(input: &str) -> ModelResult<ObjQualifier> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ModelError::empty("reference"));
    }

    match all_consuming(delimited(multispace0, reference, multispace0))(input) {
        Ok((_, (kind, value))) => match kind {
            RefKind::Uri => ObjQualifier::uri(value),
            RefKind::Identifier => ObjQualifier::identifier(value),
        },
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let position = input.len() - e.input.len();
            Err(ModelError::InvalidReference {
                position,
                message: format!("unexpected input at: '{}'", truncate(e.input, 20)),
            })
        }
        Err(nom::Err::Incomplete(_)) => Err(ModelError::InvalidReference {
            position: input.len(),
            message: "incomplete reference".to_string(),
        }),
    }
}

/// Extracts the object id from a `/gdc/md/<project>/obj/<id>` URI.
pub(crate) fn object_id(uri: &str) -> Option<u64> {
    all_consuming(object_uri)(uri).ok().map(|(_, id)| id)
}

#[derive(Clone, Copy)]
enum RefKind {
    Uri,
    Identifier,
}

fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn reference(input: &str) -> IResult<&str, (RefKind, String)> {
    alt((
        map(delimited(char('['), escaped_value("]\\"), char(']')), |v| {
            (RefKind::Uri, v)
        }),
        map(delimited(char('{'), escaped_value("}\\"), char('}')), |v| {
            (RefKind::Identifier, v)
        }),
    ))(input)
}

/// Non-empty run of characters up to an unescaped delimiter, unescaped.
fn escaped_value<'a>(stop: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, String> {
    move |input: &'a str| escaped_transform(is_not(stop), '\\', one_of("]}\\"))(input)
}

fn object_uri(input: &str) -> IResult<&str, u64> {
    map(
        tuple((
            tag("/gdc/md/"),
            take_till1(|c: char| c == '/'),
            preceded(tag("/obj/"), map_res(digit1, str::parse::<u64>)),
        )),
        |(_, _, id)| id,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uri_reference() {
        let q = parse_reference("[/gdc/md/abc/obj/42]").unwrap();
        assert_eq!(q, ObjQualifier::uri("/gdc/md/abc/obj/42").unwrap());
    }

    #[test]
    fn test_parse_identifier_reference() {
        let q = parse_reference("  {label.product.id}  ").unwrap();
        assert_eq!(q, ObjQualifier::identifier("label.product.id").unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_reference("label.id"),
            Err(ModelError::InvalidReference { position: 0, .. })
        ));
        assert!(parse_reference("[]").is_err());
        assert!(parse_reference("{a} tail").is_err());
        assert!(matches!(
            parse_reference("   "),
            Err(ModelError::IllegalArgument { .. })
        ));
    }

    #[test]
    fn test_display_parse_agree() {
        for text in ["[/gdc/md/p/obj/7]", "{date.year}"] {
            assert_eq!(parse_reference(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_escaped_delimiters() {
        assert_eq!(
            parse_reference(r"{a\}b}").unwrap(),
            ObjQualifier::identifier("a}b").unwrap()
        );
        assert_eq!(
            parse_reference(r"[/x\]y\\z]").unwrap(),
            ObjQualifier::uri(r"/x]y\z").unwrap()
        );
        assert!(parse_reference(r"{a\q}").is_err());
        assert!(parse_reference("{a}b}").is_err());
    }

    #[test]
    fn test_display_parse_round_trip_with_delimiters() {
        let values = ["a}b", "x]y", r"back\slash", "}", "]", "{[mixed]}"];
        for value in values {
            for q in [
                ObjQualifier::identifier(value).unwrap(),
                ObjQualifier::uri(value).unwrap(),
            ] {
                assert_eq!(parse_reference(&q.to_string()).unwrap(), q);
            }
        }
    }

    #[test]
    fn test_object_id() {
        assert_eq!(object_id("/gdc/md/project/obj/1234"), Some(1234));
        assert_eq!(object_id("/gdc/md/project/obj/12a"), None);
        assert_eq!(object_id("/gdc/account/profile/1"), None);
    }
}
