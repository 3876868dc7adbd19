//! Request body helpers shared by the client and mortgage handlers.

use serde_json::{Map, Value};

use crate::domain::Fields;
use crate::domain::client_fields::IDENTIFIER_FIELD;

/// Legacy body key accepted in place of `identifier`.
pub(crate) const DNI_ALIAS: &str = "dni";

/// Convert a client request body into [`Fields`].
///
/// `dni` is read as `identifier` unless both are sent, in which case
/// `identifier` wins and `dni` is dropped.
pub(crate) fn client_fields(mut body: Map<String, Value>) -> Fields {
    if let Some(alias) = body.remove(DNI_ALIAS) {
        body.entry(IDENTIFIER_FIELD).or_insert(alias);
    }
    Fields::from(body)
}

/// Convert a mortgage request body into [`Fields`].
pub(crate) fn mortgage_fields(body: Map<String, Value>) -> Fields {
    Fields::from(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;
    use rstest::rstest;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[rstest]
    fn dni_is_read_as_identifier() {
        let fields = client_fields(body(json!({"dni": "12345678z", "name": "Ada"})));
        assert_eq!(
            fields.get(IDENTIFIER_FIELD),
            Some(&FieldValue::from("12345678z"))
        );
        assert!(!fields.contains(DNI_ALIAS));
    }

    #[rstest]
    fn identifier_wins_over_dni() {
        let fields = client_fields(body(json!({"dni": "X1234567L", "identifier": "12345678Z"})));
        assert_eq!(
            fields.get(IDENTIFIER_FIELD),
            Some(&FieldValue::from("12345678Z"))
        );
        assert!(!fields.contains(DNI_ALIAS));
    }
}
