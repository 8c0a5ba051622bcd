//! Response-to-source correlation.

use crate::types::{Entity, ResponseRecord};
use crate::{Error, Result};
use serde_json::Value;

/// A response record paired with the entity it originated from.
///
/// `entity` is `None` when the service echoed an id that matches nothing
/// in the source set; that is permitted, not an error.
#[derive(Debug)]
pub struct Correlated<'a, E> {
    pub entity: Option<&'a E>,
    pub record: ResponseRecord,
}

/// Match each response record to its source entity by id.
///
/// Output order follows `responses`: the service's response order is
/// authoritative, not the input order. A batch is bounded at 25 records
/// so the entity lookup is a plain linear scan.
pub fn correlate<'a, E: Entity>(
    responses: Vec<ResponseRecord>,
    source: &'a [E],
) -> Result<Vec<Correlated<'a, E>>> {
    let mut out = Vec::with_capacity(responses.len());
    for record in responses {
        let id = record_id(&record)?;
        let entity = source.iter().find(|e| e.identity() == id);
        if entity.is_none() {
            tracing::warn!(id, "response id matches no source entity");
        }
        out.push(Correlated { entity, record });
    }
    Ok(out)
}

/// Parse the `id` field of a response record.
///
/// The service writes ids back as numbers or numeric strings depending on
/// the endpoint; both parse. Anything else makes the whole batch
/// unattributable.
fn record_id(record: &ResponseRecord) -> Result<i64> {
    let value = record
        .get("id")
        .ok_or_else(|| Error::malformed("response record has no 'id' field"))?;
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| Error::malformed(format!("response id {n} is not an integer"))),
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| Error::malformed(format!("response id '{s}' is not an integer"))),
        other => Err(Error::malformed(format!(
            "response id has unexpected type: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;
    use serde_json::json;

    fn record_with(fields: Value) -> ResponseRecord {
        fields.as_object().unwrap().clone()
    }

    fn source() -> Vec<Record> {
        vec![
            Record::new(1).with_property("text", "a"),
            Record::new(2).with_property("text", "b"),
        ]
    }

    #[test]
    fn matches_by_id_in_service_order() {
        let responses = vec![
            record_with(json!({"id": "2", "score": 0.9})),
            record_with(json!({"id": "1", "score": 0.1})),
        ];
        let entities = source();
        let correlated = correlate(responses, &entities).unwrap();
        assert_eq!(correlated.len(), 2);
        assert_eq!(correlated[0].entity.unwrap().id, 2);
        assert_eq!(correlated[1].entity.unwrap().id, 1);
        assert_eq!(correlated[0].record["score"], json!(0.9));
    }

    #[test]
    fn numeric_id_also_parses() {
        let responses = vec![record_with(json!({"id": 1}))];
        let entities = source();
        let correlated = correlate(responses, &entities).unwrap();
        assert_eq!(correlated[0].entity.unwrap().id, 1);
    }

    #[test]
    fn unmatched_id_yields_absent_entity() {
        let responses = vec![record_with(json!({"id": 99, "score": 0.5}))];
        let entities = source();
        let correlated = correlate(responses, &entities).unwrap();
        assert!(correlated[0].entity.is_none());
        assert_eq!(correlated[0].record["id"], json!(99));
    }

    #[test]
    fn non_numeric_id_fails_the_batch() {
        let responses = vec![
            record_with(json!({"id": "1"})),
            record_with(json!({"id": "abc"})),
        ];
        let entities = source();
        let err = correlate(responses, &entities).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn missing_id_fails_the_batch() {
        let responses = vec![record_with(json!({"score": 1.0}))];
        let entities = source();
        let err = correlate(responses, &entities).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }
}
