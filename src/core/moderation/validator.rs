// Request validation - turns a decoded JSON payload into a ModerationRequest.
//
// Checks run in a fixed order: every missing field first, then entity_type,
// then the types of the remaining fields.

use super::moderation_models::{EntityType, ModerationRequest};
use super::moderation_service::ValidationError;
use serde_json::{Map, Value};

/// Fields every moderation request must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "content",
    "author_id",
    "entity_id",
    "entity_type",
    "community_id",
];

/// Decode a raw request body into a JSON object.
pub fn decode_payload(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationError::MalformedBody(
            "request body must be a JSON object".to_string(),
        )),
        Err(e) => Err(ValidationError::MalformedBody(e.to_string())),
    }
}

/// Validate a decoded payload.
///
/// Only absent keys count as missing. A present `null` fails the
/// entity_type or field type check instead.
pub fn validate_request(payload: &Map<String, Value>) -> Result<ModerationRequest, ValidationError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !payload.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let entity_type = payload
        .get("entity_type")
        .and_then(Value::as_str)
        .and_then(EntityType::parse)
        .ok_or(ValidationError::InvalidEntityType)?;

    Ok(ModerationRequest {
        content: string_field(payload, "content")?,
        author_id: string_field(payload, "author_id")?,
        entity_id: string_field(payload, "entity_id")?,
        entity_type,
        community_id: string_field(payload, "community_id")?,
    })
}

fn string_field(payload: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::InvalidFieldType(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    fn valid() -> Value {
        json!({
            "content": "hello there",
            "author_id": "user-1",
            "entity_id": "post-1",
            "entity_type": "post",
            "community_id": "community-1"
        })
    }

    #[test]
    fn test_valid_payload() {
        let request = validate_request(&payload(valid())).unwrap();
        assert_eq!(request.content, "hello there");
        assert_eq!(request.author_id, "user-1");
        assert_eq!(request.entity_id, "post-1");
        assert_eq!(request.entity_type, EntityType::Post);
        assert_eq!(request.community_id, "community-1");
    }

    #[test]
    fn test_reports_every_missing_field() {
        let mut map = payload(valid());
        map.remove("content");
        map.remove("community_id");

        match validate_request(&map) {
            Err(ValidationError::MissingFields(missing)) => {
                assert_eq!(missing, vec!["content", "community_id"]);
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_payload_lists_all_fields() {
        match validate_request(&Map::new()) {
            Err(ValidationError::MissingFields(missing)) => {
                assert_eq!(missing, REQUIRED_FIELDS.to_vec());
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_null_field_is_invalid_type() {
        let mut map = payload(valid());
        map.insert("author_id".to_string(), Value::Null);

        assert!(matches!(
            validate_request(&map),
            Err(ValidationError::InvalidFieldType(field)) if field == "author_id"
        ));
    }

    #[test]
    fn test_null_entity_type_is_invalid_entity_type() {
        let mut map = payload(valid());
        map.insert("entity_type".to_string(), Value::Null);

        assert!(matches!(
            validate_request(&map),
            Err(ValidationError::InvalidEntityType)
        ));
    }

    #[test]
    fn test_invalid_entity_type() {
        let mut map = payload(valid());
        map.insert("entity_type".to_string(), json!("story"));

        assert!(matches!(
            validate_request(&map),
            Err(ValidationError::InvalidEntityType)
        ));
    }

    #[test]
    fn test_entity_type_checked_before_other_field_types() {
        let mut map = payload(valid());
        map.insert("entity_type".to_string(), json!(42));
        map.insert("content".to_string(), json!(["not", "a", "string"]));

        assert!(matches!(
            validate_request(&map),
            Err(ValidationError::InvalidEntityType)
        ));
    }

    #[test]
    fn test_non_string_field_rejected() {
        let mut map = payload(valid());
        map.insert("author_id".to_string(), json!(17));

        assert!(matches!(
            validate_request(&map),
            Err(ValidationError::InvalidFieldType(field)) if field == "author_id"
        ));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(matches!(
            decode_payload(b"[1, 2, 3]"),
            Err(ValidationError::MalformedBody(_))
        ));
        assert!(matches!(
            decode_payload(b"{not json"),
            Err(ValidationError::MalformedBody(_))
        ));
        assert!(decode_payload(br#"{"content": "x"}"#).is_ok());
    }
}
