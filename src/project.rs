//! Size-reducing projection of the structured record
//!
//! Embedded image payloads dominate record size; they are removed from every
//! picture entry before the record is emitted. All other picture metadata and
//! every other part of the record pass through unchanged.

use serde_json::Value;

/// Field under a picture entry holding the embedded binary payload.
pub const IMAGE_PAYLOAD_FIELD: &str = "image";

/// Remove the image payload from every entry of the top-level `pictures`
/// array. Idempotent: the field is simply absent on a second pass.
pub fn strip_image_payloads(mut extraction: Value) -> Value {
    if let Some(pictures) = extraction
        .get_mut("pictures")
        .and_then(Value::as_array_mut)
    {
        for picture in pictures {
            if let Some(fields) = picture.as_object_mut() {
                fields.remove(IMAGE_PAYLOAD_FIELD);
            }
        }
    }
    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_payload_but_keeps_other_picture_fields() {
        let record = json!({
            "name": "report",
            "pictures": [
                {"label": "picture", "caption": "Figure 1", "mimetype": "image/png",
                 "image": {"mimetype": "image/png", "uri": "data:image/png;base64,AAAA"}},
                {"label": "picture", "mimetype": "image/jpeg"}
            ],
            "tables": [{"data": {"grid": []}}]
        });

        let projected = strip_image_payloads(record);
        let pictures = projected["pictures"].as_array().unwrap();
        assert!(pictures.iter().all(|p| p.get("image").is_none()));
        assert_eq!(pictures[0]["caption"], "Figure 1");
        assert_eq!(pictures[0]["mimetype"], "image/png");
        assert_eq!(pictures[1]["mimetype"], "image/jpeg");
        // Rest of the record untouched
        assert_eq!(projected["name"], "report");
        assert!(projected["tables"][0]["data"]["grid"].is_array());
    }

    #[test]
    fn projection_is_idempotent() {
        let record = json!({
            "pictures": [{"image": {"uri": "data:..."}, "caption": "c"}]
        });
        let once = strip_image_payloads(record);
        let twice = strip_image_payloads(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn record_without_pictures_passes_through() {
        let record = json!({"texts": [{"text": "hello"}]});
        assert_eq!(strip_image_payloads(record.clone()), record);
    }
}
