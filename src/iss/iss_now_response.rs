use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body of the `iss-now.json` endpoint.
///
/// Every field is optional so that an absent key can be reported by name instead of as a generic
/// deserialization failure. `message` and `timestamp` are only logged and accept any JSON value.
#[derive(Debug, Deserialize)]
pub struct IssNowResponse {
    pub message: Option<Value>,
    pub timestamp: Option<Value>,
    pub iss_position: Option<IssPosition>,
}

#[derive(Debug, Deserialize)]
pub struct IssPosition {
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
}

/// The unparsed text of a coordinate, the API encodes them as strings.
#[derive(Debug, PartialEq)]
pub struct Coordinate(pub String);

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Inner {
            Text(String),
            Number(f64),
        }

        Ok(match Inner::deserialize(deserializer)? {
            Inner::Text(text) => Coordinate(text),
            Inner::Number(number) => Coordinate(number.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserializes_the_api_response() -> Result<(), serde_json::Error> {
        let response: IssNowResponse = serde_json::from_str(include_str!("../../tests/resources/iss_now_response.json"))?;
        let position = response.iss_position.unwrap();

        assert_eq!(response.message, Some(json!("success")));
        assert_eq!(response.timestamp, Some(json!(1760812345)));
        assert_eq!(position.latitude, Some(Coordinate("12.34".to_string())));
        assert_eq!(position.longitude, Some(Coordinate("-56.78".to_string())));

        Ok(())
    }

    #[test]
    fn accepts_numeric_coordinates() -> Result<(), serde_json::Error> {
        let position: IssPosition = serde_json::from_str(r#"{"latitude": 51.5, "longitude": -0.25}"#)?;

        assert_eq!(position.latitude, Some(Coordinate("51.5".to_string())));
        assert_eq!(position.longitude, Some(Coordinate("-0.25".to_string())));

        Ok(())
    }

    #[test]
    fn absent_and_null_coordinates_are_none() -> Result<(), serde_json::Error> {
        let position: IssPosition = serde_json::from_str(r#"{"latitude": null}"#)?;

        assert_eq!(position.latitude, None);
        assert_eq!(position.longitude, None);

        Ok(())
    }

    #[test]
    fn informational_fields_accept_any_value() -> Result<(), serde_json::Error> {
        let response: IssNowResponse = serde_json::from_str(
            r#"{"message": {"status": "ok"}, "timestamp": 1760812345.5, "iss_position": {"latitude": "1.0", "longitude": "2.0"}}"#,
        )?;

        assert_eq!(response.message, Some(json!({"status": "ok"})));
        assert_eq!(response.timestamp, Some(json!(1760812345.5)));
        assert!(response.iss_position.is_some());

        Ok(())
    }

    #[test]
    fn rejects_coordinates_of_the_wrong_type() {
        assert!(serde_json::from_str::<IssPosition>(r#"{"latitude": true}"#).is_err());
    }
}
