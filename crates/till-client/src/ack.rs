//! Loose acknowledgement body for endpoints that confirm without a record.

use serde::Deserialize;

/// Whatever the server sends back on a fire-and-forget endpoint
/// (clock-in/out, stock adjustment, reversal). Only an optional message is
/// read; anything else in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Ack;

    #[test]
    fn parses_empty_object_and_message() {
        let ack: Ack = serde_json::from_str("{}").unwrap();
        assert!(ack.message.is_none());

        let ack: Ack = serde_json::from_str(r#"{"message":"ok","extra":1}"#).unwrap();
        assert_eq!(ack.message.as_deref(), Some("ok"));
    }
}
