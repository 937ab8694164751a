use serde::Deserialize;
use uuid::Uuid;

/// Inbound chat frame. An absent `recipient_id` addresses the whole channel
/// the sender's role can reach.
#[derive(Debug, Deserialize)]
pub struct ChatFrame {
    pub recipient_id: Option<Uuid>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directed_frame() {
        let recipient = Uuid::new_v4();
        let frame: ChatFrame = serde_json::from_str(&format!(
            "{{\"recipient_id\":\"{recipient}\",\"message\":\"on my way\"}}"
        ))
        .unwrap();
        assert_eq!(frame.recipient_id, Some(recipient));
        assert_eq!(frame.message, "on my way");
    }

    #[test]
    fn missing_recipient_means_broadcast() {
        let frame: ChatFrame = serde_json::from_str("{\"message\":\"help\"}").unwrap();
        assert_eq!(frame.recipient_id, None);
    }

    #[test]
    fn missing_message_is_rejected() {
        assert!(serde_json::from_str::<ChatFrame>("{\"recipient_id\":null}").is_err());
    }
}
