use serde::Serialize;

/// Payload accepted by the outbound email provider.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SendEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SendEmail {
    pub fn text(from: &str, to: &str, subject: &str, body: String) -> Self {
        Self {
            from: from.to_string(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            html: None,
            text: Some(body),
        }
    }
}
