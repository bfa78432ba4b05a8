use crate::GenerationMode;

/// User-correctable problems detected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("a topic is required")]
    MissingTopic,
    #[error("an API key is required")]
    MissingCredential,
}

/// Everything one generation run needs.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub credential: String,
    pub model_id: String,
    pub mode: GenerationMode,
}

impl GenerationRequest {
    pub fn new(
        topic: impl Into<String>,
        credential: impl Into<String>,
        model_id: impl Into<String>,
        mode: GenerationMode,
    ) -> Self {
        Self {
            topic: topic.into(),
            credential: credential.into(),
            model_id: model_id.into(),
            mode,
        }
    }

    /// Rejects empty or whitespace-only topic and credential.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.topic.trim().is_empty() {
            return Err(InputError::MissingTopic);
        }
        if self.credential.trim().is_empty() {
            return Err(InputError::MissingCredential);
        }
        Ok(())
    }
}

// Keeps the credential out of debug output and logs.
impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("topic", &self.topic)
            .field("credential", &"<redacted>")
            .field("model_id", &self.model_id)
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_topic_is_rejected_before_credential() {
        let request = GenerationRequest::new("  \t", "", "m", GenerationMode::FullDocument);
        assert_eq!(request.validate(), Err(InputError::MissingTopic));
    }

    #[test]
    fn debug_output_hides_credential() {
        let request = GenerationRequest::new("Boxing", "sk-secret", "m", GenerationMode::default());
        let printed = format!("{request:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("Boxing"));
    }
}
