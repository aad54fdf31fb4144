use crate::models::contact::{ContactForm, ContactReceipt};
use crate::models::errors::AppError;
use crate::services::rate_limiter::RateLimiter;
use crate::utils::security::sanitize_form_data;
use serde_json::{Map, Value};

/// Accepts contact page submissions. Nothing is delivered anywhere; a
/// submission is logged and acknowledged.
pub struct ContactService {
    limiter: RateLimiter,
}

impl ContactService {
    pub fn new(limiter: RateLimiter) -> Self {
        Self { limiter }
    }

    /// Rate-limits by `client_key`, then sanitizes and validates the raw form
    pub async fn submit(
        &self,
        client_key: &str,
        raw_form: &Map<String, Value>,
    ) -> Result<ContactReceipt, AppError> {
        self.limiter.check_rate_limit(client_key).await?;

        let cleaned = sanitize_form_data(raw_form);
        let form: ContactForm = serde_json::from_value(Value::Object(cleaned))
            .map_err(|e| AppError::validation_failed(format!("Incomplete contact form: {}", e)))?;
        form.validate()?;

        tracing::info!(
            name = %form.name,
            email = %form.email,
            "Contact form submitted"
        );

        Ok(ContactReceipt {
            success: true,
            message: "Message sent successfully!".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::rate_limiter::RateLimitConfig;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn service() -> ContactService {
        ContactService::new(RateLimiter::with_config(RateLimitConfig::contact_form()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_accepts_clean_form() {
        let receipt = service()
            .submit(
                "visitor",
                &raw(json!({
                    "name": " <b>Wayan</b> ",
                    "email": "wayan@example.com",
                    "phone": "+62 812 3456",
                    "message": "Fitting next week?"
                })),
            )
            .await
            .unwrap();

        assert!(receipt.success);
        assert_eq!(receipt.message, "Message sent successfully!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_rejects_invalid_form() {
        let service = service();

        let bad_email = raw(json!({
            "name": "Wayan",
            "email": "not-an-email",
            "message": "Hello"
        }));
        assert!(matches!(
            service.submit("visitor", &bad_email).await,
            Err(AppError::ValidationError { .. })
        ));

        let tags_only = raw(json!({
            "name": "Wayan",
            "email": "wayan@example.com",
            "message": "<script>alert(1)</script>"
        }));
        assert!(service.submit("visitor", &tags_only).await.is_err());

        let missing_message = raw(json!({ "name": "Wayan", "email": "wayan@example.com" }));
        assert!(service.submit("visitor", &missing_message).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fourth_submission_in_a_minute_is_limited() {
        let service = service();
        let form = raw(json!({
            "name": "Wayan",
            "email": "wayan@example.com",
            "message": "Hello"
        }));

        for _ in 0..3 {
            assert!(service.submit("visitor", &form).await.is_ok());
        }
        assert!(matches!(
            service.submit("visitor", &form).await,
            Err(AppError::RateLimitError { .. })
        ));

        tokio::time::advance(std::time::Duration::from_secs(60)).await;
        assert!(service.submit("visitor", &form).await.is_ok());
    }
}
