use serde::{Deserialize, Serialize};

use super::errors::AppError;
use crate::utils::security::{is_valid_email, is_valid_phone};

/// A visitor's message from the contact page, after sanitization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Validates the required fields and the email/phone shapes
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation_failed("Name cannot be empty"));
        }

        if !is_valid_email(&self.email) {
            return Err(AppError::validation_failed("Email address is not valid"));
        }

        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            if !is_valid_phone(phone) {
                return Err(AppError::validation_failed("Phone number is not valid"));
            }
        }

        if self.message.trim().is_empty() {
            return Err(AppError::validation_failed("Message cannot be empty"));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactReceipt {
    pub success: bool,
    pub message: String,
}

/// Published contact details of the shop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: "+6282147068677".to_string(),
            email: "sandhoratailor@gmail.com".to_string(),
            address: "jalan cempaka putih 6A Jl. Raya Uma Buluh No.banjar, Canggu, Kuta Utara, Badung Regency, Bali 80351".to_string(),
        }
    }
}

impl ContactInfo {
    /// WhatsApp chat link built from the digits of the phone number
    pub fn whatsapp_link(&self) -> String {
        let digits: String = self.phone.chars().filter(|c| c.is_ascii_digit()).collect();
        format!("https://wa.me/{}", digits)
    }

    pub fn mailto_link(&self) -> String {
        format!("mailto:{}", self.email)
    }
}
