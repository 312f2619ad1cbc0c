//! Form submissions forwarded to the team by email.
//!
//! Each form posts `{ "type": ..., "data": { ... } }`. The `type` tag selects
//! the variant and the shape of `data`; field names are camelCase as sent by
//! the site's forms.

use maud::{html, Markup, DOCTYPE};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid field '{field}': {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum Notification {
    Contact(ContactForm),
    Qualification(QualificationForm),
    Calculator(CalculatorForm),
}

/// General enquiry from the contact page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// Property owner asking whether their villa qualifies for management.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub property_location: String,
    pub bedrooms: Option<u32>,
    pub rental_status: Option<String>,
    pub message: Option<String>,
}

/// Lead captured by the earnings calculator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorForm {
    pub email: String,
    pub name: Option<String>,
    pub location: String,
    pub bedrooms: u32,
    pub nightly_rate: f64,
    /// Percent, 0 to 100
    pub occupancy_rate: f64,
}

impl CalculatorForm {
    pub fn projected_annual_revenue(&self) -> f64 {
        self.nightly_rate * 365.0 * self.occupancy_rate / 100.0
    }
}

/// Rendered email ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
    pub reply_to: String,
}

impl Notification {
    /// Decode and validate a request body.
    pub fn parse(body: &[u8]) -> Result<Self, NotificationError> {
        let notification: Notification = serde_json::from_slice(body)?;
        notification.validate()?;
        Ok(notification)
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Contact(_) => "contact",
            Notification::Qualification(_) => "qualification",
            Notification::Calculator(_) => "calculator",
        }
    }

    pub fn validate(&self) -> Result<(), NotificationError> {
        match self {
            Notification::Contact(form) => {
                require_text("name", &form.name)?;
                require_email(&form.email)?;
                require_text("message", &form.message)
            }
            Notification::Qualification(form) => {
                require_text("name", &form.name)?;
                require_email(&form.email)?;
                require_text("propertyLocation", &form.property_location)
            }
            Notification::Calculator(form) => {
                require_email(&form.email)?;
                require_text("location", &form.location)?;
                if !form.nightly_rate.is_finite() || form.nightly_rate < 0.0 {
                    return Err(NotificationError::Invalid {
                        field: "nightlyRate",
                        reason: "must be a non-negative number",
                    });
                }
                if !(0.0..=100.0).contains(&form.occupancy_rate) {
                    return Err(NotificationError::Invalid {
                        field: "occupancyRate",
                        reason: "must be between 0 and 100",
                    });
                }
                Ok(())
            }
        }
    }

    /// Build the email for the team. `whatsapp_url` is added to the footer when set.
    pub fn render_email(&self, whatsapp_url: Option<&str>) -> EmailContent {
        let (subject, reply_to, rows) = match self {
            Notification::Contact(form) => (
                match &form.subject {
                    Some(subject) if !subject.trim().is_empty() => {
                        format!("New contact message: {}", subject.trim())
                    }
                    _ => format!("New contact message from {}", form.name),
                },
                form.email.clone(),
                vec![
                    ("Name", form.name.clone()),
                    ("Email", form.email.clone()),
                    ("Phone", optional(&form.phone)),
                    ("Message", form.message.clone()),
                ],
            ),
            Notification::Qualification(form) => (
                format!("New owner enquiry: {}", form.property_location),
                form.email.clone(),
                vec![
                    ("Name", form.name.clone()),
                    ("Email", form.email.clone()),
                    ("Phone", optional(&form.phone)),
                    ("Property location", form.property_location.clone()),
                    (
                        "Bedrooms",
                        form.bedrooms
                            .map(|b| b.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    ("Current rental status", optional(&form.rental_status)),
                    ("Message", optional(&form.message)),
                ],
            ),
            Notification::Calculator(form) => (
                format!("New earnings estimate: {}", form.location),
                form.email.clone(),
                vec![
                    ("Name", optional(&form.name)),
                    ("Email", form.email.clone()),
                    ("Location", form.location.clone()),
                    ("Bedrooms", form.bedrooms.to_string()),
                    ("Nightly rate", format_amount(form.nightly_rate)),
                    ("Occupancy", format!("{:.0}%", form.occupancy_rate)),
                    (
                        "Projected annual revenue",
                        format_amount(form.projected_annual_revenue()),
                    ),
                ],
            ),
        };

        EmailContent {
            html: email_layout(&subject, &rows, whatsapp_url).into_string(),
            subject,
            reply_to,
        }
    }
}

fn email_layout(title: &str, rows: &[(&str, String)], whatsapp_url: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                title { (title) }
            }
            body style="font-family: Arial, sans-serif; color: #1f2933;" {
                h2 { (title) }
                table style="border-collapse: collapse;" {
                    @for (label, value) in rows {
                        tr {
                            td style="padding: 6px 12px; font-weight: bold; vertical-align: top;" { (label) }
                            td style="padding: 6px 12px; white-space: pre-wrap;" { (value) }
                        }
                    }
                }
                @if let Some(url) = whatsapp_url {
                    p style="margin-top: 24px; color: #52606d;" {
                        "WhatsApp: " a href=(url) { (url) }
                    }
                }
            }
        }
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), NotificationError> {
    if value.trim().is_empty() {
        return Err(NotificationError::Invalid {
            field,
            reason: "must not be empty",
        });
    }
    Ok(())
}

fn require_email(value: &str) -> Result<(), NotificationError> {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };

    if !valid {
        return Err(NotificationError::Invalid {
            field: "email",
            reason: "must be an email address",
        });
    }
    Ok(())
}

fn optional(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Whole-unit amount with thousands separators: `12345.6` -> `12,346`.
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round().max(0.0) as u64;
    let digits = rounded.to_string();

    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }
    formatted
}
