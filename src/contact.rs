use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::html::escape;

/// Fields submitted through the consultation form
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub team_size: String,
    pub message: String,
    pub selected_date: Option<String>,
    pub selected_time: Option<String>,
}

/// A formatted email ready for a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Sends a formatted email. The real mail service lives outside this crate.
pub trait MailTransport {
    fn send(&self, email: &ContactEmail) -> Result<()>;
}

/// What the form handler reports back to the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactRequest {
    fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn requested_time(&self) -> String {
        match self.selected_date.as_deref().filter(|date| !date.is_empty()) {
            Some(date) => format!(
                "{date} at {}",
                self.selected_time.as_deref().unwrap_or_default()
            ),
            None => "Not selected".to_string(),
        }
    }

    pub fn to_email(&self) -> ContactEmail {
        let subject = format!(
            "New Consultation Request from {} at {}",
            self.full_name(),
            self.company
        );

        let fields = [
            ("Name", self.full_name()),
            ("Email", self.email.clone()),
            ("Company", self.company.clone()),
            ("Job Title", self.job_title.clone()),
            ("Team Size", self.team_size.clone()),
            ("Requested Time", self.requested_time()),
        ];

        let mut text = String::new();
        let mut html = String::from("<h2>New Consultation Request</h2>\n");
        for (label, value) in &fields {
            text.push_str(&format!("{label}: {value}\n"));

            html.push_str(&format!("<p><strong>{label}:</strong> "));
            escape(value, &mut html);
            html.push_str("</p>\n");
        }

        text.push_str("\nMessage:\n");
        text.push_str(&self.message);
        text.push('\n');

        html.push_str("<br>\n<h3>Message:</h3>\n<p>");
        escape(&self.message, &mut html);
        html.push_str("</p>\n");

        ContactEmail {
            subject,
            text,
            html,
        }
    }
}

/// Format the request and hand it to `transport`.
///
/// Transport failures are logged; the outcome only carries a generic message.
pub fn submit(request: &ContactRequest, transport: &dyn MailTransport) -> SubmitOutcome {
    let email = request.to_email();
    match transport.send(&email) {
        Ok(()) => {
            tracing::info!(subject = %email.subject, "sent contact email");
            SubmitOutcome {
                success: true,
                error: None,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "error sending email");
            SubmitOutcome {
                success: false,
                error: Some("Failed to send email".to_string()),
            }
        }
    }
}
