use tracing::{debug, warn};

use contact_desk::config::NotifierConfig;
use contact_desk::datatypes::ContactMessage;

/// Outbound email, Resend-shaped: a JSON POST with a bearer key.
///
/// Notification failures are logged and swallowed; they must never fail the
/// action that triggered them. A contact submission succeeds whether or not
/// the email goes out.
pub struct Notifier {
    http: reqwest::Client,
    config: NotifierConfig,
}

impl Notifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn contact_submission(&self, to: &str, message: &ContactMessage) {
        let subject = format!("New contact form submission from {}", message.name);

        let mut details = format!(
            "<p><strong>Name:</strong> {}</p>\n<p><strong>Email:</strong> {}</p>\n",
            message.name, message.email
        );
        if let Some(phone) = &message.phone {
            details.push_str(&format!("<p><strong>Phone:</strong> {phone}</p>\n"));
        }
        if let Some(service) = &message.service {
            details.push_str(&format!("<p><strong>Service:</strong> {service}</p>\n"));
        }

        let html = format!(
            "<h2>Message from {}</h2>\n{details}\n<blockquote>{}</blockquote>",
            message.name, message.message
        );

        self.deliver(to, &subject, &html).await;
    }

    pub async fn password_changed(&self, to: &str) {
        self.deliver(
            to,
            "Admin password changed",
            "<p>The admin password of your contact desk was just changed. \
             If this was not you, change it again immediately.</p>",
        )
        .await;
    }

    async fn deliver(&self, to: &str, subject: &str, html: &str) {
        let Some(api_key) = &self.config.api_key else {
            debug!(%to, %subject, "notifier has no api key, skipping delivery");
            return;
        };

        let payload = serde_json::json!({
            "from": self.config.from,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let result = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!(%to, %subject, "notification sent");
            }
            Ok(response) => {
                warn!(%to, status = %response.status(), "notification rejected by mail api");
            }
            Err(e) => {
                warn!(%to, error = %e, "failed to send notification");
            }
        }
    }
}
