//! Inbox digest: recent mail in, one summary per message out

use crate::credentials::CredentialManager;
use crate::error::{MailError, Result};
use crate::mail::MailClient;
use crate::summarizer::SummarizerClient;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Messages summarized when the caller does not say.
pub const DEFAULT_COUNT: u32 = 5;

/// Upper bound on messages per digest.
pub const MAX_COUNT: u32 = 20;

/// One summarized message. `email_number` is 1-based, in fetch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSummary {
    pub email_number: usize,
    pub summary: String,
}

/// Check a requested message count.
pub fn validate_count(count: u32) -> Result<u32> {
    if (1..=MAX_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(MailError::InvalidCount(count))
    }
}

/// Ties the credential manager, the mail client and the summarizer together.
#[derive(Clone)]
pub struct InboxDigest {
    credentials: CredentialManager,
    mail: MailClient,
    summarizer: SummarizerClient,
}

impl InboxDigest {
    pub fn new(credentials: CredentialManager, mail: MailClient, summarizer: SummarizerClient) -> Self {
        Self {
            credentials,
            mail,
            summarizer,
        }
    }

    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    /// Summarize up to `count` recent messages of `identity`.
    ///
    /// Messages without a text body are skipped. Any failure aborts the whole
    /// digest; partial results are never returned.
    pub async fn summarize_inbox(&self, identity: &str, count: u32) -> Result<Vec<EmailSummary>> {
        let count = validate_count(count)?;
        let credential = self.credentials.authenticate(identity).await?;

        let ids = self.mail.list_recent_messages(&credential, count).await?;

        let mut bodies = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(body) = self.mail.fetch_body(&credential, id).await? {
                bodies.push(body);
            }
        }

        let mut summaries = Vec::with_capacity(bodies.len());
        for (index, body) in bodies.iter().enumerate() {
            summaries.push(EmailSummary {
                email_number: index + 1,
                summary: self.summarizer.summarize(body).await?,
            });
        }

        info!(
            identity = %identity,
            listed = ids.len(),
            summarized = summaries.len(),
            "Inbox digest complete"
        );

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_bounds() {
        assert_eq!(validate_count(DEFAULT_COUNT).unwrap(), 5);
        assert_eq!(validate_count(1).unwrap(), 1);
        assert_eq!(validate_count(20).unwrap(), 20);
        assert!(matches!(validate_count(0), Err(MailError::InvalidCount(0))));
        assert!(matches!(validate_count(21), Err(MailError::InvalidCount(21))));
    }

    #[test]
    fn test_count_error_names_the_limit() {
        let message = MailError::InvalidCount(21).to_string();
        assert_eq!(message, format!("Message count 21 is out of range (1-{})", MAX_COUNT));
    }
}
