use async_trait::async_trait;
use uuid::Uuid;

use crate::datatypes::ContactMessage;
use crate::error::DeskError;
use crate::export;
use crate::filter::{self, FilterSpec};

/// The persistence collaborator as the dashboard sees it.
#[async_trait]
pub trait MessageBackend {
    async fn fetch_all(&mut self) -> Result<Vec<ContactMessage>, DeskError>;
    async fn mark_read(&mut self, id: Uuid) -> Result<(), DeskError>;
    async fn delete(&mut self, id: Uuid) -> Result<(), DeskError>;
}

/// Owns the authoritative in-memory copy of the message list and re-derives
/// the filtered view on demand.
///
/// Mutations go to the backend first; the local list is reconciled only after
/// the backend reports success. On failure the error is returned and the
/// local list is left exactly as it was. There is no automatic retry.
pub struct Dashboard<B> {
    backend: B,
    messages: Vec<ContactMessage>,
    pub spec: FilterSpec,
}

impl<B: MessageBackend> Dashboard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            messages: Vec::new(),
            spec: FilterSpec::default(),
        }
    }

    /// Replaces the local list with a fresh fetch.
    pub async fn refresh(&mut self) -> Result<(), DeskError> {
        self.messages = self.backend.fetch_all().await?;
        Ok(())
    }

    pub fn total(&self) -> usize {
        self.messages.len()
    }

    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_read).count()
    }

    pub fn find(&self, id: Uuid) -> Option<&ContactMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// The filtered, ordered view under the current spec.
    pub fn view(&self) -> Vec<ContactMessage> {
        filter::apply(&self.messages, &self.spec)
    }

    pub async fn mark_read(&mut self, id: Uuid) -> Result<(), DeskError> {
        self.backend.mark_read(id).await?;
        if let Some(m) = self.messages.iter_mut().find(|m| m.id == id) {
            m.is_read = true;
        }
        Ok(())
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), DeskError> {
        self.backend.delete(id).await?;
        self.messages.retain(|m| m.id != id);
        Ok(())
    }

    /// CSV of the currently filtered view, not the full list.
    pub fn export_csv(&self) -> String {
        export::to_csv(&self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::StatusFilter;
    use chrono::{TimeZone, Utc};

    /// Backend over a plain Vec, with a switch to make every call fail.
    struct FakeBackend {
        messages: Vec<ContactMessage>,
        fail: bool,
    }

    impl FakeBackend {
        fn check(&self) -> Result<(), DeskError> {
            if self.fail {
                Err(DeskError::Remote("backend unavailable".to_owned()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl MessageBackend for FakeBackend {
        async fn fetch_all(&mut self) -> Result<Vec<ContactMessage>, DeskError> {
            self.check()?;
            Ok(self.messages.clone())
        }

        async fn mark_read(&mut self, id: Uuid) -> Result<(), DeskError> {
            self.check()?;
            match self.messages.iter_mut().find(|m| m.id == id) {
                Some(m) => {
                    m.is_read = true;
                    Ok(())
                }
                None => Err(DeskError::Remote("no such message".to_owned())),
            }
        }

        async fn delete(&mut self, id: Uuid) -> Result<(), DeskError> {
            self.check()?;
            let before = self.messages.len();
            self.messages.retain(|m| m.id != id);
            if self.messages.len() == before {
                return Err(DeskError::Remote("no such message".to_owned()));
            }
            Ok(())
        }
    }

    fn msg(name: &str, is_read: bool, minute: u32) -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            service: None,
            message: "hello".to_owned(),
            is_read,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, minute, 0).unwrap(),
        }
    }

    fn dashboard(messages: Vec<ContactMessage>) -> Dashboard<FakeBackend> {
        Dashboard::new(FakeBackend {
            messages,
            fail: false,
        })
    }

    #[tokio::test]
    async fn refresh_loads_the_backend_list() {
        let mut dash = dashboard(vec![msg("A", false, 0), msg("B", true, 1)]);
        dash.refresh().await.unwrap();
        assert_eq!(dash.total(), 2);
        assert_eq!(dash.unread_count(), 1);
    }

    #[tokio::test]
    async fn successful_mark_read_updates_local_state() {
        let target = msg("A", false, 0);
        let id = target.id;
        let mut dash = dashboard(vec![target]);
        dash.refresh().await.unwrap();

        dash.mark_read(id).await.unwrap();
        assert!(dash.find(id).unwrap().is_read);
        assert_eq!(dash.unread_count(), 0);
    }

    #[tokio::test]
    async fn failed_mutation_leaves_local_state_unchanged() {
        let target = msg("A", false, 0);
        let id = target.id;
        let mut dash = dashboard(vec![target]);
        dash.refresh().await.unwrap();

        dash.backend.fail = true;
        assert!(dash.mark_read(id).await.is_err());
        assert!(!dash.find(id).unwrap().is_read);

        assert!(dash.delete(id).await.is_err());
        assert_eq!(dash.total(), 1);
    }

    #[tokio::test]
    async fn successful_delete_removes_the_message_locally() {
        let target = msg("A", false, 0);
        let id = target.id;
        let mut dash = dashboard(vec![target, msg("B", false, 1)]);
        dash.refresh().await.unwrap();

        dash.delete(id).await.unwrap();
        assert_eq!(dash.total(), 1);
        assert!(dash.find(id).is_none());
    }

    #[tokio::test]
    async fn view_and_export_follow_the_current_spec() {
        let mut dash = dashboard(vec![msg("A", true, 0), msg("B", false, 1)]);
        dash.refresh().await.unwrap();

        dash.spec.status = StatusFilter::Unread;
        let view = dash.view();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "B");

        let csv = dash.export_csv();
        assert_eq!(csv.lines().count(), 2, "header plus the one filtered row");
        assert!(csv.contains("\"B\""));
        assert!(!csv.contains("\"A\""));
    }
}
