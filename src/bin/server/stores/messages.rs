use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use contact_desk::datatypes::{ContactMessage, NewMessage};

/// Store of contact messages, in insertion order.
///
/// `insert` is the only way a message comes into existence; it assigns the
/// id and the creation timestamp, and neither changes afterwards. The only
/// mutable field is `is_read`, and it only ever goes from false to true.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct MessageStore {
    entries: Vec<ContactMessage>,
}

impl MessageStore {
    pub fn insert(&mut self, new: NewMessage) -> ContactMessage {
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            service: new.service,
            message: new.message,
            is_read: false,
            created_at: Utc::now(),
        };
        self.entries.push(message.clone());
        message
    }

    pub fn get(&self, id: Uuid) -> Option<&ContactMessage> {
        self.entries.iter().find(|m| m.id == id)
    }

    /// All messages, newest first. The sort is stable, so messages sharing a
    /// timestamp keep their insertion order.
    pub fn all_newest_first(&self) -> Vec<ContactMessage> {
        let mut all = self.entries.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Returns false when no message has this id.
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        match self.entries.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.is_read = true;
                true
            }
            None => false,
        }
    }

    /// Returns false when no message has this id.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|m| m.id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(name: &str) -> NewMessage {
        NewMessage {
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            service: None,
            message: "hello".to_owned(),
        }
    }

    #[test]
    fn insert_assigns_id_timestamp_and_unread_status() {
        let mut store = MessageStore::default();
        let stored = store.insert(new_message("Jane"));

        assert!(!stored.is_read);
        assert_eq!(store.get(stored.id).unwrap(), &stored);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn inserted_ids_are_unique() {
        let mut store = MessageStore::default();
        let a = store.insert(new_message("A"));
        let b = store.insert(new_message("B"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn listing_is_newest_first_and_stable_for_ties() {
        let mut store = MessageStore::default();
        store.insert(new_message("A"));
        store.insert(new_message("B"));
        store.insert(new_message("C"));

        let listed = store.all_newest_first();
        assert_eq!(listed.len(), 3);
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn mark_read_flips_once_and_only_forward() {
        let mut store = MessageStore::default();
        let id = store.insert(new_message("Jane")).id;

        assert!(store.mark_read(id));
        assert!(store.get(id).unwrap().is_read);

        // Marking again is a harmless no-op; there is no way back to unread.
        assert!(store.mark_read(id));
        assert!(store.get(id).unwrap().is_read);

        assert!(!store.mark_read(Uuid::new_v4()));
    }

    #[test]
    fn remove_deletes_exactly_one_message() {
        let mut store = MessageStore::default();
        let keep = store.insert(new_message("Keep")).id;
        let gone = store.insert(new_message("Gone")).id;

        assert!(store.remove(gone));
        assert!(store.get(gone).is_none());
        assert!(store.get(keep).is_some());
        assert!(!store.remove(gone));
    }
}
