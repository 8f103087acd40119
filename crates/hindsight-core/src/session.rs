//! Current-user store.
//!
//! Holds the signed-in user and publishes changes to observers. Publish points
//! are the initial load from storage, login and logout; nothing polls.

use tokio::sync::watch;

use crate::auth::User;

/// Receiver half handed to observers.
pub type CurrentUserReceiver = watch::Receiver<Option<User>>;

/// Observable holder of the current user.
#[derive(Debug, Clone)]
pub struct CurrentUserStore {
    tx: watch::Sender<Option<User>>,
}

impl CurrentUserStore {
    /// Create the store with the value read from persistent storage.
    pub fn new(initial: Option<User>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Publish a new value to every observer.
    pub fn publish(&self, user: Option<User>) {
        tracing::debug!(signed_in = user.is_some(), "publishing current user");
        self.tx.send_replace(user);
    }

    /// Snapshot of the current value.
    pub fn current(&self) -> Option<User> {
        self.tx.borrow().clone()
    }

    /// Observe future changes; the receiver starts at the current value.
    pub fn subscribe(&self) -> CurrentUserReceiver {
        self.tx.subscribe()
    }
}

impl Default for CurrentUserStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> User {
        User {
            id: Some("u1".to_string()),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: None,
        }
    }

    #[test]
    fn test_initial_value() {
        let store = CurrentUserStore::new(Some(ada()));
        assert_eq!(store.current().map(|u| u.username), Some("ada".to_string()));
        assert!(CurrentUserStore::default().current().is_none());
    }

    #[tokio::test]
    async fn test_observers_see_publishes() {
        let store = CurrentUserStore::default();
        let mut rx = store.subscribe();
        assert!(rx.borrow().is_none());

        store.publish(Some(ada()));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|u| u.email.clone()),
            Some("ada@example.com".to_string())
        );

        store.publish(None);
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn test_publish_without_observers() {
        let store = CurrentUserStore::default();
        store.publish(Some(ada()));
        assert!(store.current().is_some());
    }
}
