//! Session-keyed storage for form state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use super::{initialize_form, UserForm};

/// Opaque identifier of a browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A session's form plus whether its submission already completed.
///
/// A closed slot has been detached from the store; anyone who was waiting on
/// its lock must go back to the store for the session's current form.
#[derive(Debug)]
pub struct FormSlot {
    pub form: UserForm,
    closed: bool,
}

impl FormSlot {
    fn new() -> Self {
        Self {
            form: initialize_form(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Holding the lock serializes requests of that session.
pub type SharedForm = Arc<Mutex<FormSlot>>;

/// Exclusive access to a session's live form for the length of a request.
pub type FormGuard = OwnedMutexGuard<FormSlot>;

struct Entry {
    form: SharedForm,
    last_access: Instant,
}

/// One [`UserForm`] per session, created on first access and dropped on
/// successful submit or after the idle timeout.
pub struct FormSessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    idle_timeout: Duration,
}

impl FormSessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Lock the session's live form, initialising it if the session has none.
    ///
    /// Never returns a closed slot: a request that queued behind a submit
    /// retries against the fresh form that replaced it.
    pub async fn lock(&self, id: SessionId) -> FormGuard {
        self.lock_at(id, Instant::now()).await
    }

    async fn lock_at(&self, id: SessionId, now: Instant) -> FormGuard {
        loop {
            let guard = self.get_or_create_at(id, now).await.lock_owned().await;
            if !guard.closed {
                return guard;
            }
            tracing::debug!(session = %id, "Form was submitted while waiting, retrying");
        }
    }

    async fn get_or_create_at(&self, id: SessionId, now: Instant) -> SharedForm {
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions, now);

        let entry = sessions.entry(id).or_insert_with(|| {
            tracing::debug!(session = %id, "Initializing form session");
            Entry {
                form: Arc::new(Mutex::new(FormSlot::new())),
                last_access: now,
            }
        });
        entry.last_access = now;
        Arc::clone(&entry.form)
    }

    /// End the session's form after a successful submit.
    ///
    /// The slot is closed while still locked, so no queued request can
    /// mutate it afterwards. The next access starts from a fresh form.
    pub async fn complete(&self, id: SessionId, guard: &mut FormGuard) {
        guard.closed = true;
        let mut sessions = self.sessions.write().await;
        let owned = sessions
            .get(&id)
            .is_some_and(|entry| Arc::ptr_eq(&entry.form, OwnedMutexGuard::mutex(guard)));
        if owned {
            sessions.remove(&id);
            tracing::debug!(session = %id, "Cleared form session");
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn evict_idle(&self, sessions: &mut HashMap<SessionId, Entry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_access) <= self.idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "Evicted idle form sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::userform::{add_tag, SEED_TAGS};

    fn store() -> FormSessionStore {
        FormSessionStore::new(Duration::from_secs(60))
    }

    #[test]
    fn session_id_round_trips_through_display() {
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(&id.to_string()), Some(id));
        assert_eq!(SessionId::parse("not-a-uuid"), None);
    }

    #[tokio::test]
    async fn creates_default_form_on_first_access() {
        let store = store();
        let slot = store.lock(SessionId::generate()).await;
        assert_eq!(slot.form.tags, SEED_TAGS);
        assert!(!slot.is_closed());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn same_session_sees_its_mutations() {
        let store = store();
        let id = SessionId::generate();
        add_tag(&mut store.lock(id).await.form, Some("x"));
        let slot = store.lock(id).await;
        assert_eq!(slot.form.tags.last().map(String::as_str), Some("x"));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = store();
        let a = SessionId::generate();
        let b = SessionId::generate();
        add_tag(&mut store.lock(a).await.form, Some("only-a"));
        let other = store.lock(b).await;
        assert_eq!(other.form.tags, SEED_TAGS);
    }

    #[tokio::test]
    async fn complete_resets_to_fresh_form() {
        let store = store();
        let id = SessionId::generate();
        let mut slot = store.lock(id).await;
        add_tag(&mut slot.form, Some("x"));
        store.complete(id, &mut slot).await;
        assert!(slot.is_closed());
        drop(slot);
        assert!(store.is_empty().await);

        let fresh = store.lock(id).await;
        assert_eq!(fresh.form.tags, SEED_TAGS);
    }

    #[tokio::test]
    async fn request_queued_behind_submit_lands_on_fresh_form() {
        let store = Arc::new(store());
        let id = SessionId::generate();
        let mut submitting = store.lock(id).await;
        add_tag(&mut submitting.form, Some("submitted"));

        let waiter = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let mut slot = store.lock(id).await;
                add_tag(&mut slot.form, Some("after"));
                slot.form.tags.clone()
            })
        };
        tokio::task::yield_now().await;

        store.complete(id, &mut submitting).await;
        drop(submitting);

        let tags = waiter.await.unwrap();
        assert_eq!(tags, ["htmx-enthusiast", "spring-boot-dev", "after"]);
        let current = store.lock(id).await;
        assert_eq!(current.form.tags, tags);
    }

    #[tokio::test]
    async fn completing_a_detached_form_keeps_the_live_one() {
        let store = FormSessionStore::new(Duration::from_secs(60));
        let start = Instant::now();
        let id = SessionId::generate();
        let mut stale = store.lock_at(id, start).await;

        // The stale form is evicted and replaced while still locked.
        let later = start + Duration::from_secs(61);
        let mut live = store.lock_at(id, later).await;
        add_tag(&mut live.form, Some("live"));
        drop(live);

        store.complete(id, &mut stale).await;
        drop(stale);
        let current = store.lock(id).await;
        assert_eq!(current.form.tags.last().map(String::as_str), Some("live"));
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted_on_access() {
        let store = store();
        let start = Instant::now();
        let stale = SessionId::generate();
        add_tag(&mut store.lock_at(stale, start).await.form, Some("x"));

        let later = start + Duration::from_secs(61);
        drop(store.lock_at(SessionId::generate(), later).await);
        assert_eq!(store.len().await, 1);

        let slot = store.lock_at(stale, later).await;
        assert_eq!(slot.form.tags, SEED_TAGS);
    }

    #[tokio::test]
    async fn concurrent_adds_in_one_session_are_all_kept() {
        let store = Arc::new(store());
        let id = SessionId::generate();
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let mut slot = store.lock(id).await;
                    add_tag(&mut slot.form, Some(&format!("tag-{i}")));
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        let slot = store.lock(id).await;
        assert_eq!(slot.form.tags.len(), SEED_TAGS.len() + 20);
    }
}
