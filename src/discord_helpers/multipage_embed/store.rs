use std::collections::HashMap;
use std::time::Instant;

use serenity::all::{ChannelId, MessageId, UserId};
use tokio::sync::Mutex;

use super::options::ControlAppearance;
use super::session::{Direction, Navigate, PaginationSession};
use crate::error::{PaginatorError, Result};

pub const DEFAULT_CAPACITY: usize = 1024;

struct Entry<P> {
    session: PaginationSession<P>,
    channel: ChannelId,
    deadline: Instant,
}

impl<P> Entry<P> {
    fn expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// What a message should show right now.
#[derive(Debug, Clone)]
pub struct PageView<P> {
    pub page: P,
    pub index: usize,
    pub total: usize,
    pub controls: ControlAppearance,
}

/// A session that left the store, with enough context to tidy up its message.
#[derive(Debug)]
pub struct ExpiredSession<P> {
    pub message: MessageId,
    pub channel: ChannelId,
    pub session: PaginationSession<P>,
}

/// Where one message's session stands against the clock.
#[derive(Debug)]
pub enum Expiry<P> {
    /// Not in the store: disposed, evicted, or never registered.
    Gone,
    /// Still live until the given deadline.
    Pending(Instant),
    /// The session had lapsed; it and every other lapsed session were swept.
    Swept(Vec<ExpiredSession<P>>),
}

/// Live sessions keyed by the message that displays them.
///
/// Bounded: once `capacity` sessions are live, inserting drops expired
/// entries first and then the one closest to its deadline.
pub struct SessionStore<P> {
    capacity: usize,
    sessions: Mutex<HashMap<MessageId, Entry<P>>>,
}

impl<P> SessionStore<P> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Register a session for `message`. Returns whatever had to be evicted to make room.
    pub async fn insert(
        &self,
        message: MessageId,
        channel: ChannelId,
        session: PaginationSession<P>,
        now: Instant,
    ) -> Vec<ExpiredSession<P>> {
        let mut sessions = self.sessions.lock().await;
        let mut evicted = Vec::new();

        if !sessions.contains_key(&message) && sessions.len() >= self.capacity {
            evicted = drain_expired(&mut sessions, now);

            if sessions.len() >= self.capacity {
                let oldest = sessions
                    .iter()
                    .min_by_key(|(_, entry)| entry.deadline)
                    .map(|(id, _)| *id);
                if let Some(id) = oldest {
                    if let Some(entry) = sessions.remove(&id) {
                        evicted.push(ExpiredSession {
                            message: id,
                            channel: entry.channel,
                            session: entry.session,
                        });
                    }
                }
            }
        }

        let deadline = now + session.timeout();
        sessions.insert(
            message,
            Entry {
                session,
                channel,
                deadline,
            },
        );

        evicted
    }

    /// Apply a button press.
    ///
    /// Ownership is read from the stored session at press time. Any press on a
    /// live session pushes the deadline out; only an authorised one moves the page.
    /// An expired entry is left in place for `evict_expired` to hand over for cleanup.
    pub async fn navigate(
        &self,
        message: MessageId,
        actor: UserId,
        direction: Direction,
        now: Instant,
    ) -> Result<PageView<P>>
    where
        P: Clone,
    {
        let mut sessions = self.sessions.lock().await;

        let Some(entry) = sessions.get_mut(&message) else {
            return Err(PaginatorError::MissingSession(message));
        };

        if entry.expired(now) {
            return Err(PaginatorError::MissingSession(message));
        }

        entry.deadline = now + entry.session.timeout();

        if !entry.session.may_control(actor) {
            return Err(PaginatorError::PermissionDenied);
        }

        entry.session.step(direction);

        Ok(snapshot(&entry.session))
    }

    pub async fn view(&self, message: MessageId) -> Option<PageView<P>>
    where
        P: Clone,
    {
        let sessions = self.sessions.lock().await;
        sessions.get(&message).map(|entry| snapshot(&entry.session))
    }

    pub async fn deadline(&self, message: MessageId) -> Option<Instant> {
        let sessions = self.sessions.lock().await;
        sessions.get(&message).map(|entry| entry.deadline)
    }

    pub async fn remove(&self, message: MessageId) -> Option<ExpiredSession<P>> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(&message).map(|entry| ExpiredSession {
            message,
            channel: entry.channel,
            session: entry.session,
        })
    }

    /// Read the deadline and sweep under one lock, so a press can never land
    /// between the two.
    pub async fn check_expiry(&self, message: MessageId, now: Instant) -> Expiry<P> {
        let mut sessions = self.sessions.lock().await;

        match sessions.get(&message) {
            None => Expiry::Gone,
            Some(entry) if !entry.expired(now) => Expiry::Pending(entry.deadline),
            Some(_) => Expiry::Swept(drain_expired(&mut sessions, now)),
        }
    }

    pub async fn evict_expired(&self, now: Instant) -> Vec<ExpiredSession<P>> {
        let mut sessions = self.sessions.lock().await;
        drain_expired(&mut sessions, now)
    }
}

impl<P> Default for SessionStore<P> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn snapshot<P: Clone>(session: &PaginationSession<P>) -> PageView<P> {
    PageView {
        page: session.current_page().clone(),
        index: session.current_index(),
        total: session.total(),
        controls: session.controls().clone(),
    }
}

fn drain_expired<P>(
    sessions: &mut HashMap<MessageId, Entry<P>>,
    now: Instant,
) -> Vec<ExpiredSession<P>> {
    let expired: Vec<MessageId> = sessions
        .iter()
        .filter(|(_, entry)| entry.expired(now))
        .map(|(id, _)| *id)
        .collect();

    expired
        .into_iter()
        .filter_map(|id| {
            sessions.remove(&id).map(|entry| ExpiredSession {
                message: id,
                channel: entry.channel,
                session: entry.session,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::discord_helpers::multipage_embed::options::PaginatorOptions;

    fn owner() -> UserId {
        UserId::new(1)
    }

    fn stranger() -> UserId {
        UserId::new(2)
    }

    fn channel() -> ChannelId {
        ChannelId::new(10)
    }

    fn session(options: PaginatorOptions) -> PaginationSession<&'static str> {
        PaginationSession::new(vec!["A", "B", "C"], owner(), &options).unwrap()
    }

    #[tokio::test]
    async fn walkthrough_through_the_store() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let msg = MessageId::new(100);
        store
            .insert(msg, channel(), session(PaginatorOptions::new()), now)
            .await;

        let b = store.navigate(msg, owner(), Direction::Next, now).await;
        assert_eq!(b.unwrap().page, "B");
        let c = store.navigate(msg, owner(), Direction::Next, now).await;
        assert_eq!(c.unwrap().page, "C");
        let wrapped = store
            .navigate(msg, owner(), Direction::Next, now)
            .await
            .unwrap();
        assert_eq!((wrapped.page, wrapped.index, wrapped.total), ("A", 0, 3));
        let back = store.navigate(msg, owner(), Direction::Previous, now).await;
        assert_eq!(back.unwrap().index, 2);
    }

    #[tokio::test]
    async fn stranger_is_denied_on_restricted_session() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let msg = MessageId::new(100);
        let options = PaginatorOptions::new().restrict_to_owner(true);
        store.insert(msg, channel(), session(options), now).await;

        let denied = store.navigate(msg, stranger(), Direction::Next, now).await;
        assert!(matches!(denied, Err(PaginatorError::PermissionDenied)));
        assert_eq!(store.view(msg).await.unwrap().index, 0);

        let accepted = store.navigate(msg, owner(), Direction::Next, now).await;
        assert_eq!(accepted.unwrap().index, 1);
    }

    #[tokio::test]
    async fn stranger_may_drive_an_open_session() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let msg = MessageId::new(100);
        store
            .insert(msg, channel(), session(PaginatorOptions::new()), now)
            .await;

        let view = store.navigate(msg, stranger(), Direction::Previous, now).await;
        assert_eq!(view.unwrap().index, 2);
    }

    #[tokio::test]
    async fn unknown_message_is_a_missing_session() {
        let store: SessionStore<&str> = SessionStore::new(8);
        let msg = MessageId::new(5);
        let result = store
            .navigate(msg, owner(), Direction::Next, Instant::now())
            .await;
        assert!(matches!(result, Err(PaginatorError::MissingSession(id)) if id == msg));
    }

    #[tokio::test]
    async fn expired_session_is_kept_for_cleanup_after_a_late_press() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let msg = MessageId::new(100);
        store
            .insert(msg, channel(), session(PaginatorOptions::new().timeout_secs(1)), now)
            .await;

        let later = now + Duration::from_secs(2);
        let result = store.navigate(msg, owner(), Direction::Next, later).await;
        assert!(matches!(result, Err(PaginatorError::MissingSession(_))));

        let evicted = store.evict_expired(later).await;
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].message, msg);
        assert_eq!(evicted[0].channel, channel());
        assert_eq!(evicted[0].session.current_index(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn accepted_press_refreshes_the_deadline() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let msg = MessageId::new(100);
        store
            .insert(msg, channel(), session(PaginatorOptions::new().timeout_secs(10)), now)
            .await;

        let press_at = now + Duration::from_secs(8);
        store
            .navigate(msg, owner(), Direction::Next, press_at)
            .await
            .unwrap();
        assert_eq!(
            store.deadline(msg).await,
            Some(press_at + Duration::from_secs(10))
        );

        let evicted = store.evict_expired(now + Duration::from_secs(12)).await;
        assert!(evicted.is_empty());
    }

    #[tokio::test]
    async fn rejected_press_still_refreshes_the_deadline() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let msg = MessageId::new(100);
        let options = PaginatorOptions::new().restrict_to_owner(true).timeout_secs(10);
        store.insert(msg, channel(), session(options), now).await;

        let press_at = now + Duration::from_secs(8);
        let denied = store.navigate(msg, stranger(), Direction::Next, press_at).await;
        assert!(matches!(denied, Err(PaginatorError::PermissionDenied)));
        assert_eq!(store.deadline(msg).await, Some(press_at + Duration::from_secs(10)));
        assert_eq!(store.view(msg).await.unwrap().index, 0);
    }

    #[tokio::test]
    async fn empty_pages_never_reach_the_store() {
        let store: SessionStore<&str> = SessionStore::new(8);
        let now = Instant::now();

        let register = |pages: Vec<&'static str>| {
            PaginationSession::new(pages, owner(), &PaginatorOptions::new())
        };

        match register(vec![]) {
            Ok(s) => {
                store.insert(MessageId::new(1), channel(), s, now).await;
            }
            Err(e) => assert!(matches!(e, PaginatorError::InvalidArgument(_))),
        }
        assert_eq!(store.len().await, 0);

        let s = register(vec!["A"]).unwrap();
        store.insert(MessageId::new(2), channel(), s, now).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn expiry_check_follows_a_refreshed_deadline() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let msg = MessageId::new(100);
        store
            .insert(msg, channel(), session(PaginatorOptions::new().timeout_secs(10)), now)
            .await;

        let press_at = now + Duration::from_secs(9);
        store
            .navigate(msg, owner(), Direction::Next, press_at)
            .await
            .unwrap();

        // the original deadline has passed, but the press moved it
        let at_old_deadline = now + Duration::from_secs(10);
        match store.check_expiry(msg, at_old_deadline).await {
            Expiry::Pending(deadline) => {
                assert_eq!(deadline, press_at + Duration::from_secs(10))
            }
            other => panic!("expected pending, got {other:?}"),
        }

        let past_new_deadline = press_at + Duration::from_secs(10);
        match store.check_expiry(msg, past_new_deadline).await {
            Expiry::Swept(expired) => {
                assert_eq!(expired.len(), 1);
                assert_eq!(expired[0].message, msg);
            }
            other => panic!("expected swept, got {other:?}"),
        }

        assert!(matches!(
            store.check_expiry(msg, past_new_deadline).await,
            Expiry::Gone
        ));
    }

    #[tokio::test]
    async fn expiry_check_sweeps_other_lapsed_sessions_too() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let short = PaginatorOptions::new().timeout_secs(1);
        store
            .insert(MessageId::new(1), channel(), session(short.clone()), now)
            .await;
        store
            .insert(MessageId::new(2), channel(), session(short), now)
            .await;

        match store
            .check_expiry(MessageId::new(1), now + Duration::from_secs(2))
            .await
        {
            Expiry::Swept(expired) => assert_eq!(expired.len(), 2),
            other => panic!("expected swept, got {other:?}"),
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn evict_expired_reports_where_the_message_lives() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        store
            .insert(
                MessageId::new(1),
                channel(),
                session(PaginatorOptions::new().timeout_secs(1)),
                now,
            )
            .await;
        store
            .insert(
                MessageId::new(2),
                channel(),
                session(PaginatorOptions::new().timeout_secs(60)),
                now,
            )
            .await;

        let evicted = store.evict_expired(now + Duration::from_secs(2)).await;
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].message, MessageId::new(1));
        assert_eq!(evicted[0].channel, channel());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn capacity_is_never_exceeded() {
        let store = SessionStore::new(2);
        let now = Instant::now();

        for (i, secs) in [(1_u64, 30_u64), (2, 10), (3, 60)] {
            store
                .insert(
                    MessageId::new(i),
                    channel(),
                    session(PaginatorOptions::new().timeout_secs(secs)),
                    now,
                )
                .await;
            assert!(store.len().await <= store.capacity());
        }

        // message 2 had the nearest deadline
        assert!(store.view(MessageId::new(2)).await.is_none());
        assert!(store.view(MessageId::new(1)).await.is_some());
        assert!(store.view(MessageId::new(3)).await.is_some());
    }

    #[tokio::test]
    async fn full_store_prefers_evicting_expired_sessions() {
        let store = SessionStore::new(2);
        let now = Instant::now();
        let long = PaginatorOptions::new().timeout_secs(60);
        store
            .insert(MessageId::new(1), channel(), session(long.clone()), now)
            .await;
        store
            .insert(
                MessageId::new(2),
                channel(),
                session(PaginatorOptions::new().timeout_secs(1)),
                now,
            )
            .await;

        let evicted = store
            .insert(
                MessageId::new(3),
                channel(),
                session(long),
                now + Duration::from_secs(5),
            )
            .await;
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].message, MessageId::new(2));
        assert!(store.view(MessageId::new(1)).await.is_some());
    }

    #[tokio::test]
    async fn sessions_on_different_messages_are_independent() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let (a, b) = (MessageId::new(1), MessageId::new(2));
        store
            .insert(a, channel(), session(PaginatorOptions::new()), now)
            .await;
        store
            .insert(b, channel(), session(PaginatorOptions::new()), now)
            .await;

        store.navigate(a, owner(), Direction::Next, now).await.unwrap();
        assert_eq!(store.view(a).await.unwrap().index, 1);
        assert_eq!(store.view(b).await.unwrap().index, 0);
    }

    #[tokio::test]
    async fn removed_session_is_gone() {
        let store = SessionStore::new(8);
        let now = Instant::now();
        let msg = MessageId::new(9);
        store
            .insert(msg, channel(), session(PaginatorOptions::new()), now)
            .await;

        assert!(store.remove(msg).await.is_some());
        assert!(store.remove(msg).await.is_none());
        let result = store.navigate(msg, owner(), Direction::Next, now).await;
        assert!(matches!(result, Err(PaginatorError::MissingSession(_))));
    }
}
