use chrono::{DateTime, Local};

/// Stable identifier for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Creates a typed message identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Identifier for one scheduled simulated reply.
///
/// A fresh session is allocated per accepted submission so a delivery can be
/// checked against the submission that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReplySessionId(pub u64);

impl ReplySessionId {
    /// Creates a typed reply session identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Chat speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Assistant,
}

/// Core immutable message record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl Message {
    /// Creates a message stamped with its creation time.
    pub fn new(
        id: MessageId,
        sender: Sender,
        text: impl Into<String>,
        sent_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
            sent_at,
        }
    }

    /// Local time-of-day label shown under the message bubble.
    pub fn time_label(&self) -> String {
        self.sent_at.format("%I:%M %p").to_string()
    }
}

/// Reply lifecycle for one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyState {
    #[default]
    Idle,
    AwaitingReply(ReplySessionId),
}

/// State transition input for the reply lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTransition {
    Begin(ReplySessionId),
    Deliver(ReplySessionId),
}

/// Rejection reason for illegal reply transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTransitionRejection {
    ReplyAlreadyPending {
        active: ReplySessionId,
        attempted: ReplySessionId,
    },
    NoPendingReply,
    SessionMismatch {
        active: ReplySessionId,
        attempted: ReplySessionId,
    },
}

impl ReplyState {
    /// Returns true while a simulated reply is scheduled but not yet appended.
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingReply(_))
    }

    /// Applies one transition deterministically.
    ///
    /// At most one reply may be pending; a delivery must name the session
    /// that began it.
    pub fn apply(&self, transition: ReplyTransition) -> Result<Self, ReplyTransitionRejection> {
        match (self, transition) {
            (Self::Idle, ReplyTransition::Begin(session)) => Ok(Self::AwaitingReply(session)),
            (Self::AwaitingReply(active), ReplyTransition::Begin(attempted)) => {
                Err(ReplyTransitionRejection::ReplyAlreadyPending {
                    active: *active,
                    attempted,
                })
            }
            (Self::AwaitingReply(active), ReplyTransition::Deliver(attempted)) => {
                if *active == attempted {
                    Ok(Self::Idle)
                } else {
                    Err(ReplyTransitionRejection::SessionMismatch {
                        active: *active,
                        attempted,
                    })
                }
            }
            (Self::Idle, ReplyTransition::Deliver(_)) => {
                Err(ReplyTransitionRejection::NoPendingReply)
            }
        }
    }
}

/// Rejection reason for a submission that must not change the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    EmptyDraft,
    ReplyPending,
}

/// Conversation aggregate: the ordered message list plus reply lifecycle.
///
/// This is the whole mutable state of the chat view, kept free of UI types so
/// the submission rules can be exercised directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
    reply_state: ReplyState,
    next_message_id: u64,
    next_session_id: u64,
}

impl Conversation {
    /// Creates an empty conversation in idle state.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            reply_state: ReplyState::Idle,
            next_message_id: 1,
            next_session_id: 1,
        }
    }

    /// Messages in insertion order, which is also display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn reply_state(&self) -> ReplyState {
        self.reply_state
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.reply_state.is_awaiting()
    }

    /// Appends an assistant message outside the reply lifecycle.
    ///
    /// Used once per conversation to seed the opening greeting.
    pub fn seed_assistant(&mut self, text: impl Into<String>, sent_at: DateTime<Local>) -> MessageId {
        let id = self.alloc_message_id();
        self.messages
            .push(Message::new(id, Sender::Assistant, text, sent_at));
        id
    }

    /// Accepts a draft submission while idle.
    ///
    /// On success the user message is appended with the raw draft text and the
    /// returned session id identifies the reply that must eventually be
    /// delivered. Empty or whitespace-only drafts, and submissions while a
    /// reply is pending, are rejected without changing any state.
    pub fn submit(
        &mut self,
        draft: &str,
        sent_at: DateTime<Local>,
    ) -> Result<ReplySessionId, SubmitRejection> {
        if draft.trim().is_empty() {
            return Err(SubmitRejection::EmptyDraft);
        }

        let session = ReplySessionId::new(self.next_session_id);
        if self.apply_reply_transition(ReplyTransition::Begin(session)).is_err() {
            return Err(SubmitRejection::ReplyPending);
        }
        self.next_session_id = self.next_session_id.saturating_add(1);

        let id = self.alloc_message_id();
        self.messages
            .push(Message::new(id, Sender::User, draft, sent_at));
        Ok(session)
    }

    /// Delivers the simulated reply for an accepted submission.
    ///
    /// Appends exactly one assistant message and returns the conversation to
    /// idle. A delivery that does not match the pending session leaves the
    /// conversation untouched.
    pub fn deliver_reply(
        &mut self,
        session: ReplySessionId,
        text: impl Into<String>,
        sent_at: DateTime<Local>,
    ) -> Result<MessageId, ReplyTransitionRejection> {
        self.apply_reply_transition(ReplyTransition::Deliver(session))?;

        let id = self.alloc_message_id();
        self.messages
            .push(Message::new(id, Sender::Assistant, text, sent_at));
        Ok(id)
    }

    /// Applies a deterministic reply transition.
    pub fn apply_reply_transition(
        &mut self,
        transition: ReplyTransition,
    ) -> Result<ReplyState, ReplyTransitionRejection> {
        let next_state = self.reply_state.apply(transition)?;
        self.reply_state = next_state;
        Ok(next_state)
    }

    fn alloc_message_id(&mut self) -> MessageId {
        let id = MessageId::new(self.next_message_id);
        self.next_message_id = self.next_message_id.saturating_add(1);
        id
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Local> {
        Local::now()
    }

    #[test]
    fn submit_appends_user_message_and_awaits_reply() {
        let mut conversation = Conversation::new();

        let session = conversation.submit("Hello", now()).expect("accepted");

        assert_eq!(conversation.messages().len(), 1);
        let message = &conversation.messages()[0];
        assert_eq!(message.id, MessageId::new(1));
        assert_eq!(message.sender, Sender::User);
        assert_eq!(message.text, "Hello");
        assert_eq!(
            conversation.reply_state(),
            ReplyState::AwaitingReply(session)
        );
    }

    #[test]
    fn submitted_text_is_kept_raw() {
        let mut conversation = Conversation::new();

        conversation.submit("  spaced out  ", now()).expect("accepted");

        assert_eq!(conversation.messages()[0].text, "  spaced out  ");
    }

    #[test]
    fn empty_and_whitespace_drafts_are_rejected() {
        let mut conversation = Conversation::new();

        assert_eq!(conversation.submit("", now()), Err(SubmitRejection::EmptyDraft));
        assert_eq!(
            conversation.submit("   ", now()),
            Err(SubmitRejection::EmptyDraft)
        );
        assert_eq!(
            conversation.submit("\n\t ", now()),
            Err(SubmitRejection::EmptyDraft)
        );
        assert!(conversation.messages().is_empty());
        assert!(!conversation.is_awaiting_reply());
    }

    #[test]
    fn submission_while_awaiting_is_discarded_not_queued() {
        let mut conversation = Conversation::new();

        let session = conversation.submit("A", now()).expect("accepted");
        assert_eq!(
            conversation.submit("B", now()),
            Err(SubmitRejection::ReplyPending)
        );
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].text, "A");

        conversation
            .deliver_reply(session, "reply", now())
            .expect("delivered");

        // "B" was discarded outright; only A's reply arrives.
        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.messages()[1].sender, Sender::Assistant);
        assert!(!conversation.is_awaiting_reply());
    }

    #[test]
    fn delivery_returns_to_idle_and_appends_one_assistant_message() {
        let mut conversation = Conversation::new();
        let session = conversation.submit("question", now()).expect("accepted");

        let id = conversation
            .deliver_reply(session, "answer", now())
            .expect("delivered");

        assert_eq!(id, MessageId::new(2));
        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.messages()[1].text, "answer");
        assert_eq!(conversation.reply_state(), ReplyState::Idle);
    }

    #[test]
    fn delivery_without_pending_reply_is_rejected() {
        let mut conversation = Conversation::new();

        assert_eq!(
            conversation.deliver_reply(ReplySessionId::new(1), "answer", now()),
            Err(ReplyTransitionRejection::NoPendingReply)
        );
        assert!(conversation.messages().is_empty());
    }

    #[test]
    fn stale_session_delivery_is_rejected() {
        let mut conversation = Conversation::new();
        let session = conversation.submit("question", now()).expect("accepted");
        let stale = ReplySessionId::new(session.0 + 1);

        assert_eq!(
            conversation.deliver_reply(stale, "answer", now()),
            Err(ReplyTransitionRejection::SessionMismatch {
                active: session,
                attempted: stale,
            })
        );
        assert_eq!(conversation.messages().len(), 1);
        assert!(conversation.is_awaiting_reply());
    }

    #[test]
    fn message_identifiers_strictly_increase() {
        let mut conversation = Conversation::new();
        conversation.seed_assistant("greeting", now());

        for round in 0..5 {
            let session = conversation
                .submit(&format!("message {round}"), now())
                .expect("accepted");
            conversation
                .deliver_reply(session, "reply", now())
                .expect("delivered");
        }

        let ids = conversation
            .messages()
            .iter()
            .map(|message| message.id)
            .collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn seeded_conversation_walkthrough() {
        let mut conversation = Conversation::new();
        let greeting_id = conversation.seed_assistant("Welcome back!", now());
        assert_eq!(greeting_id, MessageId::new(1));

        let session = conversation.submit("Hello", now()).expect("accepted");
        assert_eq!(conversation.messages()[1].id, MessageId::new(2));
        assert_eq!(conversation.messages()[1].sender, Sender::User);
        assert_eq!(conversation.messages()[1].text, "Hello");

        let reply_id = conversation
            .deliver_reply(session, "How can I help?", now())
            .expect("delivered");
        assert_eq!(reply_id, MessageId::new(3));
        assert_eq!(conversation.messages()[2].sender, Sender::Assistant);
        assert!(!conversation.is_awaiting_reply());
    }

    #[test]
    fn begin_while_awaiting_is_rejected_by_the_state_machine() {
        let state = ReplyState::AwaitingReply(ReplySessionId::new(7));

        assert_eq!(
            state.apply(ReplyTransition::Begin(ReplySessionId::new(8))),
            Err(ReplyTransitionRejection::ReplyAlreadyPending {
                active: ReplySessionId::new(7),
                attempted: ReplySessionId::new(8),
            })
        );
    }

    #[test]
    fn time_label_is_a_local_clock_reading() {
        let message = Message::new(MessageId::new(1), Sender::User, "hi", now());

        let label = message.time_label();
        assert!(label.ends_with("AM") || label.ends_with("PM"), "{label}");
        assert!(label.contains(':'));
    }
}
