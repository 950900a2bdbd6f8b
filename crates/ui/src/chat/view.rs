use chrono::Local;
use gpui::*;
use gpui_component::{ActiveTheme, v_flex};

use crate::chat::events::Submit;
use crate::chat::message::{Conversation, ReplySessionId};
use crate::chat::responder::{GREETING, REPLY_DELAY, canned_reply};
use crate::chat::{MessageInput, MessageList};

/// Parent coordinator for the conversation, the transcript, and the compose
/// control.
///
/// All conversation mutations happen here, on the window's single logical
/// thread: a submission appends the user message and schedules one deferred
/// delivery task; the task fires once after [`REPLY_DELAY`] and appends the
/// canned reply. The reply state gates further submissions, so at most one
/// delivery task exists at a time.
pub struct ChatView {
    message_list: Entity<MessageList>,
    message_input: Entity<MessageInput>,
    conversation: Conversation,
    reply_task: Option<Task<()>>,
}

impl ChatView {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let message_list = cx.new(MessageList::new);
        let message_input = cx.new(|cx| MessageInput::new(window, cx));

        cx.subscribe(&message_input, |this, _, event: &Submit, cx| {
            this.handle_submit(event.clone(), cx);
        })
        .detach();

        let mut conversation = Conversation::new();
        conversation.seed_assistant(GREETING, Local::now());

        let mut this = Self {
            message_list,
            message_input,
            conversation,
            reply_task: None,
        };
        this.sync_message_list(cx);
        this
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    fn handle_submit(&mut self, event: Submit, cx: &mut Context<Self>) {
        let session = match self.conversation.submit(&event.content, Local::now()) {
            Ok(session) => session,
            Err(rejection) => {
                tracing::debug!(?rejection, "submission ignored");
                return;
            }
        };

        tracing::debug!(session = session.0, "scheduled simulated reply");

        self.message_input.update(cx, |input, cx| {
            input.set_reply_pending(true, cx);
        });
        self.sync_message_list(cx);

        // One-shot deferred delivery; the reply state, not cancellation,
        // guarantees a single outstanding task.
        self.reply_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(REPLY_DELAY).await;

            let _ = this.update(cx, |this, cx| {
                this.deliver_reply(session, cx);
            });
        }));

        cx.notify();
    }

    fn deliver_reply(&mut self, session: ReplySessionId, cx: &mut Context<Self>) {
        match self
            .conversation
            .deliver_reply(session, canned_reply(), Local::now())
        {
            Ok(message_id) => {
                tracing::debug!(message_id = message_id.0, "delivered simulated reply");
            }
            Err(rejection) => {
                tracing::warn!(?rejection, "dropped simulated reply");
            }
        }

        self.reply_task = None;
        self.message_input.update(cx, |input, cx| {
            input.set_reply_pending(false, cx);
        });
        self.sync_message_list(cx);
        cx.notify();
    }

    fn sync_message_list(&mut self, cx: &mut Context<Self>) {
        let messages = self.conversation.messages().to_vec();
        let awaiting_reply = self.conversation.is_awaiting_reply();

        self.message_list.update(cx, |list, cx| {
            list.set_conversation(messages, awaiting_reply, cx);
        });
    }
}

impl Render for ChatView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .id("chat-view")
            .size_full()
            .min_h_0()
            .overflow_hidden()
            .bg(theme.background)
            .child(
                div()
                    .id("chat-view-message-list")
                    .flex_1()
                    .min_h_0()
                    .child(self.message_list.clone()),
            )
            .child(
                div()
                    .id("chat-view-message-input")
                    .flex_shrink_0()
                    .w_full()
                    .border_t_1()
                    .border_color(theme.border)
                    .child(self.message_input.clone()),
            )
    }
}
