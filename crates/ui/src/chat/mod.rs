/// Event contracts for chat module wiring.
pub mod events;
/// Domain entities and the deterministic reply lifecycle.
pub mod message;
pub mod message_input;
pub mod message_list;
/// Canned assistant replies and the simulated delay.
pub mod responder;
pub mod scroll_manager;
pub mod task_panel;
pub mod view;

pub use events::Submit;
pub use message::{
    Conversation, Message, MessageId, ReplySessionId, ReplyState, ReplyTransition,
    ReplyTransitionRejection, Sender, SubmitRejection,
};
pub use message_input::MessageInput;
pub use message_list::MessageList;
pub use responder::{GREETING, REPLY_DELAY, canned_reply, is_canned_reply};
pub use scroll_manager::ScrollManager;
pub use task_panel::TaskPanel;
pub use view::ChatView;
