use gpui::*;
use gpui_component::{
    ActiveTheme, Disableable, IconName, Sizable,
    button::{Button, ButtonVariants},
    input::{Input, InputEvent, InputState},
    v_flex,
};

use crate::chat::events::Submit;

/// Longest the compose control may grow before it scrolls internally.
const INPUT_MAX_ROWS: usize = 6;

/// Compose control: an auto-growing draft editor plus the send button.
///
/// Plain Enter submits, Shift+Enter inserts a newline. The send button is
/// enabled only while the draft has non-whitespace content and no simulated
/// reply is pending; a guarded submission is a no-op that keeps the draft.
pub struct MessageInput {
    input_state: Entity<InputState>,
    reply_pending: bool,
    has_draft: bool,
    pending_newline: bool,
}

impl EventEmitter<Submit> for MessageInput {}

impl MessageInput {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder("Message about your project...")
                .clean_on_escape()
                .auto_grow(1, INPUT_MAX_ROWS)
        });

        cx.subscribe_in(
            &input_state,
            window,
            |this, _, event: &InputEvent, window, cx| {
                if let InputEvent::PressEnter { secondary } = event {
                    if *secondary {
                        this.pending_newline = false;
                    } else if this.pending_newline {
                        // Shift+Enter inserts a newline manually and then still
                        // emits PressEnter. Consume that synthetic enter so it
                        // never triggers submit.
                        this.pending_newline = false;
                    } else {
                        this.trim_trailing_newline(window, cx);
                        this.handle_submit(window, cx);
                    }
                }

                this.refresh_draft_state(cx);
            },
        )
        .detach();

        Self {
            input_state,
            reply_pending: false,
            has_draft: false,
            pending_newline: false,
        }
    }

    /// Marks whether a simulated reply is currently pending.
    pub fn set_reply_pending(&mut self, pending: bool, cx: &mut Context<Self>) {
        self.reply_pending = pending;
        cx.notify();
    }

    pub fn clear(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.set_value("", window, cx);
        });
        self.has_draft = false;
        self.pending_newline = false;
    }

    fn can_send(&self) -> bool {
        self.has_draft && !self.reply_pending
    }

    fn refresh_draft_state(&mut self, cx: &mut Context<Self>) {
        let has_draft = !self.input_state.read(cx).value().trim().is_empty();
        if has_draft != self.has_draft {
            self.has_draft = has_draft;
            cx.notify();
        }
    }

    fn handle_shift_enter(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.pending_newline = true;
        self.input_state.update(cx, |state, cx| {
            state.insert("\n", window, cx);
        });
        cx.notify();
    }

    fn trim_trailing_newline(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            let value = state.value().to_string();
            if let Some(trimmed) = value.strip_suffix('\n') {
                state.set_value(trimmed.to_string(), window, cx);
            }
        });
    }

    fn handle_submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.reply_pending {
            tracing::debug!("submission ignored while a reply is pending");
            return;
        }

        let content = self.input_state.read(cx).value().to_string();
        if content.trim().is_empty() {
            return;
        }

        cx.emit(Submit::new(content));
        self.clear(window, cx);
    }
}

impl Render for MessageInput {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let can_send = self.can_send();

        v_flex()
            .bg(theme.background)
            .gap_2()
            .p_3()
            .child(
                div()
                    .w_full()
                    .px_3()
                    .py_2()
                    .rounded_lg()
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.background)
                    .on_key_down(cx.listener(|this, event: &KeyDownEvent, window, cx| {
                        if event.keystroke.key == "enter" && event.keystroke.modifiers.shift {
                            this.handle_shift_enter(window, cx);
                        }
                    }))
                    .child(Input::new(&self.input_state).w_full()),
            )
            .child(
                div().w_full().flex().justify_end().child(
                    Button::new("send")
                        .small()
                        .primary()
                        .icon(IconName::ArrowUp)
                        .child("Send")
                        .disabled(!can_send)
                        .on_click(cx.listener(|this, _, window, cx| {
                            this.handle_submit(window, cx);
                        })),
                ),
            )
    }
}
