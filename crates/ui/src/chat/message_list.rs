use std::rc::Rc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{ActiveTheme, h_flex, label::Label, v_flex, v_virtual_list};

use crate::chat::message::{Message, Sender};
use crate::chat::scroll_manager::ScrollManager;

const DEFAULT_CONTENT_WIDTH: Pixels = px(680.);
const LIST_HORIZONTAL_PADDING: Pixels = px(16.);
const CONTENT_WIDTH_CHANGE_EPSILON: f32 = 1.0;
const BUBBLE_MAX_WIDTH: Pixels = px(540.);
const BUBBLE_PADDING_X: Pixels = px(14.);
const BUBBLE_PADDING_Y: Pixels = px(10.);
const TIMESTAMP_ROW_HEIGHT: Pixels = px(16.);
const TIMESTAMP_ROW_GAP: Pixels = px(4.);
const ESTIMATED_TEXT_LINE_HEIGHT: Pixels = px(18.);
const ESTIMATED_CHAR_WIDTH: f32 = 7.0;
/// Fixed height of the typing-indicator bubble row.
const TYPING_ROW_HEIGHT: Pixels = px(26.);

/// Virtualized conversation transcript.
///
/// Rows are the messages in insertion order plus, while a reply is pending,
/// one trailing typing-indicator row that is pure decoration and never part
/// of conversation state.
pub struct MessageList {
    messages: Vec<Message>,
    awaiting_reply: bool,
    item_sizes: Rc<Vec<Size<Pixels>>>,
    scroll_manager: ScrollManager,
    content_width: Option<Pixels>,
}

impl MessageList {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            messages: Vec::new(),
            awaiting_reply: false,
            item_sizes: Rc::new(Vec::new()),
            scroll_manager: ScrollManager::new(),
            content_width: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Replaces the rendered snapshot of the conversation.
    ///
    /// Any growth of the row set (a new message, or the typing row appearing)
    /// requests a scroll so the newest element is visible.
    pub fn set_conversation(
        &mut self,
        messages: Vec<Message>,
        awaiting_reply: bool,
        cx: &mut Context<Self>,
    ) {
        let row_set_grew =
            messages.len() > self.messages.len() || (awaiting_reply && !self.awaiting_reply);

        self.messages = messages;
        self.awaiting_reply = awaiting_reply;
        self.rebuild_item_sizes();

        if row_set_grew {
            self.scroll_manager.request_scroll_to_bottom();
        }

        cx.notify();
    }

    fn update_content_width(&mut self, cx: &mut Context<Self>) {
        let list_width = self.scroll_manager.bounds().size.width;
        if list_width <= Pixels::ZERO {
            return;
        }

        let next_content_width = max_pixels(px(1.), list_width - LIST_HORIZONTAL_PADDING * 2);
        let width_changed = self.content_width.is_none_or(|current| {
            (f32::from(current) - f32::from(next_content_width)).abs()
                > CONTENT_WIDTH_CHANGE_EPSILON
        });

        if width_changed {
            self.content_width = Some(next_content_width);
            self.rebuild_item_sizes();
            cx.notify();
        }
    }

    fn rebuild_item_sizes(&mut self) {
        let content_width = self.content_width.unwrap_or(DEFAULT_CONTENT_WIDTH);
        self.item_sizes = Rc::new(build_row_sizes(
            &self.messages,
            self.awaiting_reply,
            content_width,
        ));
    }

    fn render_message_row(&self, message: &Message, cx: &mut Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let is_user = message.sender == Sender::User;

        v_flex()
            .w_full()
            .gap(TIMESTAMP_ROW_GAP)
            .when(is_user, |row| row.items_end())
            .when(!is_user, |row| row.items_start())
            .child(
                div()
                    .max_w(BUBBLE_MAX_WIDTH)
                    .px(BUBBLE_PADDING_X)
                    .py(BUBBLE_PADDING_Y)
                    .rounded_lg()
                    .when(is_user, |bubble| {
                        bubble.bg(theme.accent).text_color(theme.accent_foreground)
                    })
                    .when(!is_user, |bubble| {
                        bubble.bg(theme.muted).text_color(theme.foreground)
                    })
                    .child(Label::new(message.text.clone()).text_sm()),
            )
            .child(
                div()
                    .h(TIMESTAMP_ROW_HEIGHT)
                    .child(
                        Label::new(message.time_label())
                            .text_xs()
                            .text_color(theme.foreground.opacity(0.45)),
                    ),
            )
            .into_any_element()
    }

    fn render_typing_row(&self, cx: &mut Context<Self>) -> AnyElement {
        let theme = cx.theme();

        v_flex()
            .w_full()
            .items_start()
            .child(
                h_flex()
                    .h(TYPING_ROW_HEIGHT)
                    .px(BUBBLE_PADDING_X)
                    .rounded_lg()
                    .bg(theme.muted)
                    .items_center()
                    .gap_1()
                    .child(div().size(px(6.)).rounded_full().bg(theme.muted_foreground))
                    .child(div().size(px(6.)).rounded_full().bg(theme.muted_foreground))
                    .child(div().size(px(6.)).rounded_full().bg(theme.muted_foreground)),
            )
            .into_any_element()
    }
}

impl Render for MessageList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.update_content_width(cx);
        self.scroll_manager.apply_pending_scroll();

        v_flex().size_full().min_h_0().child(
            v_virtual_list(
                cx.entity().clone(),
                "message-list",
                self.item_sizes.clone(),
                |this, visible_range, _scroll_handle, cx| {
                    this.update_content_width(cx);
                    visible_range
                        .map(|index| match this.messages.get(index) {
                            Some(message) => {
                                let message = message.clone();
                                this.render_message_row(&message, cx)
                            }
                            // One virtual row past the last message is the
                            // typing indicator.
                            None => this.render_typing_row(cx),
                        })
                        .collect::<Vec<_>>()
                },
            )
            .size_full()
            .px_4()
            .py_3()
            .gap_3()
            .track_scroll(self.scroll_manager.handle()),
        )
    }
}

fn build_row_sizes(
    messages: &[Message],
    awaiting_reply: bool,
    content_width: Pixels,
) -> Vec<Size<Pixels>> {
    let mut sizes = messages
        .iter()
        .map(|message| size(px(0.), estimate_row_height(message, content_width)))
        .collect::<Vec<_>>();

    if awaiting_reply {
        sizes.push(size(px(0.), TYPING_ROW_HEIGHT));
    }

    sizes
}

fn estimate_row_height(message: &Message, content_width: Pixels) -> Pixels {
    let bubble_width = min_pixels(content_width, BUBBLE_MAX_WIDTH);
    let text_width = max_pixels(px(1.), bubble_width - BUBBLE_PADDING_X * 2);
    let text_height = estimate_text_height(&message.text, text_width);

    text_height + BUBBLE_PADDING_Y * 2 + TIMESTAMP_ROW_GAP + TIMESTAMP_ROW_HEIGHT
}

fn estimate_text_height(text: &str, width: Pixels) -> Pixels {
    if text.is_empty() {
        return ESTIMATED_TEXT_LINE_HEIGHT;
    }

    let width_as_f32 = f32::from(width);
    let chars_per_line = (width_as_f32 / ESTIMATED_CHAR_WIDTH).floor().max(1.0) as usize;

    let mut line_count = 0usize;
    for line in text.lines() {
        let char_count = line.chars().count().max(1);
        line_count += char_count.div_ceil(chars_per_line);
    }

    // Account for the trailing empty line when text ends with a newline.
    if text.ends_with('\n') {
        line_count += 1;
    }

    ESTIMATED_TEXT_LINE_HEIGHT * line_count.max(1)
}

fn max_pixels(a: Pixels, b: Pixels) -> Pixels {
    if f32::from(a) >= f32::from(b) { a } else { b }
}

fn min_pixels(a: Pixels, b: Pixels) -> Pixels {
    if f32::from(a) <= f32::from(b) { a } else { b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::MessageId;
    use chrono::Local;

    fn message(id: u64, sender: Sender, text: &str) -> Message {
        Message::new(MessageId::new(id), sender, text, Local::now())
    }

    #[test]
    fn typing_row_is_present_only_while_awaiting_a_reply() {
        let messages = vec![
            message(1, Sender::Assistant, "hello"),
            message(2, Sender::User, "hi"),
        ];

        let idle_sizes = build_row_sizes(&messages, false, px(680.));
        let awaiting_sizes = build_row_sizes(&messages, true, px(680.));

        assert_eq!(idle_sizes.len(), messages.len());
        assert_eq!(awaiting_sizes.len(), messages.len() + 1);
        assert_eq!(
            awaiting_sizes.last().map(|row| row.height),
            Some(TYPING_ROW_HEIGHT)
        );
    }

    #[test]
    fn row_metrics_are_deterministic_over_a_long_transcript() {
        let messages = (0..200)
            .map(|index| {
                let sender = if index % 2 == 0 {
                    Sender::User
                } else {
                    Sender::Assistant
                };
                message(
                    index as u64 + 1,
                    sender,
                    &format!("message-{index}: transcript fixture payload"),
                )
            })
            .collect::<Vec<_>>();

        let first_pass = build_row_sizes(&messages, false, px(680.));
        let second_pass = build_row_sizes(&messages, false, px(680.));

        assert_eq!(first_pass, second_pass);
        assert!(first_pass.iter().all(|row| row.height > Pixels::ZERO));
    }

    #[test]
    fn longer_text_never_yields_a_shorter_row() {
        let short = message(1, Sender::User, "hi");
        let long = message(
            2,
            Sender::User,
            &"the quarterly deck needs another pass over every appendix ".repeat(8),
        );

        let short_height = estimate_row_height(&short, px(680.));
        let long_height = estimate_row_height(&long, px(680.));

        assert!(long_height > short_height);
    }

    #[test]
    fn explicit_newlines_count_as_extra_lines() {
        let single = message(1, Sender::Assistant, "one line");
        let multi = message(2, Sender::Assistant, "one line\ntwo lines\nthree lines");

        assert!(
            estimate_row_height(&multi, px(680.)) > estimate_row_height(&single, px(680.))
        );
    }

    #[test]
    fn narrow_widths_still_produce_positive_heights() {
        let wrapped = message(1, Sender::User, "a reasonably long sentence to wrap");

        assert!(estimate_row_height(&wrapped, px(1.)) > Pixels::ZERO);
        assert!(estimate_text_height("", px(120.)) == ESTIMATED_TEXT_LINE_HEIGHT);
    }
}
