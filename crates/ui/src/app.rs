use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{
    ActiveTheme, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};

use crate::chat::{ChatView, TaskPanel};

/// Window title shown in the top bar and the platform titlebar.
pub const APP_TITLE: &str = "Parlor";

/// Fixed width of the task side panel when visible.
pub const TASK_PANEL_WIDTH: f32 = 300.0;

#[cfg(target_os = "macos")]
const TOP_BAR_LEFT_SAFE_PADDING: f32 = 78.0;
#[cfg(not(target_os = "macos"))]
const TOP_BAR_LEFT_SAFE_PADDING: f32 = 16.0;

/// Computes the top bar height using a Zed-style responsive formula.
///
/// This keeps the title area consistent across platforms while still
/// respecting user font scaling via rem size.
fn top_bar_height(window: &Window) -> Pixels {
    (1.75 * window.rem_size()).max(px(34.0))
}

gpui::actions!(shell, [ToggleTasks, Quit,]);

/// Main application shell that manages the root layout.
///
/// The shell provides:
/// - The top bar with the task-panel toggle and the window title
/// - The chat view filling the remaining space
/// - A fixed-width task panel on the right, shown only while toggled on
pub struct ChatShell {
    chat_view: Entity<ChatView>,
    task_panel: Entity<TaskPanel>,
    /// Whether the task side panel is currently visible. Independent of
    /// conversation state.
    tasks_visible: bool,
}

impl ChatShell {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let chat_view = cx.new(|cx| ChatView::new(window, cx));
        let task_panel = cx.new(TaskPanel::new);

        Self {
            chat_view,
            task_panel,
            tasks_visible: false,
        }
    }

    pub fn tasks_visible(&self) -> bool {
        self.tasks_visible
    }

    /// Flips the task panel between hidden and visible.
    fn toggle_tasks(&mut self, cx: &mut Context<Self>) {
        self.tasks_visible = !self.tasks_visible;
        tracing::debug!(visible = self.tasks_visible, "toggled task panel");
        cx.notify();
    }
}

impl Render for ChatShell {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let bar_height = top_bar_height(window);

        v_flex()
            .id("chat-shell")
            .size_full()
            .bg(theme.background)
            .on_action(cx.listener(|this, _: &ToggleTasks, _window, cx| {
                this.toggle_tasks(cx);
            }))
            .child(self.render_top_bar(bar_height, cx))
            .child(
                h_flex()
                    .id("chat-shell-body")
                    .flex_1()
                    .min_w_0()
                    .min_h_0()
                    .overflow_hidden()
                    .child(
                        v_flex()
                            .id("chat-shell-main")
                            .flex_1()
                            .h_full()
                            .min_w_0()
                            .min_h_0()
                            .overflow_hidden()
                            .child(self.chat_view.clone()),
                    )
                    .when(self.tasks_visible, |body| {
                        body.child(self.render_task_panel(cx))
                    }),
            )
    }
}

impl ChatShell {
    fn render_top_bar(&self, bar_height: Pixels, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let toggle_glyph = if self.tasks_visible { "✓" } else { "☰" };

        h_flex()
            .id("chat-shell-top-bar")
            .window_control_area(WindowControlArea::Drag)
            .w_full()
            .h(bar_height)
            .flex_shrink_0()
            .pl(px(TOP_BAR_LEFT_SAFE_PADDING))
            .pr_3()
            .items_center()
            .gap_3()
            .bg(theme.background)
            .border_b_1()
            .border_color(theme.border)
            .child(
                Button::new("toggle-tasks")
                    .ghost()
                    .small()
                    .child(toggle_glyph)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.toggle_tasks(cx);
                    })),
            )
            .child(Label::new(APP_TITLE).text_sm())
    }

    fn render_task_panel(&self, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .id("task-panel-container")
            .h_full()
            .flex_shrink_0()
            .w(px(TASK_PANEL_WIDTH))
            .overflow_hidden()
            .bg(theme.background)
            .border_l_1()
            .border_color(theme.border)
            .child(self.task_panel.clone())
    }
}
