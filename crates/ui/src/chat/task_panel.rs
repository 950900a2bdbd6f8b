use gpui::*;
use gpui_component::{ActiveTheme, label::Label, v_flex};

/// Placeholder content for the togglable task side panel.
///
/// The panel is intentionally empty; it exists only so the shell has
/// something to show and hide.
pub struct TaskPanel;

impl TaskPanel {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self
    }
}

impl Render for TaskPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .size_full()
            .p_5()
            .gap_3()
            .child(Label::new("Tasks").text_sm())
            .child(
                Label::new("Task view will land here in a later iteration.")
                    .text_xs()
                    .text_color(theme.muted_foreground),
            )
    }
}
