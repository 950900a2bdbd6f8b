use gpui::*;
use gpui_component::Root;

use parlor::app::{APP_TITLE, ChatShell, Quit, ToggleTasks};
use parlor::config::LaunchConfig;

/// Application entry point.
///
/// Bootstraps the GPUI application with:
/// 1. Tracing initialized from the environment (PARLOR_DEV_TOOLS, RUST_LOG)
/// 2. Asset loading via gpui-component-assets
/// 3. gpui-component initialization (required for Root, themes, buttons)
/// 4. Platform-conventional window-close semantics
/// 5. Window creation with Root wrapper for gpui-component composition
fn main() {
    let launch = LaunchConfig::from_env();
    launch.init_tracing();

    // Create application with bundled assets
    let app = Application::new().with_assets(gpui_component_assets::Assets);

    // Closing the last window terminates the process everywhere except macOS,
    // where the platform convention keeps the app resident.
    #[cfg(not(target_os = "macos"))]
    let app = app.with_quit_mode(QuitMode::LastWindowClosed);

    // macOS dock reactivation with no window left recreates the chat window.
    app.on_reopen(|cx| {
        if cx.windows().is_empty() {
            open_chat_window(cx);
        }
    });

    app.run(|cx| {
        // Initialize gpui-component - REQUIRED before any Root usage
        gpui_component::init(cx);

        // Quit action: cleanly shut down the application
        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });

        // Global keyboard shortcuts
        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-b", ToggleTasks, None),
        ]);

        open_chat_window(cx);
        cx.activate(true);
    });
}

fn open_chat_window(cx: &mut App) {
    let options = WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
            None,
            size(px(1200.), px(800.)),
            cx,
        ))),
        window_min_size: Some(size(px(800.), px(600.))),
        titlebar: Some(TitlebarOptions {
            title: Some(SharedString::from(APP_TITLE)),
            // Hidden-inset titlebar on macOS; everywhere else keeps the
            // native frame.
            #[cfg(target_os = "macos")]
            appears_transparent: true,
            #[cfg(target_os = "macos")]
            traffic_light_position: Some(point(px(9.), px(9.))),
            ..Default::default()
        }),
        ..Default::default()
    };

    // Failure to open the window is fatal to that window only; there is no
    // retry path.
    cx.open_window(options, |window, cx| {
        let shell = cx.new(|cx| ChatShell::new(window, cx));
        cx.new(|cx| Root::new(shell, window, cx))
    })
    .expect("failed to open chat window");
}
