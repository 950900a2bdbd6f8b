#![deny(unsafe_code)]

/// Desktop chat-window mockup built with GPUI and gpui-component.
///
/// One window, one conversation: submissions are answered by a canned reply
/// after a fixed delay, and a togglable task panel sits beside the chat.
pub mod app;
/// Chat domain model, events, and components.
pub mod chat;
/// Launch-time environment configuration.
pub mod config;
