use std::time::Duration;

use rand::prelude::IndexedRandom;

/// Delay between an accepted submission and its simulated reply.
pub const REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Greeting seeded into every new conversation so the window never opens empty.
pub const GREETING: &str = "Hi! Based on your meeting with your manager, it \
looks like the quarterly deck still needs a few updates.";

const CANNED_REPLIES: [&str; 4] = [
    "I understand. Let me help you with those updates. What specific changes did your manager ask for?",
    "That sounds important. Can you tell me more about what needs to change?",
    "I'm here to help! Which sections of the deck need revision?",
    "Got it. Let's work through the updates together. What feedback did you receive?",
];

/// Picks one canned reply uniformly at random.
pub fn canned_reply() -> &'static str {
    CANNED_REPLIES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(CANNED_REPLIES[0])
}

/// Returns true when `text` is a member of the canned-reply set.
pub fn is_canned_reply(text: &str) -> bool {
    CANNED_REPLIES.contains(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_reply_always_comes_from_the_fixed_set() {
        for _ in 0..100 {
            assert!(is_canned_reply(canned_reply()));
        }
    }

    #[test]
    fn every_canned_reply_is_reachable() {
        let mut seen = std::collections::HashSet::new();
        // (3/4)^400 leaves no realistic chance of missing a member.
        for _ in 0..400 {
            seen.insert(canned_reply());
        }
        assert_eq!(seen.len(), CANNED_REPLIES.len());
    }

    #[test]
    fn greeting_is_not_a_canned_reply() {
        assert!(!is_canned_reply(GREETING));
    }
}
