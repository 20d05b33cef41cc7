//! Role-swap transform
//!
//! One shared transcript serves as first-person context for both
//! participants. Before either side speaks, the log is re-labeled so that
//! the upcoming speaker's own prior turns read as [`Role::Assistant`] and
//! everyone else's turns read as [`Role::User`].

use crate::conversation::message::{Message, Role};

/// Present the log from `speaker`'s point of view.
///
/// Pure and idempotent: turns already labeled as incoming stay incoming, so
/// applying the transform twice with the same speaker is a no-op on the
/// second pass.
pub fn swap_roles(messages: &[Message], speaker: &str) -> Vec<Message> {
    messages
        .iter()
        .map(|message| {
            let mut message = message.clone();
            if message.role == Role::Assistant && message.author != speaker {
                message.role = Role::User;
            }
            message
        })
        .collect()
}
