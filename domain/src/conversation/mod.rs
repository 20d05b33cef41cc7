//! Conversation state: the append-only message log, the reference map, and
//! the role-swap transform that presents one transcript from either
//! participant's point of view.

pub mod message;
pub mod state;
pub mod swap;

pub use message::{EndIntent, Message, Role};
pub use state::ConversationState;
pub use swap::swap_roles;
