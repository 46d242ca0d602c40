// Real-estate chat: relevance gate, persona prompt, single completion call.
// Conversation memory is not kept; every message is answered on its own.

pub mod handlers;
pub mod prompts;
pub mod relevance;
pub mod responder;
