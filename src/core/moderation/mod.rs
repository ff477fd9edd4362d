// Core moderation module - contains AI content moderation business logic.
// Following the same pattern as the other core modules.

pub mod decision;
pub mod moderation_models;
pub mod moderation_service;
pub mod validator;

pub use moderation_models::*;
pub use moderation_service::*;
pub use validator::{decode_payload, validate_request};
