pub mod openai_moderation_client;

pub use openai_moderation_client::OpenAiModerationClient;
