pub mod groq {
    pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
    pub const API_BASE: &str = "https://api.groq.com/openai/v1";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";
    /// Spelling used by older `.env` files.
    pub const LEGACY_API_KEY_ENV_VAR: &str = "groq_API_KEY";
}
