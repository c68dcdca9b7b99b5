// === Formatting ===
pub const MAX_LINE_WIDTH: usize = 80;
pub const COMMENT_OPEN: &str = "/*";
pub const COMMENT_CLOSE: &str = "*/";

// === Prompt labels ===
pub const CODE_LABEL: &str = "Here is the code:";
pub const COMMENT_LABEL: &str = "Here is a good comment:";
pub const REVIEW_LABEL: &str = "Here is the review:";

// === Remote model ===
pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

// === Environment overrides ===
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "PIPET_MODEL";
pub const ENV_CONFIG: &str = "PIPET_CONFIG";
