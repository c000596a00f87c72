//! Test fixtures and constants.

/// Satisfies the default policy.
pub const KEY: &str = "lh-test-key-1234#!u";

/// Also satisfies the default policy, but opens nothing sealed with `KEY`.
pub const WRONG_KEY: &str = "lh-other-key-1234#!u";

/// Fails the default policy (no prefix).
pub const INVALID_KEY: &str = "not-a-valid-key";

pub const TEMP_SECRET: &str = "temporary-access";

/// Config enabling a two-use temporary credential.
pub const TEMP_CONFIG: &str = r#"
hint = "ask the team lead"

[temporary]
secret = "temporary-access"
max_uses = 2
"#;

/// Standard test secrets used across multiple tests.
pub const STANDARD_SECRETS: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/mydb"),
    ("API_KEY", "sk-test-12345"),
    ("JWT_SECRET", "super-secret-jwt-token"),
    ("REDIS_URL", "redis://localhost:6379"),
    ("S3_BUCKET", "my-app-bucket"),
];
