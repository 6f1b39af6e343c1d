pub const SCHEMA: &str = r#"
-- Accounts are provisioned out of band; names are unique
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    password_digest TEXT NOT NULL,    -- argon2id hash with embedded salt
    created_at TEXT DEFAULT (datetime('now'))
);

-- Notes belong to exactly one user
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    text TEXT NOT NULL CHECK (length(trim(text)) > 0),
    created_on TEXT NOT NULL          -- calendar date, YYYY-MM-DD
);

-- Server-side session records; the cookie only carries the signed id
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL,               -- JSON object
    expiry_date INTEGER NOT NULL      -- unix seconds
);

CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes(owner_id);
CREATE INDEX IF NOT EXISTS idx_sessions_expiry ON sessions(expiry_date);
"#;
