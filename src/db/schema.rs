//! Table definitions for player accounts and their dependent records

/// SQL to create all tables. Statements are separated by `;` and applied one
/// at a time, so every statement must be idempotent.
pub const CREATE_TABLES: &str = r#"
-- Player accounts
CREATE TABLE IF NOT EXISTS cgt_players (
    id TEXT PRIMARY KEY NOT NULL,
    password TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    created_dtm TEXT,
    is_confirmed BOOLEAN NOT NULL DEFAULT 0
);

-- Best score record, one per confirmed player
CREATE TABLE IF NOT EXISTS cgt_player_best (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id TEXT NOT NULL UNIQUE REFERENCES cgt_players(id),
    best_score INTEGER NOT NULL DEFAULT 0,
    best_stage INTEGER NOT NULL DEFAULT 0,
    best_score_date TEXT
);

-- Cumulative statistics, one per confirmed player
CREATE TABLE IF NOT EXISTS cgt_player_static (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    player_id TEXT NOT NULL UNIQUE REFERENCES cgt_players(id),
    total_exp INTEGER NOT NULL DEFAULT 0,
    total_level INTEGER NOT NULL DEFAULT 0
);

-- ========== INDEXES ==========

CREATE INDEX IF NOT EXISTS idx_player_best_score ON cgt_player_best(best_score DESC)
"#;

/// Split `CREATE_TABLES` into executable statements, dropping comment-only
/// lines and empty fragments.
pub fn statements() -> impl Iterator<Item = String> {
    CREATE_TABLES.split(';').filter_map(|statement| {
        let sql: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let sql = sql.trim();
        if sql.is_empty() {
            None
        } else {
            Some(sql.to_string())
        }
    })
}
