// ==========================================
// 船舶航次排期系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 幂等建表 (CREATE TABLE IF NOT EXISTS) 并登记 schema_version
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表语句
///
/// 时间列统一存 TEXT (`YYYY-MM-DD HH:MM:SS`，本地时间，不带时区)
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS voyage_leg (
    record_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    ship_name    TEXT NOT NULL,
    voyage_id    TEXT NOT NULL,
    route_tag    TEXT,
    port         TEXT NOT NULL,
    arrival      TEXT NOT NULL,
    departure    TEXT,
    speed_knots  REAL,
    distance_nm  REAL,
    tide_factor  REAL,
    berth_hours  REAL,
    created_at   TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
);
CREATE INDEX IF NOT EXISTS idx_voyage_leg_voyage ON voyage_leg (ship_name, voyage_id);
CREATE INDEX IF NOT EXISTS idx_voyage_leg_arrival ON voyage_leg (arrival);

CREATE TABLE IF NOT EXISTS public_plan_leg (
    record_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    ship_name    TEXT NOT NULL,
    voyage_id    TEXT NOT NULL,
    route_tag    TEXT,
    port         TEXT NOT NULL,
    arrival      TEXT NOT NULL,
    departure    TEXT,
    speed_knots  REAL,
    distance_nm  REAL,
    tide_factor  REAL,
    berth_hours  REAL,
    published_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
);
CREATE INDEX IF NOT EXISTS idx_public_plan_leg_voyage ON public_plan_leg (ship_name, voyage_id);

CREATE TABLE IF NOT EXISTS docking_period (
    docking_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    ship_name    TEXT NOT NULL,
    start_date   TEXT NOT NULL,
    end_date     TEXT NOT NULL,
    label        TEXT NOT NULL,
    created_at   TEXT NOT NULL DEFAULT (datetime('now', 'localtime')),
    CHECK (end_date >= start_date)
);

CREATE TABLE IF NOT EXISTS actual_passage (
    passage_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    ship_name         TEXT NOT NULL,
    voyage_id         TEXT NOT NULL,
    from_port         TEXT NOT NULL,
    to_port           TEXT NOT NULL,
    departed_at       TEXT NOT NULL,
    arrived_at        TEXT NOT NULL,
    anchorage_start   TEXT,
    anchorage_end     TEXT,
    anchorage_minutes INTEGER NOT NULL DEFAULT 0,
    distance_nm       INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_actual_passage_voyage ON actual_passage (ship_name, voyage_id);

CREATE TABLE IF NOT EXISTS action_log (
    action_id    TEXT PRIMARY KEY,
    action_type  TEXT NOT NULL,
    action_ts    TEXT NOT NULL,
    actor        TEXT NOT NULL,
    ship_name    TEXT,
    voyage_id    TEXT,
    detail       TEXT,
    payload_json TEXT
);
CREATE INDEX IF NOT EXISTS idx_action_log_ts ON action_log (action_ts);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id   TEXT NOT NULL,
    key        TEXT NOT NULL,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime')),
    PRIMARY KEY (scope_id, key)
);

CREATE TABLE IF NOT EXISTS schema_version (
    version    INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
);
"#;

/// 幂等建表并登记当前 schema_version
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    let version = read_schema_version(conn)?;
    if version != Some(CURRENT_SCHEMA_VERSION) {
        tracing::warn!(
            found = ?version,
            expected = CURRENT_SCHEMA_VERSION,
            "schema_version 与代码期望不一致"
        );
    }
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
