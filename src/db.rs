use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Deserialize;

pub const DEFAULT_DB_PATH: &str = "data/pushjerk.sqlite";

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS raw_pages (
            page_number INTEGER PRIMARY KEY,
            url         TEXT,
            html        TEXT NOT NULL,
            scraped_at  TEXT,
            imported_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS cycle_names (
            cycle_id   INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

// ── Raw pages ──

/// One archived listing page. Page 1 is the newest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPage {
    pub page_number: i64,
    #[serde(default)]
    pub url: Option<String>,
    pub html: String,
    #[serde(default)]
    pub scraped_at: Option<String>,
}

/// Read a raw page archive: a JSON array of page records.
pub fn load_archive(path: &Path) -> Result<Vec<RawPage>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let pages: Vec<RawPage> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse page archive {}", path.display()))?;
    Ok(pages)
}

/// Upsert pages by page number.
pub fn insert_pages(conn: &Connection, pages: &[RawPage]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO raw_pages (page_number, url, html, scraped_at)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for p in pages {
            count += stmt.execute(rusqlite::params![p.page_number, p.url, p.html, p.scraped_at])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

/// All pages, oldest (highest page number) first.
pub fn fetch_pages(conn: &Connection) -> Result<Vec<RawPage>> {
    let mut stmt = conn.prepare(
        "SELECT page_number, url, html, scraped_at
         FROM raw_pages
         ORDER BY page_number DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(RawPage {
                page_number: row.get(0)?,
                url: row.get(1)?,
                html: row.get(2)?,
                scraped_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Cycle names ──

pub fn save_cycle_names(conn: &Connection, names: &[(u32, String)]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO cycle_names (cycle_id, name) VALUES (?1, ?2)",
        )?;
        for (cycle_id, name) in names {
            count += stmt.execute(rusqlite::params![cycle_id, name])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub fn fetch_cycle_names(conn: &Connection) -> Result<HashMap<u32, String>> {
    let mut stmt = conn.prepare("SELECT cycle_id, name FROM cycle_names")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<HashMap<_, _>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub pages: usize,
    pub first_page: Option<i64>,
    pub last_page: Option<i64>,
    pub named_cycles: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let (pages, first_page, last_page): (usize, Option<i64>, Option<i64>) = conn.query_row(
        "SELECT COUNT(*), MIN(page_number), MAX(page_number) FROM raw_pages",
        [],
        |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
    )?;
    let named_cycles: usize =
        conn.query_row("SELECT COUNT(*) FROM cycle_names", [], |r| r.get(0))?;
    Ok(Stats {
        pages,
        first_page,
        last_page,
        named_cycles,
    })
}

// ── Tests ──
