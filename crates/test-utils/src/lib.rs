//! Shared fixtures for roster tests.
//!
//! Record fixtures have deterministic ids and names (`First{id}` / `Last{id}`)
//! so assertions can target them; the remaining contact fields are filled
//! with `fake` data.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::phone_number::en::PhoneNumber;
use roster_core::{Company, RecordId, User};
use serde_json::{Value, json};

pub mod scripted;

pub use scripted::ScriptedSource;

/// Gets the absolute path to the workspace root directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent() // crates/
        .and_then(Path::parent) // workspace root
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Gets the absolute path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    workspace_root().join("tests/fixtures")
}

/// A page body captured from the upstream service, read from `tests/fixtures`.
pub fn recorded_page(name: &str) -> std::io::Result<Value> {
    let raw = std::fs::read_to_string(fixtures_dir().join(name))?;
    serde_json::from_str(&raw).map_err(std::io::Error::other)
}

pub fn user(id: u64) -> User {
    let role = match id % 3 {
        0 => "admin",
        1 => "user",
        _ => "moderator",
    };
    User {
        id: RecordId(id),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        email: SafeEmail().fake(),
        phone: PhoneNumber().fake(),
        company: Company {
            name: CompanyName().fake(),
            ..Default::default()
        },
        role: role.to_string(),
        ..Default::default()
    }
}

/// `user(id)` for every id in the range, in order.
pub fn users(ids: RangeInclusive<u64>) -> Vec<User> {
    ids.map(user).collect()
}

/// A page body in the shape the upstream serves (`users` + `total`).
pub fn page_json(items: &[User], total: usize, skip: usize) -> Value {
    json!({
        "users": items,
        "total": total,
        "skip": skip,
        "limit": items.len(),
    })
}

/// The page `[skip, skip + limit)` of `all`, clamped to its length.
pub fn page_slice(all: &[User], skip: usize, limit: usize) -> &[User] {
    let start = skip.min(all.len());
    let end = skip.saturating_add(limit).min(all.len());
    &all[start..end]
}
