//! Franchisee directory.
//!
//! A franchisee is a referral identity. When a shopper arrives through a
//! franchisee link, WhatsApp orders go to that franchisee instead of the
//! store's main line.

use crate::ids::FranchiseeCode;
use crate::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Query parameters that may carry a franchisee code, in priority order.
const QUERY_KEYS: [&str; 2] = ["franchisee", "ref"];

/// Contact details for a franchisee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Franchisee {
    pub name: String,
    pub phone: String,
    pub location: String,
}

impl Franchisee {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            location: location.into(),
        }
    }
}

/// All known franchisees, keyed by short code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FranchiseeDirectory {
    entries: BTreeMap<FranchiseeCode, Franchisee>,
}

impl FranchiseeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, code: impl Into<FranchiseeCode>, franchisee: Franchisee) {
        self.entries.insert(code.into(), franchisee);
    }

    /// Find a franchisee by code.
    pub fn get(&self, code: &str) -> Option<&Franchisee> {
        self.entries.get(&FranchiseeCode::new(code))
    }

    /// Find a franchisee by code, failing with `FranchiseeNotFound`.
    pub fn lookup(&self, code: &str) -> Result<&Franchisee, CommerceError> {
        self.get(code)
            .ok_or_else(|| CommerceError::FranchiseeNotFound(code.to_string()))
    }

    /// Entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&FranchiseeCode, &Franchisee)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extract a known franchisee code from a URL query string. `ref=<code>`
    /// is only read when `franchisee=<code>` is absent.
    pub fn code_from_query(&self, query: &str) -> Option<FranchiseeCode> {
        let query = query.trim_start_matches('?');
        let params: HashMap<String, String> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        let code = QUERY_KEYS
            .iter()
            .filter_map(|key| params.get(*key))
            .find(|code| !code.is_empty())?;
        self.get(code).map(|_| FranchiseeCode::new(code.as_str()))
    }
}

impl From<HashMap<String, Franchisee>> for FranchiseeDirectory {
    fn from(map: HashMap<String, Franchisee>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(code, f)| (FranchiseeCode::new(code), f))
                .collect(),
        }
    }
}

/// What gets persisted when a franchisee is selected for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranchiseeRecord {
    pub code: FranchiseeCode,
    pub name: String,
    pub phone: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

impl FranchiseeRecord {
    pub fn new(code: FranchiseeCode, franchisee: &Franchisee, timestamp: DateTime<Utc>) -> Self {
        Self {
            code,
            name: franchisee.name.clone(),
            phone: franchisee.phone.clone(),
            location: franchisee.location.clone(),
            timestamp,
        }
    }
}
