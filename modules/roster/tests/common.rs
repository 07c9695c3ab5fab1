#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use roster::domain::error::DomainError;
use roster::domain::ports::RosterSource;
use roster::model::UserRecord;

pub fn record(id: u64, name: &str, city: &str, company: &str) -> UserRecord {
    UserRecord {
        id,
        name: name.to_string(),
        username: format!("user{}", id),
        email: format!("{}@example.test", name.to_lowercase().replace(' ', ".")),
        street: "Main Street".to_string(),
        suite: format!("Apt. {}", 100 + id),
        city: city.to_string(),
        zipcode: "00000".to_string(),
        phone: "000-000".to_string(),
        website: "example.test".to_string(),
        company_name: company.to_string(),
        company_catch_phrase: String::new(),
        company_bs: String::new(),
    }
}

/// Twelve records with ids 1..=12. Only record 5 mentions "5" anywhere.
pub fn twelve() -> Vec<UserRecord> {
    let names = [
        "Leanne Graham",
        "Ervin Howell",
        "Clementine Bauch",
        "Patricia Lebsack",
        "Chelsey Dietrich",
        "Dennis Schulist",
        "Kurtis Weissnat",
        "Nicholas Runolfsdottir",
        "Glenna Reichert",
        "Clementina DuBuque",
        "Mallory Ortiz",
        "Tomas Ibarra",
    ];
    let cities = [
        "Gwenborough",
        "Wisokyburgh",
        "McKenziehaven",
        "South Elvis",
        "Roscoeview",
        "South Christy",
        "Howemouth",
        "Aliyaview",
        "Bartholomebury",
        "Lebsackbury",
        "Oakridge",
        "Pinecrest",
    ];
    (1..=12u64)
        .map(|id| {
            let i = (id - 1) as usize;
            record(id, names[i], cities[i], "Acme")
        })
        .collect()
}

/// Scripted source: each call pops the next (delay, result) pair.
/// Once the script is exhausted it keeps answering with `fallback`.
pub struct ScriptedSource {
    script: Mutex<VecDeque<(Duration, Result<Vec<UserRecord>, DomainError>)>>,
    fallback: Vec<UserRecord>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(
        script: Vec<(Duration, Result<Vec<UserRecord>, DomainError>)>,
        fallback: Vec<UserRecord>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RosterSource for ScriptedSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(self.fallback.clone()),
        }
    }
}
