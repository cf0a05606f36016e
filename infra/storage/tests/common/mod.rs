#![allow(dead_code, unreachable_pub)]

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shelf_store::Logger;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub name: String,
    pub age: String,
    pub contact: String,
    pub company: String,
    pub address: Address,
}

pub fn user(name: &str, age: &str, company: &str, city: &str) -> User {
    User {
        name: name.to_owned(),
        age: age.to_owned(),
        contact: "2345423".to_owned(),
        company: company.to_owned(),
        address: Address {
            city: city.to_owned(),
            state: "state".to_owned(),
            country: "country".to_owned(),
            pincode: "302028".to_owned(),
        },
    }
}

pub fn employees() -> Vec<User> {
    vec![
        user("John", "23", "Google", "banglore"),
        user("Sarah", "28", "Microsoft", "seattle"),
        user("Raj", "31", "Amazon", "mumbai"),
        user("Maria", "26", "Apple", "cupertino"),
        user("Yuki", "29", "Sony", "tokyo"),
    ]
}

/// Logger that keeps every message together with its level.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        self.entries.lock().clone()
    }

    fn push(&self, level: &'static str, args: fmt::Arguments<'_>) {
        self.entries.lock().push((level, args.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn fatal(&self, args: fmt::Arguments<'_>) {
        self.push("fatal", args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.push("error", args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.push("warn", args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.push("info", args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.push("debug", args);
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        self.push("trace", args);
    }
}
