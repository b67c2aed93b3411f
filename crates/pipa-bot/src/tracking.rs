// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracking codes printed on recharged cylinders.

use std::collections::HashSet;

use uuid::Uuid;

const PREFIX: &str = "CIL-";
const CODE_LEN: usize = 12;

/// `count` distinct codes of the form `CIL-XXXXXXXXXXXX`.
pub fn generate_codes(count: u32) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut codes = Vec::with_capacity(count as usize);
    while codes.len() < count as usize {
        let code = new_code();
        if seen.insert(code.clone()) {
            codes.push(code);
        }
    }
    codes
}

fn new_code() -> String {
    let raw = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{PREFIX}{}", &raw[..CODE_LEN])
}
