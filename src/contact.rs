/* Copyright (C) 2021 Casper Meijn <casper@meijn.net>
 * SPDX-License-Identifier: GPL-3.0-or-later
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use serde::{Deserialize, Serialize};

/// Contact details to be shared as a vCard payload
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRecord {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}

impl ContactRecord {
    /// Formats as vCard 3.0, skipping absent and empty fields
    ///
    /// Lines are separated by `\n` and there is no trailing newline.
    pub fn to_vcard(&self) -> String {
        fn present(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|value| !value.is_empty())
        }

        let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];
        if let Some(name) = present(&self.name) {
            lines.push(format!("FN:{}", name));
            lines.push(format!("N:{};;;", name));
        }
        if let Some(phone) = present(&self.phone) {
            lines.push(format!("TEL;TYPE=CELL:{}", phone));
        }
        if let Some(email) = present(&self.email) {
            lines.push(format!("EMAIL:{}", email));
        }
        if let Some(address) = present(&self.address) {
            lines.push(format!("ADR;TYPE=HOME:;;{};;;", address));
        }
        if let Some(company) = present(&self.company) {
            lines.push(format!("ORG:{}", company));
        }
        if let Some(title) = present(&self.title) {
            lines.push(format!("TITLE:{}", title));
        }
        if let Some(website) = present(&self.website) {
            lines.push(format!("URL:{}", website));
        }
        if let Some(notes) = present(&self.notes) {
            lines.push(format!("NOTE:{}", notes));
        }
        lines.push("END:VCARD".to_string());
        lines.join("\n")
    }
}
