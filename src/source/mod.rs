pub mod command;

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::select::SelectOption;

/// JSONL protocol type: one employee per line, printed by directory commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    pub id: String,
    pub name: String,
    /// Job title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Avatar path or URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl DirectoryRecord {
    pub fn to_option(&self) -> SelectOption {
        SelectOption {
            id: self.id.clone(),
            label: self.name.clone(),
            subtitle: self.title.clone(),
            image_url: self.avatar.clone(),
        }
    }
}

/// Parse one JSONL line. Blank lines yield `None`; malformed lines are logged and skipped.
pub fn parse_line(line: &str) -> Option<DirectoryRecord> {
    if line.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<DirectoryRecord>(line) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!("Failed to parse directory JSONL line: {}", e);
            None
        }
    }
}

pub fn parse_jsonl(text: &str) -> Vec<DirectoryRecord> {
    text.lines().filter_map(parse_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_records_and_skips_noise() {
        let text = concat!(
            r#"{"id":"e1","name":"Alice Moreau","title":"HR Lead","role":"hr"}"#,
            "\n\n",
            "not json\n",
            r#"{"id":"e2","name":"Bob Ito"}"#,
            "\n",
            r#"{"name":"missing id"}"#,
            "\n",
        );
        let records = parse_jsonl(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].role, Some(Role::Hr));
        assert_eq!(records[1].title, None);
    }

    #[test]
    fn record_maps_onto_option() {
        let record = DirectoryRecord {
            id: "e7".to_string(),
            name: "Chen Wei".to_string(),
            title: Some("Payroll".to_string()),
            avatar: Some("/tmp/chen.png".to_string()),
            role: None,
        };
        assert_eq!(
            record.to_option(),
            SelectOption::new("e7", "Chen Wei")
                .with_subtitle("Payroll")
                .with_image_url("/tmp/chen.png")
        );
    }
}
