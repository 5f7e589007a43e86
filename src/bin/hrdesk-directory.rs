//! Prints the employee directory as JSONL, optionally filtered by a search term.
//!
//! Usage: `hrdesk-directory [TERM]` or `hrdesk-directory --stdin` (term read
//! from the first line of stdin). Records come from `$HRDESK_DIRECTORY` or
//! `~/.config/hrdesk/directory.jsonl`, falling back to a built-in sample roster.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use hrdesk::roles::Role;
use hrdesk::select::filter_options;
use hrdesk::source::{parse_jsonl, DirectoryRecord};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let term = match args.first().map(String::as_str) {
        Some("--stdin") => {
            let mut line = String::new();
            if let Err(e) = io::stdin().lock().read_line(&mut line) {
                eprintln!("hrdesk-directory: failed to read stdin: {e}");
                process::exit(2);
            }
            line.trim_end_matches(['\r', '\n']).to_string()
        }
        Some(term) => term.to_string(),
        None => String::new(),
    };

    let records = load_records();
    let options: Vec<_> = records.iter().map(DirectoryRecord::to_option).collect();
    let matched: HashSet<&str> = filter_options(&options, &term)
        .into_iter()
        .map(|o| o.id.as_str())
        .collect();

    let mut out = io::stdout().lock();
    for record in records.iter().filter(|r| matched.contains(r.id.as_str())) {
        match serde_json::to_string(record) {
            Ok(line) => {
                if writeln!(out, "{line}").is_err() {
                    process::exit(1);
                }
            }
            Err(e) => eprintln!("hrdesk-directory: {e}"),
        }
    }
}

fn directory_path() -> PathBuf {
    if let Ok(path) = std::env::var("HRDESK_DIRECTORY") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("hrdesk")
        .join("directory.jsonl")
}

fn load_records() -> Vec<DirectoryRecord> {
    let path = directory_path();
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_jsonl(&contents),
        Err(_) => sample_roster(),
    }
}

fn sample_roster() -> Vec<DirectoryRecord> {
    let entry = |id: &str, name: &str, title: &str, role: Role| DirectoryRecord {
        id: id.to_string(),
        name: name.to_string(),
        title: Some(title.to_string()),
        avatar: None,
        role: Some(role),
    };
    vec![
        entry("e001", "Priya Nair", "Head of People", Role::Hr),
        entry("e002", "Marcus Lee", "Engineering Manager", Role::Manager),
        entry("e003", "Ana Souza", "Payroll Specialist", Role::Hr),
        entry("e004", "Tomás Varga", "Backend Engineer", Role::Employee),
        entry("e005", "Grace Okafor", "Operations Manager", Role::Manager),
        entry("e006", "Ivan Petrov", "IT Administrator", Role::Admin),
        entry("e007", "Hana Sato", "Designer", Role::Employee),
    ]
}
