use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};

use super::{parse_line, DirectoryRecord};
use crate::config::{DirectoryConfig, InputMode, SearchConfig};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source command is empty")]
    EmptyCommand,
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read output of {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("{program} exited with {status}")]
    Exit { program: String, status: ExitStatus },
}

/// Run the directory command and collect every record it prints.
pub async fn load_directory(config: &DirectoryConfig) -> Result<Vec<DirectoryRecord>, SourceError> {
    run(&config.source, None, config.timeout()).await
}

/// Run the search command for one term.
pub async fn search(config: &SearchConfig, term: &str) -> Result<Vec<DirectoryRecord>, SourceError> {
    run(&config.source, Some((term, config.input)), config.timeout()).await
}

async fn run(
    command: &[String],
    query: Option<(&str, InputMode)>,
    timeout: Duration,
) -> Result<Vec<DirectoryRecord>, SourceError> {
    let (first, rest) = command.split_first().ok_or(SourceError::EmptyCommand)?;
    let program = resolve_command(first);

    let mut cmd = Command::new(&program);
    cmd.args(rest);
    match query {
        Some((term, InputMode::Arg)) => {
            cmd.arg(term);
            cmd.stdin(Stdio::null());
        }
        Some((_, InputMode::Stdin)) => {
            cmd.stdin(Stdio::piped());
        }
        None => {
            cmd.stdin(Stdio::null());
        }
    }
    cmd.stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| SourceError::Spawn {
        program: program.clone(),
        source,
    })?;

    // Write the term to stdin and close it so the command sees EOF
    if let Some((term, InputMode::Stdin)) = query {
        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(term.as_bytes()).await;
            let _ = stdin.write_all(b"\n").await;
        }
    }

    // Reading and reaping share one deadline: a command may close stdout and keep running
    let result = tokio::time::timeout(timeout, async {
        let records = read_output(&mut child).await?;
        let status = child.wait().await?;
        Ok::<_, io::Error>((records, status))
    })
    .await;
    let (records, status) = match result {
        Ok(done) => done.map_err(|source| SourceError::Io {
            program: program.clone(),
            source,
        })?,
        Err(_) => {
            tracing::warn!("Source command {:?} timed out after {:?}", command, timeout);
            let _ = child.kill().await;
            return Err(SourceError::Timeout { program, timeout });
        }
    };
    if !status.success() {
        return Err(SourceError::Exit { program, status });
    }

    tracing::debug!("Source command {:?} returned {} records", command, records.len());
    Ok(records)
}

async fn read_output(child: &mut Child) -> io::Result<Vec<DirectoryRecord>> {
    let Some(stdout) = child.stdout.take() else {
        return Ok(Vec::new());
    };

    let mut lines = BufReader::new(stdout).lines();
    let mut records = Vec::new();
    while let Some(line) = lines.next_line().await? {
        records.extend(parse_line(&line));
    }
    Ok(records)
}

/// Resolve a command name: if it's not an absolute path, check the directory
/// of our own executable first, then fall back to PATH lookup.
fn resolve_command(name: &str) -> String {
    let path = std::path::Path::new(name);
    if path.is_absolute() {
        return name.to_string();
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(name);
            if candidate.exists() {
                return candidate.to_string_lossy().to_string();
            }
        }
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    fn search_config(source: Vec<String>, input: InputMode) -> SearchConfig {
        SearchConfig {
            source,
            input,
            timeout_ms: 2000,
        }
    }

    #[tokio::test]
    async fn term_passed_as_argument() {
        // With `sh -c`, the first trailing argument becomes $0
        let config = search_config(
            sh(r#"printf '{"id":"1","name":"%s"}\n' "$0""#),
            InputMode::Arg,
        );
        let records = search(&config, "Dana").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Dana");
    }

    #[tokio::test]
    async fn term_passed_on_stdin() {
        let config = search_config(
            sh(r#"read q; printf '{"id":"2","name":"%s"}\n' "$q""#),
            InputMode::Stdin,
        );
        let records = search(&config, "Eve").await.unwrap();
        assert_eq!(records[0].id, "2");
        assert_eq!(records[0].name, "Eve");
    }

    #[tokio::test]
    async fn directory_skips_malformed_lines() {
        let config = DirectoryConfig {
            source: sh(r#"printf '{"id":"a","name":"Ann"}\nnope\n{"id":"b","name":"Ben"}\n'"#),
            timeout_ms: 2000,
        };
        let records = load_directory(&config).await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Ben"]);
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let config = DirectoryConfig {
            source: sh("sleep 5"),
            timeout_ms: 100,
        };
        let err = load_directory(&config).await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout { .. }));
    }

    #[tokio::test]
    async fn command_lingering_after_closing_stdout_times_out() {
        let config = DirectoryConfig {
            source: sh(r#"printf '{"id":"a","name":"Ann"}\n'; exec >&-; sleep 3"#),
            timeout_ms: 200,
        };
        let started = std::time::Instant::now();
        let err = load_directory(&config).await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn failing_command_reports_exit_status() {
        let config = DirectoryConfig {
            source: sh("exit 3"),
            timeout_ms: 2000,
        };
        let err = load_directory(&config).await.unwrap_err();
        assert!(matches!(err, SourceError::Exit { .. }));
    }

    #[tokio::test]
    async fn empty_and_missing_commands_fail() {
        let empty = search_config(Vec::new(), InputMode::Stdin);
        assert!(matches!(
            search(&empty, "x").await,
            Err(SourceError::EmptyCommand)
        ));

        let missing = search_config(vec!["/nonexistent/hrdesk-nope".to_string()], InputMode::Arg);
        assert!(matches!(
            search(&missing, "x").await,
            Err(SourceError::Spawn { .. })
        ));
    }
}
