//! Events command for inspecting what the extractor recognized.
//!
//! This module outputs every lock state event, including ignored state codes,
//! as JSONL for debugging.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use locks_core::process_events;

/// Runs the events command, outputting events as JSONL.
pub fn run<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<()> {
    let events = process_events(reader, |events| events.collect::<Vec<_>>())
        .context("failed to read lock events")?;
    tracing::debug!(count = events.len(), "extracted events");

    for event in events {
        let json = serde_json::to_string(&event)?;
        writeln!(writer, "{json}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn events_include_ignored_codes() {
        let input = "\
2021-08-31 22:28:00.841 Df logind[132:54af3a] [com.apple.login:Logind_General] -[SessionAgent SA_SetSessionStateForUser:state:reply:]:536: state set to: 3
unrelated
2021-09-01 20:21:08.899+0200 Df logind[132:561d5e] [com.apple.login:Logind_General] -[SessionAgent SA_SetSessionStateForUser:state:reply:]:536: state set to: 2
2021-09-01 20:22:00.000 Df logind[132:561d5e] [com.apple.login:Logind_General] -[SessionAgent SA_SetSessionStateForUser:state:reply:]:536: state set to: 7
";
        let mut output = Vec::new();
        run(input.as_bytes(), &mut output).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r#"
        {"at":"2021-08-31T22:28:00.841","kind":"lock"}
        {"at":"2021-09-01T20:21:08.899","kind":"unlock"}
        {"at":"2021-09-01T20:22:00","kind":"ignored"}
        "#);
    }
}
