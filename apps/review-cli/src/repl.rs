//! Interactive review loop
//!
//! Reads one command per line and writes the resulting view. Logging goes to
//! stderr; the writer only ever receives session output.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use review_core::{NavigationOutcome, ReviewSession};

use crate::command::{Command, HELP};
use crate::config::SessionConfig;
use crate::render;

/// Above this page count the map lists only pages with findings.
const DENSE_MAP_PAGES: u32 = 1000;

/// Run the loop until `q` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut ReviewSession,
    config: &SessionConfig,
    input: R,
    output: &mut W,
) -> anyhow::Result<()> {
    show_page(session, config, output)?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };
        tracing::debug!(?command, "Command");

        if command == Command::Quit {
            break;
        }
        execute(session, config, command, output)?;
    }

    Ok(())
}

fn execute<W: Write>(
    session: &mut ReviewSession,
    config: &SessionConfig,
    command: Command,
    output: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::NextPage => {
            session.next_page();
            show_page(session, config, output)?;
        }
        Command::PreviousPage => {
            session.previous_page();
            show_page(session, config, output)?;
        }
        Command::GoTo(page) => {
            session.go_to(page);
            show_page(session, config, output)?;
        }
        Command::NextProblem => match session.jump_to_next_problem() {
            NavigationOutcome::Moved(_) => show_page(session, config, output)?,
            NavigationOutcome::AllClear => {
                writeln!(output, "All clear: no pages with open findings ahead")?;
            }
        },
        Command::Approve => {
            session.approve_and_advance();
            show_page(session, config, output)?;
        }
        Command::Toggle(id) => {
            if !session.toggle_issue(id) {
                writeln!(output, "No finding #{}", id)?;
            }
            show_page(session, config, output)?;
        }
        Command::TogglePage => {
            if session.toggle_current_page().is_none() {
                writeln!(output, "No findings on this page")?;
            }
            show_page(session, config, output)?;
        }
        Command::Show => show_page(session, config, output)?,
        Command::Map => {
            let entries = if session.page_count() <= DENSE_MAP_PAGES {
                session.document_map()
            } else {
                if !config.json {
                    writeln!(
                        output,
                        "{} pages; showing only pages with findings",
                        session.page_count()
                    )?;
                }
                session.referenced_page_map()
            };
            if config.json {
                writeln!(output, "{}", serde_json::to_string_pretty(&entries)?)?;
            } else {
                writeln!(output, "{}", render::document_map(&entries, session.current_page()))?;
            }
        }
        Command::Summary => {
            writeln!(output, "{}", render::summary(&session.summary()))?;
        }
        Command::Export(path) => {
            let path = path.as_deref().unwrap_or(&config.output);
            // A failed write is reported and the session continues
            match export(session, path) {
                Ok(count) => writeln!(
                    output,
                    "Exported {} active issues to {}",
                    count,
                    path.display()
                )?,
                Err(e) => {
                    tracing::error!("Export failed: {:#}", e);
                    writeln!(output, "Export failed: {:#}", e)?;
                }
            }
        }
        Command::Help => writeln!(output, "{}", HELP)?,
        Command::Quit => {}
    }
    Ok(())
}

fn show_page<W: Write>(
    session: &ReviewSession,
    config: &SessionConfig,
    output: &mut W,
) -> anyhow::Result<()> {
    let view = session.page_view();
    if config.json {
        writeln!(output, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        writeln!(output, "{}", render::page_view(&view))?;
    }
    Ok(())
}

fn export(session: &ReviewSession, path: &Path) -> anyhow::Result<usize> {
    let (text, summary) = session.export();
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(
        exported = summary.exported,
        discarded = summary.discarded,
        "Exported cleaned report to {}",
        path.display()
    );
    Ok(summary.exported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    const REPORT: &str = "Page,Code,Severity,Message,BBox\n\
        2,FONT,error,\"Too small\",\"[1,2,3,4]\"\n\
        2,SPACING,warning,\"Tight\",\"\"\n\
        4,MARGIN,warning,\"Narrow\",\"\"";

    fn run_script(script: &str, config: &SessionConfig) -> (ReviewSession, String) {
        let mut session = ReviewSession::with_report(REPORT);
        let mut output = Vec::new();
        run(&mut session, config, Cursor::new(script), &mut output).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    fn config(output: PathBuf) -> SessionConfig {
        SessionConfig {
            output,
            json: false,
        }
    }

    #[test]
    fn test_jump_reports_all_clear() {
        let (session, out) = run_script("j\nj\nj\nq\n", &config(PathBuf::from("unused.csv")));
        assert_eq!(session.current_page(), 4);
        assert!(out.contains("All clear"));
    }

    #[test]
    fn test_unknown_commands_do_not_abort() {
        let (session, out) = run_script("bogus\ng\nn\n", &config(PathBuf::from("unused.csv")));
        assert!(out.contains("unknown command 'bogus'"));
        assert!(out.contains("missing page number"));
        assert_eq!(session.current_page(), 2);
    }

    #[test]
    fn test_toggle_and_export() {
        let path = std::env::temp_dir().join(format!("pdf-review-repl-{}.csv", std::process::id()));
        let (_, out) = run_script("g 2\nt 1\na\ne\nq\n", &config(path.clone()));

        assert!(out.contains("Exported 1 active issues"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "Page,Code,Severity,Message,BBox\n4,MARGIN,warning,\"Narrow\",\"\""
        );
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_export_failure_is_reported() {
        let (_, out) = run_script(
            "e /nonexistent-dir/out.csv\n",
            &config(PathBuf::from("unused.csv")),
        );
        assert!(out.contains("Export failed"));
    }

    #[test]
    fn test_json_map() {
        let config = SessionConfig {
            output: PathBuf::from("unused.csv"),
            json: true,
        };
        let (_, out) = run_script("m\n", &config);
        assert!(out.contains("\"status\": \"error\""));
    }

    #[test]
    fn test_map_of_huge_page_range_lists_findings_only() {
        let mut session = ReviewSession::with_report(
            "Page,Code,Severity,Message,BBox\n2,A,error,\"m\",\"\"\n2000000,B,warning,\"m\",\"\"",
        );
        let mut output = Vec::new();
        let session_config = config(PathBuf::from("unused.csv"));
        run(&mut session, &session_config, Cursor::new("m\ni\nq\n"), &mut output).unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("2000000 pages; showing only pages with findings"));
        assert!(out.contains("   2E  2000000W"));
        assert!(out.contains("1999998 clean"));
    }
}
