//! The `rekishi play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use rekishi_core::{AnswerField, EraSelection, QuizError, QuizSession};

use super::{load_dataset, resolve_config};

const HELP: &str = "\
Commands:
  year N | y N        choose option N for the year
  event N | e N       choose option N for the event
  relation N | r N    choose option N for the relation
  submit              grade your answer
  next                skip to a new question
  eras A,B            quiz only on these eras (no list = all eras)
  show                show the current question again
  help                show this help
  quit                leave the quiz";

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Pick(AnswerField, usize),
    Submit,
    Next,
    Eras(EraSelection),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "submit" | "s" => Ok(Command::Submit),
        "next" | "n" => Ok(Command::Next),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "eras" => Ok(Command::Eras(rest.split(',').collect())),
        other => {
            let field: AnswerField = other.parse().map_err(|_| {
                format!("unknown command '{other}', type 'help' for a list of commands")
            })?;
            let position = rest
                .parse::<usize>()
                .map_err(|_| format!("usage: {field} N, where N is an option number"))?;
            Ok(Command::Pick(field, position))
        }
    }
}

pub async fn execute(
    dataset: Option<String>,
    eras: Vec<String>,
    seed: Option<u64>,
    skip_malformed: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = resolve_config(config_path, dataset, skip_malformed)?;
    if !eras.is_empty() {
        config.eras = eras;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    let loaded = load_dataset(&config).await?;
    for row in &loaded.skipped {
        eprintln!(
            "Warning: skipped line {} ({} of {} fields)",
            row.line, row.found, row.expected
        );
    }

    let session = QuizSession::new(loaded.dataset, config.session_config());
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(session, stdin.lock(), stdout.lock())
}

/// Drive a session from line-oriented input until `quit` or end of input.
fn run<R: BufRead, W: Write>(mut session: QuizSession, input: R, mut out: W) -> Result<()> {
    writeln!(
        out,
        "rekishi: {} records loaded. Type 'help' for commands.",
        session.dataset().len()
    )?;
    ask(&mut session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        match command {
            Command::Pick(field, position) => {
                match session.select_position(field, position).map(str::to_string) {
                    Ok(value) => writeln!(out, "{field}: {value}")?,
                    Err(e) => report(&mut out, &session, &e)?,
                }
            }
            Command::Submit => match session.submit() {
                Ok(result) => {
                    writeln!(out, "{result}")?;
                    writeln!(out, "Type 'next' for another question.")?;
                }
                Err(e) => report(&mut out, &session, &e)?,
            },
            Command::Next => ask(&mut session, &mut out)?,
            Command::Eras(selection) => match session.apply_filter(selection).map(|_| ()) {
                Ok(()) => show(&session, &mut out)?,
                Err(e) => report(&mut out, &session, &e)?,
            },
            Command::Show => show(&session, &mut out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    writeln!(out, "Bye!")?;
    Ok(())
}

fn ask<W: Write>(session: &mut QuizSession, out: &mut W) -> io::Result<()> {
    match session.next_question().map(|_| ()) {
        Ok(()) => show(session, out),
        Err(e) => report(out, session, &e),
    }
}

fn show<W: Write>(session: &QuizSession, out: &mut W) -> io::Result<()> {
    let Some(question) = session.active() else {
        return writeln!(out, "No active question. Type 'next' or change the filter with 'eras'.");
    };

    writeln!(out)?;
    writeln!(out, "Who: {}", question.prompt())?;
    for field in AnswerField::ALL {
        writeln!(out, "  {field}:")?;
        let chosen = session.answers().get(field);
        for (i, value) in question.options(field).values().iter().enumerate() {
            let marker = if chosen == Some(value.as_str()) { "*" } else { " " };
            writeln!(out, "   {marker}{}) {value}", i + 1)?;
        }
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, session: &QuizSession, error: &QuizError) -> io::Result<()> {
    match error {
        QuizError::IncompleteAnswer { missing } => {
            let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
            writeln!(out, "Please choose every field first (missing: {}).", names.join(", "))
        }
        QuizError::EmptyPool if session.eras().is_all() => {
            writeln!(out, "The dataset has no records to quiz on.")
        }
        QuizError::EmptyPool => {
            let eras: Vec<&str> = session.eras().labels().collect();
            writeln!(
                out,
                "No questions match the selected eras ({}). Use 'eras' to change the filter.",
                eras.join(", ")
            )
        }
        other => writeln!(out, "{other}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use rekishi_core::parser::{parse_dataset, RowPolicy};
    use rekishi_core::random::FixedSequence;
    use rekishi_core::SessionConfig;

    use super::*;

    const TEXT: &str = "\
person,year,event,relation,era
Oda,1582,HonnojiIncident,retainer,Sengoku
Toyotomi,1598,Death,successor,Sengoku
";

    fn play(input: &str) -> String {
        let dataset = parse_dataset(TEXT, RowPolicy::Strict).unwrap().dataset;
        let session = QuizSession::new(Arc::new(dataset), SessionConfig::default())
            .with_random(FixedSequence::zeros());
        let mut out = Vec::new();
        run(session, Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            parse_command("y 2"),
            Ok(Command::Pick(AnswerField::Year, 2))
        );
        assert_eq!(
            parse_command("  Relation   3 "),
            Ok(Command::Pick(AnswerField::Relation, 3))
        );
        assert_eq!(parse_command("submit"), Ok(Command::Submit));
        assert_eq!(parse_command("eras"), Ok(Command::Eras(EraSelection::all())));
        assert_eq!(
            parse_command("eras Edo, Meiji"),
            Ok(Command::Eras(["Edo", "Meiji"].into_iter().collect()))
        );
        assert!(parse_command("event x").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn answering_correctly() {
        // With an all-zero random source the first record is asked and the
        // final shuffle of each two-element list puts the answer first.
        let out = play("y 1\ne 1\nr 1\nsubmit\nquit\n");
        assert!(out.contains("Who: Oda"), "{out}");
        assert!(out.contains("year: 1582"), "{out}");
        assert!(out.contains("Correct!"), "{out}");
        assert!(out.trim_end().ends_with("Bye!"));
    }

    #[test]
    fn answering_incorrectly_shows_the_answer() {
        let out = play("y 2\ne 1\nr 1\nsubmit\n");
        assert!(
            out.contains("Incorrect. The correct answer is 1582, HonnojiIncident, retainer."),
            "{out}"
        );
    }

    #[test]
    fn submit_before_finishing() {
        let out = play("y 1\nsubmit\n");
        assert!(
            out.contains("Please choose every field first (missing: event, relation)."),
            "{out}"
        );
        assert!(!out.contains("Correct!"));
    }

    #[test]
    fn filter_without_matches_then_clear() {
        let out = play("eras Edo\ny 1\neras\nquit\n");
        assert!(out.contains("No questions match the selected eras (Edo)"), "{out}");
        assert!(out.contains("no active question"), "{out}");
        assert_eq!(out.matches("Who: ").count(), 2);
    }

    #[test]
    fn next_and_show_after_an_empty_filter() {
        let out = play("eras Meiji\nnext\nshow\n");
        assert_eq!(
            out.matches("No questions match the selected eras (Meiji)").count(),
            2,
            "{out}"
        );
        assert!(out.contains("No active question."), "{out}");
        assert_eq!(out.matches("Who: ").count(), 1);
    }

    #[test]
    fn empty_dataset_is_reported() {
        let dataset = parse_dataset("person,year,event,relation,era\n", RowPolicy::Strict)
            .unwrap()
            .dataset;
        let session = QuizSession::new(Arc::new(dataset), SessionConfig::default());
        let mut out = Vec::new();
        run(session, Cursor::new("quit\n"), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("The dataset has no records to quiz on."), "{out}");
    }

    #[test]
    fn out_of_range_option() {
        let out = play("y 9\n");
        assert!(out.contains("year has 2 options, there is no option 9"), "{out}");
    }
}
