//! The `quizline play` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use quizline_core::game::GameState;
use quizline_core::session::{
    fetch_questions, parse_input, play_round, EndReason, PlayerInput, RoundSummary,
};
use quizline_core::traits::QuestionSource;
use quizline_source::config::load_config_from;
use quizline_source::{create_source, QuizlineConfig};

use crate::console::ConsoleView;

pub async fn execute(
    amount: Option<u32>,
    api_url: Option<String>,
    time_limit: Option<u32>,
    end_delay: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(amount) = amount {
        config.amount = amount;
    }
    if let Some(url) = api_url {
        config.api_url = url;
    }
    if let Some(secs) = time_limit {
        config.time_limit_secs = secs;
    }
    if let Some(secs) = end_delay {
        config.end_delay_secs = secs;
    }
    config.validate()?;

    let source = create_source(&config)?;
    let mut inputs = spawn_input_reader();
    let mut view = ConsoleView::new(std::io::stdout());

    let rounds = run_session(source.as_ref(), &mut inputs, &mut view, &config).await?;
    print_summary(&rounds);

    Ok(())
}

/// Play rounds until the player quits, refetching questions for each one.
pub async fn run_session<W: Write + Send>(
    source: &dyn QuestionSource,
    inputs: &mut mpsc::Receiver<PlayerInput>,
    view: &mut ConsoleView<W>,
    config: &QuizlineConfig,
) -> Result<Vec<RoundSummary>> {
    let round_config = config.round_config();
    let mut state = GameState::new(Vec::new()).with_time_limit(config.time_limit_secs);
    let mut rounds = Vec::new();

    loop {
        view.message(&format!("Fetching {} questions...", config.amount));
        let questions = fetch_questions(source)
            .await
            .context("could not load questions")?;
        state.load_questions(questions)?;

        let summary = play_round(&mut state, inputs, view, &round_config).await?;
        let quit = summary.reason == EndReason::Quit;
        rounds.push(summary);
        if quit {
            break;
        }

        view.message("Press Enter to play again, or q to quit.");
        match inputs.recv().await {
            Some(PlayerInput::Quit) | None => break,
            Some(PlayerInput::Submit(_)) => continue,
        }
    }

    Ok(rounds)
}

/// Forward stdin lines as player input until quit or end of input.
///
/// The reader stops after a quit so no blocking stdin read is left
/// pending when the runtime shuts down.
fn spawn_input_reader() -> mpsc::Receiver<PlayerInput> {
    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let input = parse_input(&line);
            if tx.send(input).await.is_err() || input == PlayerInput::Quit {
                break;
            }
        }
    });
    rx
}

fn print_summary(rounds: &[RoundSummary]) {
    use comfy_table::{Cell, Table};

    if rounds.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Round", "Points", "Correct", "Incorrect", "Ending"]);

    for (i, round) in rounds.iter().enumerate() {
        let ending = match round.reason {
            EndReason::Completed => "completed",
            EndReason::TimeUp => "time up",
            EndReason::Quit => "quit",
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(round.points),
            Cell::new(round.correct),
            Cell::new(round.incorrect),
            Cell::new(ending),
        ]);
    }

    println!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizline_core::model::{Difficulty, Question};
    use quizline_source::StaticSource;

    fn source() -> StaticSource {
        StaticSource::new(vec![
            Question::new(
                "Largest planet?",
                "Jupiter",
                vec!["Mars".to_string(), "Venus".to_string(), "Earth".to_string()],
                Difficulty::Easy,
            ),
            Question::new(
                "Is &quot;pi&quot; rational?",
                "False",
                vec!["True".to_string()],
                Difficulty::Hard,
            ),
        ])
    }

    fn fast_config() -> QuizlineConfig {
        QuizlineConfig {
            end_delay_secs: 0,
            ..QuizlineConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn replays_until_quit() {
        let source = source();
        let (tx, mut rx) = mpsc::channel(16);
        for line in ["1", "1", "", "2", "2", "q"] {
            tx.send(parse_input(line)).await.unwrap();
        }

        let mut view = ConsoleView::new(Vec::new());
        let rounds = run_session(&source, &mut rx, &mut view, &fast_config())
            .await
            .unwrap();

        assert_eq!(source.fetch_count(), 2);
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].points, 50);
        assert_eq!(rounds[0].reason, EndReason::Completed);
        assert_eq!(rounds[1].points, -10);

        let out = String::from_utf8(view.into_inner()).unwrap();
        assert!(out.contains("Game Over! You scored 50 points."));
        assert!(out.contains("Game Over! You scored -10 points."));
        assert!(out.contains("Is \"pi\" rational?"));
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_input_stops_after_round() {
        let source = source();
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(PlayerInput::Submit(Some(0))).await.unwrap();
        tx.send(PlayerInput::Submit(Some(1))).await.unwrap();
        drop(tx);

        let mut view = ConsoleView::new(Vec::new());
        let rounds = run_session(&source, &mut rx, &mut view, &fast_config())
            .await
            .unwrap();

        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].points, 5);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_game_unstarted() {
        let source = StaticSource::new(vec![]);
        let (_tx, mut rx) = mpsc::channel(1);
        let mut view = ConsoleView::new(Vec::new());

        let err = run_session(&source, &mut rx, &mut view, &fast_config())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("could not load questions"));

        let out = String::from_utf8(view.into_inner()).unwrap();
        assert!(!out.contains("=== quizline ==="));
    }
}
