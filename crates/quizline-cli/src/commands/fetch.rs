//! The `quizline fetch` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizline_core::model::Question;
use quizline_core::session::fetch_questions;
use quizline_core::view::decode_html_entities;
use quizline_source::config::load_config_from;
use quizline_source::create_source;

pub async fn execute(
    amount: Option<u32>,
    api_url: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(amount) = amount {
        config.amount = amount;
    }
    if let Some(url) = api_url {
        config.api_url = url;
    }
    config.validate()?;

    let source = create_source(&config)?;
    let questions = fetch_questions(source.as_ref())
        .await
        .context("could not load questions")?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&questions)?),
        "table" => print_table(&questions),
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }

    Ok(())
}

fn print_table(questions: &[Question]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Difficulty", "Category", "Question", "Answer"]);

    for (i, q) in questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(q.difficulty),
            Cell::new(decode_html_entities(&q.category)),
            Cell::new(decode_html_entities(&q.text)),
            Cell::new(decode_html_entities(&q.correct_answer)),
        ]);
    }

    println!("{table}");
    println!("{} question(s)", questions.len());
}
