//! The `quizline init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizline.toml").exists() {
        println!("quizline.toml already exists, skipping.");
    } else {
        std::fs::write("quizline.toml", SAMPLE_CONFIG)?;
        println!("Created quizline.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust amount or time_limit_secs in quizline.toml if you like");
    println!("  2. Run: quizline fetch");
    println!("  3. Run: quizline play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizline configuration

# Trivia API endpoint. ${VAR} references are expanded from the environment.
api_url = "https://opentdb.com/api.php"

# Questions per round (1-50).
amount = 10

# Countdown length in seconds (1-600).
time_limit_secs = 600

# Seconds the final score stays on screen before the game resets.
end_delay_secs = 4

# HTTP request timeout in seconds.
request_timeout_secs = 30
"#;
