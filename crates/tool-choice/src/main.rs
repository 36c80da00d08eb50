//! A simple program that runs one of the tool-choice scenarios against the
//! Anthropic API.

#[macro_use]
extern crate tracing;

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tool_choice::Scenario;
use tool_choice::core::Resolution;
use tool_choice_anthropic_model::{AnthropicConfigBuilder, AnthropicProvider};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let Some(scenario) = args.next().as_deref().and_then(Scenario::from_name)
    else {
        eprintln!("usage: tool-choice <auto|forced|any> [message]");
        return ExitCode::FAILURE;
    };
    let message = args.collect::<Vec<_>>().join(" ");
    let message = if message.trim().is_empty() {
        scenario.default_message().to_owned()
    } else {
        message
    };

    let Ok(api_key) = env::var("ANTHROPIC_API_KEY") else {
        eprintln!("ANTHROPIC_API_KEY environment variable is not set");
        return ExitCode::FAILURE;
    };
    let mut config = AnthropicConfigBuilder::with_api_key(api_key);
    if let Ok(model) = env::var("ANTHROPIC_MODEL") {
        config = config.with_model(model);
    }
    if let Ok(base_url) = env::var("ANTHROPIC_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    let model_provider = AnthropicProvider::new(config.build());

    let assistant = match scenario.assistant(model_provider) {
        Ok(assistant) => assistant,
        Err(err) => {
            eprintln!("failed to set up the `{scenario}` scenario: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{}tool choice: {}",
        BAR_CHAR.bright_black(),
        assistant.tool_choice().bright_white().bold()
    );
    println!("{}> {}", BAR_CHAR.bright_black(), message);

    let progress_bar = ProgressBar::new_spinner();
    match ProgressStyle::with_template("{spinner} {wide_msg}") {
        Ok(style) => {
            progress_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        Err(err) => warn!("invalid progress style: {err}"),
    }
    progress_bar.set_message("🤔 Thinking...");
    progress_bar.enable_steady_tick(Duration::from_millis(100));

    let result = assistant.respond(scenario.conversation(&message)).await;
    progress_bar.finish_and_clear();

    match result {
        Ok(Resolution::Answer(text)) => {
            println!("{}🤖 {}", BAR_CHAR.bright_cyan(), text.bright_white());
            ExitCode::SUCCESS
        }
        Ok(Resolution::ToolExecuted { call, output }) => {
            let bar = BAR_CHAR.bright_yellow();
            println!("{bar}🔧 {}", call.name.bright_white().bold());
            let input = serde_json::Value::Object(call.arguments);
            println!("{bar}input: {input}");
            println!("{bar}output: {output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}❌ {err}", BAR_CHAR.bright_red());
            ExitCode::FAILURE
        }
    }
}
