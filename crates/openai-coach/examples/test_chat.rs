//! Simple round trip against the hosted completion endpoint.
//!
//! Run with: cargo run -p openai-coach --example test_chat
//! Or with a custom message: cargo run -p openai-coach --example test_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   OPENAI_API_KEY - API key for authentication

use openai_coach::{CompletionBackend, OpenAiCoach};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Suggest a five minute warm-up.".to_string()
    };

    let coach = OpenAiCoach::from_env()?;
    coach.check_configured()?;

    println!("Coach: {}", coach.name());
    println!("API URL: {}", coach.config().api_url);
    println!("Model: {}", coach.config().model);
    println!();

    println!("Sending: \"{}\"", message_text);
    println!("Waiting for response...\n");

    let reply = coach.complete(&[], &message_text).await?;

    println!("=== Response ===");
    println!("{}", reply);
    println!("================");

    Ok(())
}
