//! Walk through onboarding and one chat message from the terminal.
//!
//! Run with: cargo run -p arixa-app --example onboarding_walkthrough
//! Or with a custom question: cargo run -p arixa-app --example onboarding_walkthrough -- "Your question"
//!
//! Reads `.env` for:
//!   ARIXA_DATABASE_URL - SQLite URL (default: sqlite:arixa.db?mode=rwc)
//!   OPENAI_API_KEY - API key for the chat step (skipped when unset)

use std::env;
use std::sync::Arc;

use arixa_app::{
    App, AppConfig, FitnessGoal, Gender, InMemoryIdentityProvider, NavEvent, SignUpForm, View,
};
use openai_coach::OpenAiCoach;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let question = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Give me a quick warm-up before squats.".to_string()
    };

    let config = AppConfig::from_env()?;
    let (store, tokens) = config.open_store().await?;

    let provider = Arc::new(InMemoryIdentityProvider::new().with_token_cache(tokens));
    if provider.restore().await {
        println!("Restored an existing session.");
    }

    let coach = OpenAiCoach::new(config.coach.clone())?;
    let mut app = App::new(
        provider.clone(),
        Arc::new(coach),
        Arc::new(store),
        config.session_exists_policy,
    );

    let screen = app.start().await;
    println!("Starting on: {}", screen);

    if screen != arixa_app::Screen::Dashboard {
        app.dispatch(NavEvent::GetStarted)?;
        app.dispatch(NavEvent::ChooseSignUp)?;
        app.choose_gender(Gender::Male).await?;
        app.submit_personal_info("32", "180", "78.5").await?;
        app.select_goal(FitnessGoal::StayFit);
        app.submit_goal().await?;

        let form = SignUpForm {
            name: "Demo User".to_string(),
            email: "demo@example.com".to_string(),
            password: "demo-password".to_string(),
        };
        app.sign_up(&form).await?;

        let code = provider.pending_code().await.unwrap_or_default();
        println!("Verification code: {}", code);
        app.verify(&code).await?;
    }

    if let View::Ready(view) = app.view().await {
        println!();
        println!("=== {} ===", view.title);
        for section in &view.sections {
            if let Some(heading) = &section.heading {
                println!("[{}]", heading);
            }
            for row in &section.rows {
                println!("  {} {}", row.label, row.value);
            }
        }
    }

    app.dispatch(NavEvent::OpenChat)?;
    println!();
    println!("You: {}", question);
    match app.send_chat(&question).await {
        Ok(reply) => println!("Arixa: {}", reply.text),
        Err(err) => println!("Chat unavailable: {}", err.user_message()),
    }

    Ok(())
}
