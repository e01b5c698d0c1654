use anyhow::Result;

mod app;
mod config;
mod errors;
mod groq;
mod handler;
mod history;
mod logging;
mod tui;
mod ui;

use app::App;
use config::Config;
use errors::ChatError;
use groq::GroqClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Startup failures happen before the terminal goes into raw mode so
    // the message actually reaches the user.
    let api_key = match std::env::var("GROQ_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => return Err(ChatError::MissingCredential.into()),
    };

    let config = Config::load().unwrap_or_else(|_| Config::new());

    let model = config
        .default_model
        .clone()
        .unwrap_or_else(|| groq::MODELS[0].to_string());
    if !groq::MODELS.contains(&model.as_str()) {
        return Err(ChatError::UnknownModel(model).into());
    }

    let client = GroqClient::new(&api_key);
    let mut app = App::new(client, config, model);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(&mut app, event).await?;
        }
    }

    tui::restore()?;
    Ok(())
}
