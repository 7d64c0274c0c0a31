//! Interactive mode for the server.
//!
//! Prompts the user for bind address and port before starting the server.

use city_safety_config::Settings;
use dialoguer::{Confirm, Input};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Starts from `settings`, asks the user to confirm or change the bind
/// address and port, and delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(settings: &Settings) -> std::io::Result<()> {
    println!("City Safety Server");
    println!();

    let default_addr = settings.server.bind_addr.clone();
    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(default_addr.clone())
        .interact_text()
        .unwrap_or(default_addr);

    let default_port = settings.server.port;
    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(default_port)
        .interact_text()
        .unwrap_or(default_port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    let mut settings = settings.clone();
    settings.server.bind_addr = bind_addr;
    settings.server.port = port;

    super::run_server(&settings).await
}
