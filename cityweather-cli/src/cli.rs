use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{Config, View, Widget, WidgetHost, source_from_config};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weather API key and default city.
    Configure,

    /// Show the current weather once and exit.
    Show {
        /// City name; the configured default city if absent.
        city: Option<String>,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search cities interactively (the default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city, json } => show(city, json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let key = Password::new("WeatherAPI key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !key.trim().is_empty() {
        cfg.set_api_key(key.trim());
    }

    let city = Text::new("Default city:")
        .with_default(&cfg.default_city)
        .prompt()
        .context("Failed to read default city")?;
    if !city.trim().is_empty() {
        cfg.default_city = city.trim().to_string();
    }

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

fn host_from_config() -> anyhow::Result<WidgetHost> {
    let cfg = Config::load()?;
    let source = source_from_config(&cfg)?;
    tracing::debug!(default_city = %cfg.default_city, relay = %cfg.relay_url, "configuration loaded");
    Ok(WidgetHost::new(Widget::new(cfg.default_city.clone()), source))
}

async fn show(city: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut host = host_from_config()?;
    start_search(&mut host, city);
    host.settle().await;

    match host.widget().view() {
        View::Error(message) => anyhow::bail!("{message}"),
        View::Snapshot { snapshot, .. } if json => {
            let out = serde_json::to_string_pretty(snapshot)
                .context("Failed to serialize weather snapshot")?;
            println!("{out}");
        }
        view => print!("{view}"),
    }

    Ok(())
}

/// Search `city`, or the default city when it is absent or blank.
fn start_search(host: &mut WidgetHost, city: Option<String>) {
    match city.filter(|c| !c.trim().is_empty()) {
        Some(city) => {
            host.widget_mut().set_city_query(city);
            host.submit();
        }
        None => host.mount(),
    }
}

async fn interactive() -> anyhow::Result<()> {
    let mut host = host_from_config()?;
    host.mount();

    loop {
        if !host.widget().input_enabled() {
            print!("{}", View::Loading);
            host.settle().await;
        }
        print!("{}", host.widget().view());

        let query = host.widget().state().city_query.clone();
        let input = match Text::new("City:")
            .with_initial_value(&query)
            .with_placeholder("Search for a city...")
            .with_help_message(":dismiss closes the error, :quit exits")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        match input.trim() {
            ":quit" | ":q" => break,
            ":dismiss" => host.widget_mut().dismiss_error(),
            _ => {
                host.widget_mut().set_city_query(input);
                host.submit();
            }
        }
    }

    Ok(())
}
