//! orrery-web: serve the explorer, or drive it from the terminal.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use orrery_engine::{render_svg, Explorer, Language, Role, Scene, ViewState};
use orrery_web::client::AskClient;
use orrery_web::config::ServerConfig;
use orrery_web::server;

#[derive(Parser)]
#[command(name = "orrery-web", version, about = "Animated solar-system explorer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (Q&A proxy and scene snapshots).
    Serve {
        /// Address to listen on. Overrides ORRERY_BIND.
        #[arg(long)]
        bind: Option<String>,
        /// Default model. Overrides ORRERY_MODEL.
        #[arg(long)]
        model: Option<String>,
        /// Upstream API base URL.
        #[arg(long)]
        upstream: Option<String>,
        /// JSON catalog to serve. Overrides ORRERY_CATALOG.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Render one frame of the scene as SVG.
    Render {
        /// Scene time in seconds.
        #[arg(long, default_value_t = 0.0)]
        t: f64,
        #[arg(long)]
        selected: Option<String>,
        #[arg(long)]
        hovered: Option<String>,
        #[arg(long, default_value = "zh")]
        lang: String,
        /// Output file; stdout if omitted.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Ask a question about a body through a running server.
    Ask {
        body: String,
        question: String,
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server: String,
        #[arg(long)]
        model: Option<String>,
        #[arg(long, default_value = "zh")]
        lang: String,
    },
    /// Print the info card for a body.
    Info {
        body: String,
        #[arg(long, default_value = "zh")]
        lang: String,
    },
}

fn parse_language(code: &str) -> Result<Language> {
    match Language::from_code(code) {
        Some(lang) => Ok(lang),
        None => bail!("unknown language '{code}' (expected en or zh)"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Serve {
            bind,
            model,
            upstream,
            catalog,
        } => {
            let mut config = ServerConfig::from_env();
            if let Some(bind) = bind {
                config = config.with_bind(bind);
            }
            if let Some(model) = model {
                config = config.with_default_model(model);
            }
            if let Some(url) = upstream {
                config = config.with_upstream_url(url);
            }
            if let Some(path) = catalog {
                config = config.with_catalog_path(path);
            }
            server::run(config).await
        }
        Command::Render {
            t,
            selected,
            hovered,
            lang,
            out,
        } => {
            let scene = Scene::solar_system();
            let view = ViewState {
                selected: selected.filter(|id| scene.catalog().contains(id)),
                hovered: hovered.filter(|id| scene.catalog().contains(id)),
                language: parse_language(&lang)?,
            };
            let svg = render_svg(&scene, t, &view);
            match out {
                Some(path) => {
                    std::fs::write(&path, svg)
                        .with_context(|| format!("writing {}", path.display()))?;
                    log::info!("Wrote {}", path.display());
                }
                None => println!("{svg}"),
            }
            Ok(())
        }
        Command::Ask {
            body,
            question,
            server,
            model,
            lang,
        } => {
            let mut explorer = Explorer::new(Scene::solar_system());
            explorer.set_language(parse_language(&lang)?);
            if !explorer.select(&body) {
                bail!("unknown body '{body}'");
            }
            let Some(ticket) = explorer.submit(&question) else {
                bail!("question is empty");
            };
            let client = AskClient::new(server, Duration::from_secs(60))?;
            let outcome = client.ask(&ticket.prompt, model.as_deref()).await;
            explorer.resolve(&ticket, outcome);

            for message in explorer.panel().transcript() {
                let who = match message.role {
                    Role::User => "you",
                    Role::Model => "ai",
                };
                println!("[{who}] {}", message.text);
            }
            Ok(())
        }
        Command::Info { body, lang } => {
            let mut explorer = Explorer::new(Scene::solar_system());
            explorer.set_language(parse_language(&lang)?);
            if !explorer.select(&body) {
                bail!("unknown body '{body}'");
            }
            let card = explorer.card().context("no card for selection")?;
            println!("{} ({})", card.name, card.kind);
            println!("{}", card.description);
            println!();
            println!("{}", card.detail);
            println!();
            for fact in &card.facts {
                println!("  * {fact}");
            }
            println!("  temperature: {}", card.temperature);
            println!("  orbit: {}", card.orbit);
            Ok(())
        }
    }
}
