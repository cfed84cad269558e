use anyhow::Result;
use clap::Parser;
use vastland_lib::app::App;
use vastland_lib::model::config::AppConfig;
use vastland_lib::ui::Tui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the game in
    #[arg(short, long, value_enum, default_value = "standard")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Override the terrain seed
    #[arg(long)]
    seed: Option<u64>,

    /// Tick budget for headless mode
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Standard,
    Headless,
}

fn init_logging() -> Result<()> {
    // The TUI owns stdout; logs go to a file.
    let file = std::fs::File::create("vastland.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let mut config = AppConfig::load(&args.config);
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }

    match args.mode {
        Mode::Headless => {
            println!("Running in HEADLESS mode...");
            let mut app = App::new(config)?;
            let ticks = app.run_headless(args.ticks, 1.0 / 60.0);
            if let Some(state) = app.world.player().and_then(|p| p.as_player()) {
                println!(
                    "Finished after {ticks} ticks: {} kills, {:.1}s survived.",
                    state.kills, state.survival_time
                );
            } else {
                println!("Finished after {ticks} ticks.");
            }
        }
        Mode::Standard => {
            let mut tui = Tui::new()?;
            tui.init()?;

            let mut app = App::new(config)?;
            let res = app.run(&mut tui).await;

            tui.exit()?;

            if let Err(e) = res {
                eprintln!("Application error: {e}");
            } else {
                println!("Exited clean.");
            }
        }
    }

    Ok(())
}
