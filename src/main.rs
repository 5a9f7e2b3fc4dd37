mod app;
mod config;
mod launcher;
mod logging;
mod portal;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

use app::App;
use config::AppConfig;
use portal::Section;

#[derive(Parser, Debug)]
#[command(name = "mob-portal")]
#[command(version)]
#[command(about = "Monitoring Operational Budget forms, one password per section")]
struct Args {
    /// Start at a section's login screen (ho or pks)
    #[arg(short, long, value_parser = parse_section)]
    section: Option<Section>,

    /// Use an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the available sections as JSON and exit
    #[arg(long)]
    list_sections: bool,
}

fn parse_section(s: &str) -> Result<Section, String> {
    Section::from_code(s).ok_or_else(|| format!("unknown section '{}' (expected ho or pks)", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_sections {
        return print_sections();
    }

    let (config, config_warning) = AppConfig::load_or_default(args.config.as_deref());

    let _log_guard = logging::init(config.log_level.as_deref())?;
    ui::init_theme(theme::Theme::load(&config.theme));

    let mut app = App::new(config);
    if let Some(warning) = config_warning {
        app.report_config_warning(&warning);
    }
    if let Some(section) = args.section {
        app.select_section(section);
    }

    run_tui(&mut app).await
}

/// Section codes, labels and link counts; passwords and URLs stay out
fn print_sections() -> Result<()> {
    let sections: Vec<serde_json::Value> = Section::ALL
        .iter()
        .map(|s| {
            serde_json::json!({
                "code": s.code(),
                "label": s.label(),
                "links": portal::catalog::links_for(*s).len(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string(&sections)?);
    Ok(())
}

async fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("Session ended");
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.accepts_quit_key() => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key).await {
                                app.set_status(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_section() {
        let args = Args::try_parse_from(["mob-portal", "--section", "PKS"]).unwrap();
        assert_eq!(args.section, Some(Section::Factory));

        assert!(Args::try_parse_from(["mob-portal", "-s", "warehouse"]).is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["mob-portal"]).unwrap();
        assert_eq!(args.section, None);
        assert!(args.config.is_none());
        assert!(!args.list_sections);
    }
}
