use clap::Parser;
use color_eyre::Result;
use examdash::error_display::user_message_from_report;
use examdash::summary::write_summary;
use examdash::{
    logging, App, AppConfig, AppEvent, Args, CacheManager, ConfigManager, LoadOptions, Theme,
    APP_NAME,
};
use ratatui::DefaultTerminal;
use std::sync::mpsc::channel;
use std::time::Duration;

fn render(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    terminal.draw(|frame| frame.render_widget(app, frame.area()))?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, args: &Args, config: &AppConfig) -> Result<()> {
    let (tx, rx) = channel::<AppEvent>();
    let theme = Theme::from_config(&config.theme)?;
    let mut app = App::new_with_config(theme, config);
    if args.debug {
        app.enable_debug();
    }

    let path = args.data_path(config.data.path.as_deref());
    let options = LoadOptions::from_args_and_config(args, config);
    render(&mut terminal, &mut app)?;
    tx.send(AppEvent::Open(path, options))?;

    let poll_interval = Duration::from_millis(config.performance.event_poll_interval_ms);
    loop {
        if crossterm::event::poll(poll_interval)? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => tx.send(AppEvent::Key(key))?,
                crossterm::event::Event::Resize(cols, rows) => {
                    tx.send(AppEvent::Resize(cols, rows))?
                }
                _ => {}
            }
        }

        let updated = match rx.recv_timeout(Duration::from_millis(0)) {
            Ok(event) => {
                match event {
                    AppEvent::Exit => break,
                    event => {
                        if let Some(event) = app.event(&event) {
                            tx.send(event)?;
                        }
                    }
                }
                true
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => false,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        };

        if updated {
            render(&mut terminal, &mut app)?;
        }
    }
    Ok(())
}

/// Print the selected page's statistics as JSON. Returns the process exit code.
fn print_summary(args: &Args, config: &AppConfig) -> Result<i32> {
    let path = args.data_path(config.data.path.as_deref());
    let options = LoadOptions::from_args_and_config(args, config);
    let menu = config.display.start_menu()?;
    write_summary(
        &path,
        &options,
        menu,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
}

fn handle_early_exit_flags(args: &Args) -> Result<Option<i32>> {
    if args.generate_config {
        let manager = ConfigManager::new(APP_NAME)?;
        match manager.write_default_config(args.force) {
            Ok(path) => {
                println!("Wrote default configuration to {}", path.display());
                return Ok(Some(0));
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(Some(1));
            }
        }
    }

    if args.clear_cache {
        match CacheManager::new(APP_NAME) {
            Ok(cache) => {
                if let Err(e) = cache.clear_all() {
                    eprintln!("Error clearing cache: {}", e);
                    return Ok(Some(1));
                }
                println!("Cache cleared successfully");
            }
            Err(_e) => println!("No cache to clear"),
        }
        return Ok(Some(0));
    }

    Ok(None)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(code) = handle_early_exit_flags(&args)? {
        std::process::exit(code);
    }

    color_eyre::install()?;

    let mut config = AppConfig::load(APP_NAME)?;
    config.apply_args(&args);
    config.validate()?;

    if config.debug.enabled {
        let cache = CacheManager::new(APP_NAME)?;
        if let Err(e) = logging::init_logging(cache.cache_dir(), &config.debug.log_level) {
            eprintln!("Warning: could not start logging: {}", e);
        }
    }

    if args.summary {
        let code = print_summary(&args, &config)?;
        std::process::exit(code);
    }

    let terminal = ratatui::init();
    let result = run(terminal, &args, &config);
    ratatui::restore();
    if let Err(e) = result {
        eprintln!("Error: {}", user_message_from_report(&e));
        std::process::exit(1);
    }
    Ok(())
}
