use clap::Parser;
use routine_shelf::core::{ConfigProvider, Presenter};
use routine_shelf::domain::model::{RoutinePane, UiEvent, ViewModel};
use routine_shelf::utils::{logger, validation::Validate};
use routine_shelf::{
    CliConfig, FileStore, HttpCatalog, RoutineClient, SelectionState, Session, TomlConfig,
};
use std::io::{self, BufRead, Write};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse().with_env_api_key();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting routine-shelf");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match cli.config.clone() {
        Some(path) => run(TomlConfig::from_file(path)?).await,
        None => run(cli).await,
    }
}

async fn run(config: impl ConfigProvider + Validate) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let selection = SelectionState::new(FileStore::new(config.store_path()));
    let catalog = HttpCatalog::from_config(&config);
    let generator = RoutineClient::from_config(&config);
    let mut session = Session::new(selection, catalog, generator, TerminalPresenter);

    session.start().await;
    print_help();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(line.trim()) {
            Some(Command::Event(event)) => session.handle(event).await?,
            Some(Command::Help) => print_help(),
            Some(Command::Quit) => break,
            None => {
                if !line.trim().is_empty() {
                    println!("Unknown command, type 'help' for the list.");
                }
            }
        }
    }

    tracing::info!("Session ended");
    Ok(())
}

enum Command {
    Event(UiEvent),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "category" if !rest.is_empty() => {
            Some(Command::Event(UiEvent::CategoryChanged(rest.to_string())))
        }
        "toggle" if !rest.is_empty() => {
            Some(Command::Event(UiEvent::CardClicked(rest.to_string())))
        }
        "details" if !rest.is_empty() => {
            Some(Command::Event(UiEvent::DetailsToggled(rest.to_string())))
        }
        "remove" if !rest.is_empty() => {
            Some(Command::Event(UiEvent::ChipRemoved(rest.to_string())))
        }
        "clear" => Some(Command::Event(UiEvent::ClearAll)),
        "routine" | "generate" => Some(Command::Event(UiEvent::GenerateRoutine)),
        "help" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  category <name>   fetch the catalog and show one category");
    println!("  toggle <product>  select or unselect a product card");
    println!("  details <product> expand or collapse a product description");
    println!("  remove <product>  remove a product from the selection");
    println!("  clear             clear the whole selection");
    println!("  routine           generate a routine from the selection");
    println!("  quit              exit");
}

/// Prints each committed frame wholesale; holds no state of its own.
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn commit(&mut self, view: &ViewModel) {
        println!();
        if let Some(status) = &view.status {
            println!("{}", status);
        }

        for card in &view.cards {
            let mark = if card.selected { "[x]" } else { "[ ]" };
            println!("{} {} ({})", mark, card.name, card.brand);
            if let Some(description) = &card.description {
                println!("    {}", description);
            }
        }

        if view.chips.is_empty() {
            println!("No products selected.");
        } else {
            println!("Selected: {}", view.chips.join(", "));
        }

        match &view.routine {
            RoutinePane::Empty => {}
            RoutinePane::Pending => println!("Generating your routine..."),
            RoutinePane::Text(text) => println!("{}", text),
        }
    }
}
