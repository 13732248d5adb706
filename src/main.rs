//! CLI entry point for tabtint.

use std::collections::BTreeMap;
use std::io;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;

use tabtint::accents::{TabColors, TabPalette};
use tabtint::cli::{Cli, Command, PaletteArgs, PaletteFormat, SimulateArgs};
use tabtint::color::{Hsl, generate_hue_variations};
use tabtint::config::PageConfig;
use tabtint::document::HeadlessDocument;
use tabtint::event::{PageEvent, parse_script};
use tabtint::logging::init_logging;
use tabtint::page::Page;
use tabtint::schedule::VirtualClock;
use tabtint::tabs::TabId;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match &cli.command {
        Command::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "tabtint", &mut io::stdout());
            Ok(())
        }
        Command::Palette(args) => {
            let (config, _guard) = setup(&cli)?;
            print_palette(config, args)
        }
        Command::Simulate(args) => {
            let (config, _guard) = setup(&cli)?;
            simulate(config, args)
        }
    }
}

/// Load the configuration, overlay the global flags and start logging.
fn setup(cli: &Cli) -> Result<(PageConfig, WorkerGuard)> {
    let mut config =
        PageConfig::load(cli.config.as_deref()).wrap_err("Failed to load configuration")?;
    cli.apply_logging(&mut config.logging);
    let config = config.validated()?;
    let guard = init_logging(&config.logging);
    Ok((config, guard))
}

/// One generated colour, optionally tied to a tab.
#[derive(Debug, Serialize)]
struct PaletteEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    tab: Option<TabId>,
    #[serde(flatten)]
    hsl: Hsl,
    css: String,
}

fn print_palette(mut config: PageConfig, args: &PaletteArgs) -> Result<()> {
    args.apply(&mut config);
    let config = config.validated()?;
    let count = args.count.map_or(TabId::ALL.len(), usize::from);

    if count == TabId::ALL.len() {
        let palette = TabPalette::generate(&config.palette.base, config.palette.hue_step);
        match args.format {
            PaletteFormat::Css => print!("{}", palette.to_css()),
            PaletteFormat::Json => {
                let map: BTreeMap<TabId, &TabColors> = palette.iter().collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            }
            PaletteFormat::Yaml => {
                let entries: Vec<PaletteEntry> = palette
                    .iter()
                    .map(|(tab, colors)| PaletteEntry {
                        tab: Some(tab),
                        hsl: colors.hsl,
                        css: colors.active.clone(),
                    })
                    .collect();
                print!("{}", serde_yaml::to_string(&entries)?);
            }
        }
        return Ok(());
    }

    let variations = generate_hue_variations(&config.palette.base, count, config.palette.hue_step);
    match args.format {
        PaletteFormat::Css => {
            println!(":root {{");
            for (i, hsl) in variations.iter().enumerate() {
                println!("  --accent-{i}: {};", hsl.to_css());
            }
            println!("}}");
        }
        PaletteFormat::Json => println!("{}", serde_json::to_string_pretty(&variations)?),
        PaletteFormat::Yaml => {
            let entries: Vec<PaletteEntry> = variations
                .into_iter()
                .map(|hsl| PaletteEntry {
                    tab: None,
                    hsl,
                    css: hsl.to_css(),
                })
                .collect();
            print!("{}", serde_yaml::to_string(&entries)?);
        }
    }
    Ok(())
}

/// Page state after one event.
#[derive(Debug, Serialize)]
struct Step<'a> {
    event: String,
    at_ms: u64,
    active_tab: Option<TabId>,
    document: &'a HeadlessDocument,
}

fn simulate(mut config: PageConfig, args: &SimulateArgs) -> Result<()> {
    if let Some(initial) = args.initial {
        config.tabs.initial = initial;
    }

    let mut events = Vec::new();
    if let Some(path) = &args.script {
        let script = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let parsed = parse_script(&script)
            .map_err(|(line, e)| eyre!("{}:{}: {}", path.display(), line, e))?;
        events.extend(parsed);
    }
    for raw in &args.events {
        let event: PageEvent = raw
            .parse()
            .map_err(|e| eyre!("Invalid event '{}': {}", raw, e))?;
        events.push(event);
    }

    let document = HeadlessDocument::from_layout(&config.layout);
    let mut page = Page::load(&config, document, VirtualClock::new());

    let mut out = String::new();
    if args.trace {
        out.push_str(&render_step(&page, "load")?);
    }
    for event in &events {
        page.dispatch(event);
        if args.trace {
            out.push_str(&render_step(&page, &event.to_string())?);
        }
    }
    if !args.trace {
        let last = events
            .last()
            .map_or_else(|| "load".to_string(), |e| e.to_string());
        out.push_str(&render_step(&page, &last)?);
    }
    print!("{out}");
    Ok(())
}

fn render_step(page: &Page<HeadlessDocument, VirtualClock>, event: &str) -> Result<String> {
    let step = Step {
        event: event.to_string(),
        at_ms: page.scheduler().now().as_millis() as u64,
        active_tab: page.active_tab(),
        document: page.document(),
    };
    let yaml = serde_yaml::to_string(&step).wrap_err("Failed to serialize page state")?;
    Ok(format!("---\n{yaml}"))
}
