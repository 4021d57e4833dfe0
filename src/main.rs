mod cli;

use std::time::Duration;

use academy::prelude::*;
use anyhow::{bail, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("{e}");
    }
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Commands::Watch { interval_secs: Some(secs) } = &cli.command {
        cfg.refresh_interval_secs = *secs;
    }
    let academy = Academy::from_config(&cfg);
    let loader = academy.loader();

    // watch does its own loading in the background
    if !matches!(cli.command, Commands::Watch { .. }) {
        if let Err(e) = loader.load().await {
            bail!("{}: {e}", e.user_message());
        }
    }

    match cli.command {
        Commands::Categories => {
            let cats = loader.categories();
            if cli.json { return print_json(&cats); }
            for c in cats {
                println!("{:<12} {:<24} {:>4} items", c.id, c.name, c.count);
            }
        }
        Commands::List { category } => print_items(&loader.by_category(&category), cli.json)?,
        Commands::Featured => print_items(&loader.featured_content(), cli.json)?,
        Commands::Search { query, category } => {
            let hits = loader.search(&category, &query);
            if hits.is_empty() && !cli.json {
                println!("No content found matching {query:?}.");
            }
            print_items(&hits, cli.json)?;
        }
        Commands::Open { id } => match academy.activate(&id)? {
            Activation::OpenedVideo(url) => println!("Opened {url}"),
            Activation::DocumentUnavailable => println!("Document viewing is not available yet."),
            Activation::Nothing => println!("Nothing to open for {id}."),
        },
        Commands::Watch { .. } => watch(&academy, cli.json).await?,
    }
    Ok(())
}

async fn watch(academy: &Academy, json: bool) -> Result<()> {
    let handle = academy.start_refresh();
    let loader = academy.loader();
    let mut last: Option<LoaderStatus> = None;
    let mut poll = tokio::time::interval(Duration::from_secs(1));
    println!("Refreshing every {}s, Ctrl-C to stop.", academy.refresh_interval().as_secs());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = poll.tick() => {}
        }
        let status = loader.status();
        let settled = status.last_loaded_at.is_some() || status.error.is_some();
        if status.loading || !settled || last.as_ref() == Some(&status) {
            continue;
        }
        if json {
            print_json(&status)?;
        } else if let Some(err) = &status.error {
            println!("error: {err} (keeping {} items)", status.items);
        } else {
            println!("loaded {} items ({} rows skipped)", status.items, status.skipped_rows);
        }
        last = Some(status);
    }
    handle.stop().await;
    Ok(())
}

fn print_items(items: &[ContentItem], json: bool) -> Result<()> {
    if json { return print_json(&items); }
    for i in items {
        let mut flags = Vec::new();
        if i.is_featured { flags.push("featured"); }
        if i.is_new { flags.push("new"); }
        println!("{:<10} [{}] {} ({}){}{}",
            i.id,
            i.kind.as_str(),
            i.title,
            i.category,
            i.duration.as_deref().map(|d| format!(" - {d}")).unwrap_or_default(),
            if flags.is_empty() { String::new() } else { format!(" <{}>", flags.join(", ")) },
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("academy=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}
