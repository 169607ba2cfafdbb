use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use loadout_cache::{FileKeyValueStore, LocalCache};
use loadout_crypto::{pretty_bytes, ContentAddresser};
use loadout_resolver::Resolver;
use loadout_schema::normalize_preset;
use loadout_server::{LoadoutServer, ServerConfig};
use loadout_store::PresetStore;
use loadout_types::{PresetId, PresetSource, SavedPreset};
use serde_json::{json, Value};

use crate::cli::*;
use crate::config::ClientConfig;

type CliResolver = Resolver<Arc<dyn PresetStore>, FileKeyValueStore>;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match &cli.command {
        Command::Save(args) => {
            let config = ClientConfig::resolve(&cli)?;
            cmd_save(&open_resolver(&config)?, args, format).await
        }
        Command::Load(args) => {
            let config = ClientConfig::resolve(&cli)?;
            cmd_load(&open_resolver(&config)?, args, format).await
        }
        Command::Recent(args) => {
            let config = ClientConfig::resolve(&cli)?;
            cmd_recent(&open_resolver(&config)?, args, format)
        }
        Command::Forget(args) => {
            let config = ClientConfig::resolve(&cli)?;
            cmd_forget(&open_resolver(&config)?, args, format)
        }
        Command::Normalize(args) => cmd_normalize(args),
        Command::Id(args) => cmd_id(args, format),
        Command::Serve(args) => cmd_serve(args).await,
    }
}

fn open_resolver(config: &ClientConfig) -> anyhow::Result<CliResolver> {
    let kv = FileKeyValueStore::open(&config.cache_dir)
        .with_context(|| format!("opening cache at {}", config.cache_dir.display()))?;
    let cache = LocalCache::with_capacity(kv, config.recent_capacity);
    Ok(Resolver::new(config.open_store(), cache))
}

fn read_input(file: &str) -> anyhow::Result<Value> {
    let text = if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        text
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading {file}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("{file} is not valid JSON"))
}

fn pretty(preset: &SavedPreset) -> anyhow::Result<String> {
    let bytes = pretty_bytes(&serde_json::to_value(preset)?)?;
    Ok(String::from_utf8(bytes)?)
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Save a preset file and return its id and where the store put it.
async fn save_file(resolver: &CliResolver, file: &str) -> anyhow::Result<(PresetId, String)> {
    let raw = read_input(file)?;
    let id = resolver.save_raw(&raw).await?;
    let location = resolver.store().location(&id);
    Ok((id, location))
}

async fn cmd_save(resolver: &CliResolver, args: &SaveArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (id, url) = save_file(resolver, &args.file).await?;
    match format {
        OutputFormat::Json => print_json(&json!({ "id": id.as_str(), "url": url }))?,
        OutputFormat::Text => {
            println!("{} Saved preset {}", "✓".green().bold(), id.as_str().yellow().bold());
            println!("  {}", url.blue());
        }
    }
    Ok(())
}

async fn cmd_load(resolver: &CliResolver, args: &LoadArgs, format: OutputFormat) -> anyhow::Result<()> {
    let resolved = resolver.load(&args.id).await;
    let preset = &resolved.document.preset;
    if let Some(path) = &args.output {
        std::fs::write(path, pretty(preset)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => print_json(&json!({
            "presetId": resolved.preset_id.as_ref().map(|id| id.as_str()),
            "source": resolved.source,
            "preset": preset,
        }))?,
        OutputFormat::Text => {
            match resolved.source {
                Some(source) => println!(
                    "{} ({})",
                    resolved.document.name().bold(),
                    source_label(source)
                ),
                None => println!(
                    "{} No preset found for {}, using a blank preset",
                    "!".yellow().bold(),
                    args.id.yellow()
                ),
            }
            if args.output.is_none() {
                println!("{}", pretty(preset)?);
            }
        }
    }
    Ok(())
}

fn cmd_recent(resolver: &CliResolver, args: &RecentArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut recent = resolver.recent()?;
    if let Some(limit) = args.limit {
        recent.truncate(limit);
    }
    match format {
        OutputFormat::Json => print_json(&serde_json::to_value(&recent)?)?,
        OutputFormat::Text if recent.is_empty() => println!("No recent presets."),
        OutputFormat::Text => {
            for summary in &recent {
                println!(
                    "{}  {}  ({})",
                    summary.preset_id.yellow(),
                    summary.preset_name,
                    source_label(summary.source)
                );
            }
        }
    }
    Ok(())
}

fn cmd_forget(resolver: &CliResolver, args: &ForgetArgs, format: OutputFormat) -> anyhow::Result<()> {
    let removed = resolver.forget(&args.id)?;
    match format {
        OutputFormat::Json => print_json(&json!({ "id": args.id, "removed": removed }))?,
        OutputFormat::Text if removed => println!("Forgot {}", args.id.yellow()),
        OutputFormat::Text => println!("{} is not in the local cache", args.id.yellow()),
    }
    Ok(())
}

fn read_preset_object(file: &str) -> anyhow::Result<SavedPreset> {
    let raw = read_input(file)?;
    if !raw.is_object() {
        bail!("{file} does not contain a JSON object");
    }
    Ok(normalize_preset(&raw))
}

fn cmd_normalize(args: &NormalizeArgs) -> anyhow::Result<()> {
    let preset = read_preset_object(&args.file)?;
    println!("{}", pretty(&preset)?);
    Ok(())
}

fn cmd_id(args: &IdArgs, format: OutputFormat) -> anyhow::Result<()> {
    let preset = read_preset_object(&args.file)?;
    let id = ContentAddresser::PRESET.address_json(&preset)?;
    match format {
        OutputFormat::Json => print_json(&json!({ "id": id.as_str() }))?,
        OutputFormat::Text => println!("{id}"),
    }
    Ok(())
}

async fn cmd_serve(args: &ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.server_config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    if let Some(root) = &args.root {
        config.storage_root = root.clone();
    }
    if let Some(max) = args.max_body_bytes {
        config.max_body_bytes = max;
    }
    if args.no_cors {
        config.permissive_cors = false;
    }

    println!(
        "Loadout server on {} (root: {})",
        config.bind_addr.to_string().bold(),
        config.storage_root.display()
    );
    LoadoutServer::new(config).serve().await?;
    Ok(())
}

fn source_label(source: PresetSource) -> colored::ColoredString {
    match source {
        PresetSource::Local => "local".cyan(),
        PresetSource::Cloud => "cloud".green(),
    }
}
