use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stay_mapper::dom::{PatchDom, TemplateDom};
use stay_mapper::hooks::Hooks;
use stay_mapper::mapping::QueryParams;
use stay_mapper::{mapper_for, BootReport, Bootstrap, PageKind, SiteConfig, SiteRoot};

/// Render a template page from a property document
#[derive(Debug, Parser)]
#[command(name = "stay-mapper", version)]
struct Args {
    /// Site root: URL or local directory
    #[arg(long)]
    site: Option<String>,

    /// Page type to render
    #[arg(long, value_enum)]
    page: PageKind,

    /// Page query string, e.g. "id=room-1"
    #[arg(long, default_value = "")]
    query: String,

    /// Page template; defaults to the page's file in a local site
    #[arg(long)]
    template: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON site config
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Output {
    report: BootReport,
    patch: PatchDom,
}

async fn load_template(args: &Args, config: &SiteConfig) -> anyhow::Result<TemplateDom> {
    let path = match (&args.template, config.root()?) {
        (Some(path), _) => path.clone(),
        (None, SiteRoot::Local(root)) => root.join(args.page.template_file()),
        (None, SiteRoot::Remote(_)) => {
            info!("No template given, every insertion point counts as missing");
            return Ok(TemplateDom::default());
        }
    };
    let html = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading template {}", path.display()))?;
    Ok(TemplateDom::from_html(&html))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SiteConfig::from_file(path)
            .await
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SiteConfig::default(),
    };
    if let Some(site) = &args.site {
        config.site = site.clone();
    }

    info!("🏠 Stay Mapper - {} page", args.page);
    info!("Site: {}", config.site);

    let (source, fragments) = config.sources().context("setting up site sources")?;
    let mut dom = load_template(&args, &config).await?;

    let report = Bootstrap::new(source.as_ref(), fragments.as_ref())
        .run(
            mapper_for(args.page),
            QueryParams::parse(&args.query),
            &mut dom,
            &mut Hooks::none(),
        )
        .await;

    if let Some(location) = &report.page.redirect {
        info!("↪️  Redirect to {}", location);
    }
    info!(
        "✅ Applied {} writes, {} insertion points missing",
        report.page.applied,
        report.page.missing_targets.len()
    );

    let output = Output {
        report,
        patch: dom.into_patch(),
    };
    let json = serde_json::to_string_pretty(&output)?;
    match &args.out {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!("💾 Saved result to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
