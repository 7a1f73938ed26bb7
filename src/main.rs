use std::{env::current_dir, path::PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::{Section, eyre::eyre};
use libvpblog::{
    date::{FormatOptions, Locale, format_date, format_naive_date, parse_date_value},
    pipeline::{build_at, collect_at},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "vpblog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive page metadata and write the site data file
    Build {
        /// Site root (defaults to the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
    /// List posts with their creation dates
    Posts {
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Date pattern (defaults to the theme's date format)
        #[arg(short, long)]
        format: Option<String>,
        #[arg(long)]
        locale: Option<String>,
        /// Normalise dates to UTC
        #[arg(long)]
        utc: bool,
    },
    /// Format a single date value
    FormatDate {
        /// RFC 3339 timestamp or YYYY-MM-DD
        date: String,
        #[arg(default_value = "LL")]
        pattern: String,
        #[arg(long, default_value = "en")]
        locale: String,
        #[arg(long)]
        utc: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match Cli::parse().command {
        Command::Build { root } => build_at(&resolve_root(root)?),
        Command::Posts {
            root,
            format,
            locale,
            utc,
        } => list_posts(resolve_root(root)?, format, locale, utc),
        Command::FormatDate {
            date,
            pattern,
            locale,
            utc,
        } => {
            let value = parse_date_value(&date).ok_or_else(|| eyre!("Invalid date: {date}"))?;
            let options = FormatOptions {
                locale: Locale::parse(&locale),
                utc,
            };
            println!("{}", format_date(&value, &pattern, &options));
            Ok(())
        }
    }
}

fn resolve_root(root: Option<PathBuf>) -> color_eyre::Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => current_dir().with_note(|| "While getting the current working directory"),
    }
}

fn list_posts(
    root: PathBuf,
    format: Option<String>,
    locale: Option<String>,
    utc: bool,
) -> color_eyre::Result<()> {
    let site = collect_at(&root)?;
    let theme = &site.config.theme;

    let mut options = FormatOptions::from_theme(theme);
    if let Some(locale) = locale.as_deref() {
        options.locale = Locale::parse(locale);
    }
    options.utc |= utc;
    let pattern = format.as_deref().unwrap_or(&theme.date_format);

    for post in site.posts() {
        let date = post
            .created_at
            .map(|d| format_naive_date(d, pattern, &options))
            .unwrap_or_else(|| "-".to_string());
        let title = post.page.title().unwrap_or(post.page.path.as_str());
        println!("{date}\t{title}\t{}", post.page.path);
    }

    Ok(())
}
