//! Command line front end for the emojikit core
//!
//! Run: cargo run --bin emojikit -- search happy
//!
//! Logging goes to stderr and is controlled by EMOJIKIT_LOG (e.g. `debug`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use emojikit::{
    EmojiPicker, Localization, PickerConfiguration, PreferenceStore, SkinTone, SkinTonePreference,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Emoji dataset (defaults to the bundled one)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Picker configuration as JSON; missing fields keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite file holding skin tone preferences (in-memory when omitted)
    #[arg(short, long, global = true)]
    prefs: Option<PathBuf>,

    /// Platform version used to hide emoji the platform cannot render
    #[arg(long, global = true, default_value = "17.0")]
    platform_version: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search emoji, best match first
    Search {
        prompt: String,
        /// Maximum number of results to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Print every section with its emoji
    Sections,
    /// Show the skin tone options of an emoji
    Tone {
        /// Emoji description, e.g. "thumbs up"
        description: String,
    },
    /// Inspect or change stored skin tones
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    Get { description: String },
    Set { description: String, tone: ToneArg },
    Clear,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ToneArg {
    /// Standard yellow
    None,
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl From<ToneArg> for Option<SkinTone> {
    fn from(arg: ToneArg) -> Self {
        match arg {
            ToneArg::None => None,
            ToneArg::Light => Some(SkinTone::Light),
            ToneArg::MediumLight => Some(SkinTone::MediumLight),
            ToneArg::Medium => Some(SkinTone::Medium),
            ToneArg::MediumDark => Some(SkinTone::MediumDark),
            ToneArg::Dark => Some(SkinTone::Dark),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PickerConfiguration> {
    let Some(path) = path else {
        return Ok(PickerConfiguration::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

fn open_picker(args: &Args) -> Result<EmojiPicker> {
    let config = load_config(args.config.as_ref())?;
    let preferences = match &args.prefs {
        Some(path) => Arc::new(PreferenceStore::open(path.to_string_lossy().to_string())?),
        None => Arc::new(PreferenceStore::in_memory()),
    };
    let localization = Localization::default();
    let picker = match &args.data {
        Some(path) => EmojiPicker::from_dataset(
            path.to_string_lossy().to_string(),
            config,
            localization,
            preferences,
            args.platform_version.clone(),
        )?,
        None => EmojiPicker::new(config, localization, preferences, args.platform_version.clone())?,
    };
    Ok(picker)
}

fn manage_prefs(path: Option<&PathBuf>, action: &PrefsAction) -> Result<()> {
    let path = path.context("--prefs is required to manage stored skin tones")?;
    let store = PreferenceStore::open(path.to_string_lossy().to_string())?;
    match action {
        PrefsAction::Get { description } => match store.get(description.clone()) {
            SkinTonePreference::NoPreference => println!("no preference"),
            SkinTonePreference::ExplicitNone => println!("standard"),
            SkinTonePreference::Tone { tone } => println!("{:?} {}", tone, tone.modifier()),
        },
        PrefsAction::Set { description, tone } => {
            let preference = match Option::<SkinTone>::from(*tone) {
                Some(tone) => SkinTonePreference::Tone { tone },
                None => SkinTonePreference::ExplicitNone,
            };
            store.set_preference(description.clone(), preference)?;
        }
        PrefsAction::Clear => store.clear_all()?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("EMOJIKIT_LOG"))
        .with_writer(std::io::stderr)
        .init();

    match &args.command {
        Command::Search { prompt, limit } => match open_picker(&args)?.update_search(prompt.clone()) {
            Some(outcome) => {
                println!("{}", outcome.title);
                for emoji in outcome.emojis.iter().take(*limit) {
                    println!("{}  {}", emoji.glyph, emoji.description);
                }
            }
            None => println!("{}", Localization::default().search_results_empty_title),
        },
        Command::Sections => {
            for section in open_picker(&args)?.sections() {
                let glyphs: Vec<&str> = section.emojis.iter().map(|e| e.glyph.as_str()).collect();
                println!("{} ({})", section.title, section.emojis.len());
                println!("  {}", glyphs.join(" "));
            }
        }
        Command::Tone { description } => {
            let picker = open_picker(&args)?;
            let emoji = picker
                .sections()
                .into_iter()
                .flat_map(|s| s.emojis)
                .find(|e| &e.description == description)
                .with_context(|| format!("no emoji named {description:?}"))?;
            let options = picker.skin_tone_options(emoji);
            if options.is_empty() {
                println!("{description} has no skin tone variants");
            } else {
                println!("{}", options.join(" "));
            }
        }
        Command::Prefs { action } => manage_prefs(args.prefs.as_ref(), action)?,
    }

    Ok(())
}
