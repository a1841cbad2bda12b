//! popup-translate CLI entry point.

use clap::{Parser, Subcommand};
use popup_translate::api::commands::settings::SettingsPage;
use popup_translate::core::clipboard::ClipboardWriter;
use popup_translate::core::features::{GoogleTranslator, Translator};
use popup_translate::core::languages;
use popup_translate::core::popup::InlineStatus;
use popup_translate::core::preferences::{SettingsFileStore, TargetLanguagePreference};
use popup_translate::shared::settings::AppSettings;
use popup_translate::{
    place_with_fit, AppResult, HeadlessSurface, Phase, Point, PopupController, RenderStrategy, Services, Size,
    TranslationRequest, Viewport,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "popup-translate",
    version,
    about = "Selection translation popup engine",
    arg_required_else_help = true
)]
struct Cli {
    /// Override settings file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate text and print the result JSON.
    Translate {
        text: String,
        /// Target language; defaults to the saved preference.
        #[arg(long, value_name = "CODE")]
        to: Option<String>,
    },
    /// Compute a popup position.
    Place {
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long, default_value_t = 320.0)]
        width: f64,
        #[arg(long, default_value_t = 160.0)]
        height: f64,
        #[arg(long, default_value_t = 1280.0)]
        viewport_width: f64,
        #[arg(long, default_value_t = 800.0)]
        viewport_height: f64,
    },
    /// List supported target languages.
    Languages,
    /// Show or change settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Run one popup lifecycle on a headless surface and print its markup.
    Demo {
        text: String,
        #[arg(long, default_value_t = 640.0)]
        x: f64,
        #[arg(long, default_value_t = 400.0)]
        y: f64,
        /// Retranslate into this language after the first result.
        #[arg(long, value_name = "CODE")]
        retranslate: Option<String>,
        /// Render with the markup strategy instead of the element tree.
        #[arg(long)]
        markup: bool,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsAction {
    Show,
    Set { code: String },
}

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("popup_translate=info"))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("popup-translate: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let settings_path = match cli.config {
        Some(path) => path,
        None => AppSettings::get_settings_path()?,
    };
    let preference = TargetLanguagePreference::new(Arc::new(SettingsFileStore::new(settings_path.clone())));

    match cli.command {
        Command::Translate { text, to } => {
            let settings = AppSettings::load_from(&settings_path).await?;
            let target = match to {
                Some(code) => code,
                None => preference.get().await,
            };
            let translator = GoogleTranslator::new(settings.translator)?;
            let result = translator.translate(&TranslationRequest::new(text.trim(), target)).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Place {
            x,
            y,
            width,
            height,
            viewport_width,
            viewport_height,
        } => {
            let settings = AppSettings::load_from(&settings_path).await?;
            let (position, fit) = place_with_fit(
                Point::new(x, y),
                Size::new(width, height),
                Viewport::new(viewport_width, viewport_height),
                &settings.popup.placement,
            );
            println!("{} {} ({:?})", position.left, position.top, fit);
        }
        Command::Languages => {
            for (code, name) in languages::LANGUAGES {
                println!("{code}\t{name}");
            }
        }
        Command::Settings { action } => match action {
            SettingsAction::Show => {
                let settings = AppSettings::load_from(&settings_path).await?;
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
            SettingsAction::Set { code } => {
                let mut page = SettingsPage::open(preference).await;
                let outcome = page.select(&code).await;
                if let Some(status) = page.status() {
                    println!("{status}");
                }
                outcome?;
            }
        },
        Command::Demo {
            text,
            x,
            y,
            retranslate,
            markup,
        } => {
            let settings = AppSettings::load_from(&settings_path).await?;
            let services = Services {
                translator: Arc::new(GoogleTranslator::new(settings.translator.clone())?),
                preference,
                clipboard: clipboard(),
            };
            let renderer = if markup {
                RenderStrategy::Markup(Default::default())
            } else {
                RenderStrategy::Tree(Default::default())
            };
            let surface = HeadlessSurface::new(Viewport::new(1280.0, 800.0), Size::new(320.0, 160.0));
            let mut controller = PopupController::new(services, surface, renderer, settings.popup);

            let id = controller.trigger(Point::new(x, y), &text)?;
            while controller
                .state()
                .is_some_and(|s| s.phase == Phase::Loading || s.position.is_none())
            {
                controller.step().await;
            }

            if let Some(code) = retranslate {
                controller.change_target_language(&code)?;
                while controller
                    .state()
                    .is_some_and(|s| s.inline == InlineStatus::Translating)
                {
                    controller.step().await;
                }
            }

            if let Some(state) = controller.state() {
                if let Some(position) = state.position {
                    println!("phase: {:?}, position: {} {}", state.phase, position.left, position.top);
                }
            }
            if let Some(element) = controller.surface().element(id) {
                println!("{}", element.content.to_html());
            }

            controller.dismiss();
            while controller.state().is_some() {
                controller.step().await;
            }
            controller.flush_preferences().await;
        }
    }

    Ok(())
}

#[cfg(feature = "system-clipboard")]
fn clipboard() -> Arc<dyn ClipboardWriter> {
    Arc::new(popup_translate::core::clipboard::SystemClipboard)
}

#[cfg(not(feature = "system-clipboard"))]
fn clipboard() -> Arc<dyn ClipboardWriter> {
    Arc::new(popup_translate::core::clipboard::UnavailableClipboard)
}
