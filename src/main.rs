// Cousinentreffen - shared availability calendar for the cousins' reunion
// Main entry point for iced application

use std::sync::Arc;

use cousinentreffen::app::CousinsApp;
use cousinentreffen::config::load_settings;
use cousinentreffen::utils::logging::init_logging;
use cousinentreffen::{store, AppState, AudioManager};
use iced::{Application, Settings as IcedSettings};
use log::{error, info, warn};

#[tokio::main]
async fn main() -> iced::Result {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting Cousinentreffen with iced UI");

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("Invalid configuration: {}", e);
            eprintln!("Please check your settings file and environment and try again.");
            std::process::exit(1);
        }
    };

    let store = match store::from_settings(&settings) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to set up availability store: {}", e);
            eprintln!("Failed to set up availability store: {}", e);
            std::process::exit(1);
        }
    };

    let audio = match AudioManager::new(&settings) {
        Ok(audio_manager) => Arc::new(audio_manager),
        Err(e) => {
            warn!("Failed to initialize audio system: {}", e);
            warn!("Continuing without audio");
            Arc::new(AudioManager::new_dummy())
        }
    };

    CousinsApp::run(IcedSettings {
        flags: AppState { settings, store, audio },
        window: iced::window::Settings {
            size: iced::Size::new(1000.0, 800.0),
            resizable: true,
            ..Default::default()
        },
        id: None,
        fonts: vec![],
        default_font: Default::default(),
        default_text_size: iced::Pixels(16.0),
        antialiasing: true,
    })
}
