mod app;
use math_facts::*;

use app::MathFactsApp;
use config::{CONFIG_FILE, data_dir, load_config};
use database::{MemoryStore, SqliteStore, StateStore};
use log::{info, warn};

fn main() -> eframe::Result<()> {
    let data_dir = data_dir().expect("Failed to create data directory");
    let cfg = load_config(&data_dir.join(CONFIG_FILE)).unwrap_or_else(|e| {
        eprintln!("Invalid {}, using defaults: {}", CONFIG_FILE, e);
        config::AppConfig::default()
    });

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cfg.log_filter))
        .init();
    info!("Starting Math Facts...");

    let db_path = cfg.resolved_database_path(&data_dir);
    let store: Box<dyn StateStore> = match SqliteStore::open(&db_path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Cannot open {:?}, progress will not be saved: {}", db_path, e);
            Box::new(MemoryStore::new())
        }
    };

    let mut session = DrillSession::load(store);
    session.request_next_problem();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Math Facts",
        options,
        Box::new(move |_cc| Ok(Box::new(MathFactsApp::new(session)))),
    )
}
