//! Main application entry point.

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting VecSketch");

    let config = vecsketch_app::AppConfig::from_env();
    vecsketch_app::App::run(config)
}
