//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Penpath");
    penpath_app::ShortcutRegistry::print_all();

    let config = penpath_app::AppConfig::from_env();
    if let Err(e) = pollster::block_on(penpath_app::App::with_config(config).run()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
