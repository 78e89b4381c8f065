//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting MySTRO Share");

    let result = mystro_app::AppConfig::load()
        .map_err(mystro_app::AppError::from)
        .and_then(|config| pollster::block_on(mystro_app::App::run(config)));

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("mystro: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
