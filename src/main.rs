use shatter::config::SceneConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SceneConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };

    if let Err(e) = shatter::viewer::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
