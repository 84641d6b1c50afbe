use log::error;

fn main() {
    env_logger::init();

    if let Err(e) = aisdk_prep::get_arg().and_then(aisdk_prep::run) {
        error!("{e:#}");
        std::process::exit(-1);
    }
}
