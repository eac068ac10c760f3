/// Binary entrypoint for the `whos-alive` executable.
///
/// Sets up logging and hands off to `whos_alive_lib::run()`; all business
/// logic lives in the library crate so tests can import it directly.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    whos_alive_lib::run();
}
