use clap::Parser;

use app::Cli;

fn main() {
    app::config::init_logging();
    let cli = Cli::parse();

    if let Err(err) = app::run(cli) {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
