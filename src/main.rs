use ChemEq::Examples::stoichiometry_examples::stoich_examples;
use log::{LevelFilter, error};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

pub fn main() {
    //
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger is not initialized: {}", e);
    }
    let task: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);
    if let Err(e) = stoich_examples(task) {
        error!("example {} failed: {}", task, e);
    }
}
