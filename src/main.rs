use clap::Parser;
use dbimport_params::cli::args::Cli;
use dbimport_params::cli::dispatch::handle;

fn main() {
    let cli = Cli::parse();
    handle(cli);
}
