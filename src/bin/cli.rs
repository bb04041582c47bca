// src/bin/cli.rs
use color_eyre::eyre::eyre;
use pli_receipts::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let params = cli::parse_args(std::env::args().skip(1)).map_err(|e| eyre!("{e}"))?;
    cli::run(params).map_err(|e| eyre!("{e}"))
}
