//! quarterturn CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse arguments, rotate the image,
//! and exit with the appropriate status. Argument count is the only error
//! handled here; everything else propagates out of `main`.

use env_logger::Env;

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let invocation = match cli::parse_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(usage) => {
            println!("{usage}");
            std::process::exit(1);
        }
    };

    cli::run(&invocation)?;
    println!("Rotated image saved to {}", invocation.output.display());
    Ok(())
}
