extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate fzscore;
extern crate shlex;

use std::env;
use std::io;

use clap::Parser;
use fzscore::filter::{self, read_candidates};
use fzscore::{FilterError, FilterOptions};

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if err.kind() == io::ErrorKind::BrokenPipe {
                std::process::exit(0)
            }
            error!("{err}");
            eprintln!("fzscore: {err}");
            std::process::exit(2)
        }
    }
}

fn parse_args() -> FilterOptions {
    let mut args = Vec::new();

    args.push(env::args().next().unwrap_or_else(|| String::from("fzscore")));
    args.extend(
        env::var("FZSCORE_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    for arg in env::args().skip(1) {
        args.push(arg);
    }

    FilterOptions::parse_from(args)
}

fn real_main() -> Result<i32, FilterError> {
    let opts = parse_args();
    debug!("options: {opts:?}");

    let stdin = io::stdin();
    let candidates = read_candidates(stdin.lock(), opts.input_delimiter())?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let written = filter::run(&opts, candidates, &mut stdout.lock(), &mut stderr.lock())?;
    debug!("{written} results for {:?}", opts.filter);

    Ok(if written == 0 { 1 } else { 0 })
}
