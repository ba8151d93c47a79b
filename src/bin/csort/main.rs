use csort::prelude::*;
use std::env;

mod args;

fn main() {
    match inner_main(env::args().collect()) {
        Err(e) => {
            if e.suppress() {
                std::process::exit(0);
            }
            if e.silent() {
                std::process::exit(1);
            }
            eprintln!("Error\t{}", e);
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}

fn inner_main(argv: Vec<String>) -> Result<()> {
    let prog = args::ProgSpec::new(
        "csort",
        "Sort comma separated lines from standard input.",
        "Comma separated keys, highest priority first. \
         Each key is a column number, starting at 1, \
         with a leading '-' to sort descending \
         and a trailing 'f' to sort as floating point. \
         For example : 2,-1f,3",
    );
    let spec: KeySpec = args::parse(&prog, &argv)?.parse()?;
    let config = SortConfig::new(spec);
    let mut r = get_reader("-")?;
    let mut w = get_writer();
    config.sort(&mut *r, &mut w)?;
    w.flush()?;
    Ok(())
}
