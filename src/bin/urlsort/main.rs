use std::env;
use tracing::Level;
use urlsort::sort::SortConfig;
use urlsort::Result;

pub mod args;
use args::ArgSpec;

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
            eprint!("Command\t");
            for x in env::args() {
                eprint!("{} ", x);
            }
            eprintln!();
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}

fn init_logging(verbose: usize, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn inner_main(argv: Vec<String>) -> Result<()> {
    let prog = args::ProgSpec::new(
        "Reads URLs from standard input or the named files, one per line, and writes them sorted.",
    );
    const A: [ArgSpec; 6] = [
        arg! {"output-file", "o", "Path", "Write output to this file, rather than standard output"},
        arg! {"unique", "u", "", "Print only the first of lines with equal sort keys"},
        arg! {"reverse", "r", "", "Sort in descending order"},
        arg! {"check", "c", "", "Check to see if the input is already sorted"},
        arg! {"verbose", "v", "", "Log more to standard error; repeat for even more"},
        arg! {"quiet", "q", "", "Log only errors"},
    ];
    let (args, files) = args::parse(&prog, &A, &argv);

    let mut config = SortConfig::new();
    let mut verbose = 0;
    let mut quiet = false;
    for x in args {
        if x.name == "output-file" {
            config.output = Some(x.value);
        } else if x.name == "unique" {
            config.unique = true;
        } else if x.name == "reverse" {
            config.reverse = true;
        } else if x.name == "check" {
            config.check = true;
        } else if x.name == "verbose" {
            verbose += 1;
        } else if x.name == "quiet" {
            quiet = true;
        } else {
            unreachable!();
        }
    }
    init_logging(verbose, quiet);
    tracing::debug!(?files, ?config, "starting");
    config.run(&files)
}
