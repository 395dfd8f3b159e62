use clap::ArgAction;

#[macro_export]
macro_rules! arg {
    ($a:expr,$b:expr,$c:expr,$d:expr) => {
        args::ArgSpec { name: $a, short: $b, value: $c, help: $d }
    };
}

#[derive(Debug)]
pub struct ProgSpec {
    pub help: &'static str,
    pub author: &'static str,
    pub version: &'static str,
}

impl ProgSpec {
    pub const fn new(help: &'static str) -> Self {
        Self { help, author: env!("CARGO_PKG_AUTHORS"), version: env!("CARGO_PKG_VERSION") }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    pub name: &'static str,
    pub short: &'static str,
    pub value: &'static str,
    pub help: &'static str,
}

#[derive(Debug)]
pub struct ArgValue {
    pub name: String,
    pub value: String,
    pub index: usize,
}

impl ArgValue {
    pub fn new(name: &str, value: &str, index: usize) -> Self {
        Self { name: name.to_string(), value: value.to_string(), index }
    }
}

pub fn add_arg(a: clap::Command, x: &ArgSpec) -> clap::Command {
    let mut b = clap::Arg::new(x.name);
    if let Some(ch) = x.short.chars().next() {
        b = b.short(ch);
    }
    b = b.long(x.name).help(x.help);
    if x.value.is_empty() {
        b = b.action(ArgAction::Append).num_args(0).default_missing_value("present");
    } else {
        b = b.value_name(x.value).action(ArgAction::Append);
    }
    a.arg(b)
}

pub fn get_arg(m: &clap::ArgMatches, x: &ArgSpec, v: &mut Vec<ArgValue>) {
    if let Some(arg) = m.get_many::<String>(x.name) {
        let ind = m.indices_of(x.name).map(|i| i.collect::<Vec<_>>()).unwrap_or_default();
        for (i, val) in arg.enumerate() {
            let index = ind.get(i).copied().unwrap_or(0);
            let val = if x.value.is_empty() { "" } else { val.as_str() };
            v.push(ArgValue::new(x.name, val, index));
        }
    }
}

/// Parse the command line. Return the options in command line order, and the input files.
/// No input files means standard input.
pub fn parse(prog: &ProgSpec, spec: &[ArgSpec], argv: &[String]) -> (Vec<ArgValue>, Vec<String>) {
    let mut a = clap::Command::new("urlsort")
        .version(prog.version)
        .author(prog.author)
        .about(prog.help)
        .after_help("Lines are sorted by domain, port, scheme, path, query string, then fragment.");

    for x in spec {
        a = add_arg(a, x);
    }
    a = a.arg(clap::Arg::new("input_files").value_name("FILE").action(ArgAction::Append));
    let m = a.get_matches_from(argv);

    let mut v: Vec<ArgValue> = Vec::new();
    for x in spec {
        get_arg(&m, x, &mut v);
    }
    let mut files: Vec<String> = Vec::new();
    if let Some(arg) = m.get_many::<String>("input_files") {
        for f in arg {
            files.push(f.to_string());
        }
    }
    if files.is_empty() {
        files.push("-".to_string());
    }
    v.sort_by(|a, b| a.index.cmp(&b.index));
    (v, files)
}
