use clap::error::ErrorKind;
use csort::prelude::*;

#[derive(Debug)]
pub struct ProgSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub spec_help: &'static str,
    pub author: &'static str,
    pub version: &'static str,
}

impl ProgSpec {
    pub const fn new(name: &'static str, help: &'static str, spec_help: &'static str) -> Self {
        Self {
            name,
            help,
            spec_help,
            author: "avjewe@gmail.com",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
    fn command(&self) -> clap::Command {
        clap::Command::new(self.name).version(self.version).author(self.author).about(self.help).arg(
            clap::Arg::new("spec")
                .value_name("SPEC")
                .help(self.spec_help)
                .required(true)
                .allow_hyphen_values(true),
        )
    }
}

/// Return the one and only argument, the sort spec.
/// Help and version are printed here, and reported as `Error::NoError`.
pub fn parse(prog: &ProgSpec, argv: &[String]) -> Result<String> {
    let a = prog.command();
    a.clone().debug_assert();
    match a.try_get_matches_from(argv) {
        Ok(m) => match m.get_one::<String>("spec") {
            Some(s) => Ok(s.clone()),
            None => Err(Error::Usage(usage(prog))),
        },
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                e.print()?;
                Err(Error::NoError)
            }
            _ => Err(Error::Usage(usage(prog))),
        },
    }
}

fn usage(prog: &ProgSpec) -> String {
    format!("incorrect number of arguments, USAGE : {} SPEC", prog.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROG: ProgSpec = ProgSpec::new("csort", "test", "spec");

    fn argv(x: &[&str]) -> Vec<String> {
        x.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn one_arg() {
        assert_eq!(parse(&PROG, &argv(&["csort", "2,-1f"])).unwrap(), "2,-1f");
        assert_eq!(parse(&PROG, &argv(&["csort", "-1"])).unwrap(), "-1");
        assert_eq!(parse(&PROG, &argv(&["csort", "-2f,1"])).unwrap(), "-2f,1");
    }

    #[test]
    fn wrong_count() {
        assert!(matches!(parse(&PROG, &argv(&["csort"])), Err(Error::Usage(_))));
        assert!(matches!(parse(&PROG, &argv(&["csort", "1", "2"])), Err(Error::Usage(_))));
    }

    #[test]
    fn help_and_version() {
        assert!(matches!(parse(&PROG, &argv(&["csort", "--help"])), Err(Error::NoError)));
        assert!(matches!(parse(&PROG, &argv(&["csort", "--version"])), Err(Error::NoError)));
    }
}
