//! parse and run tooltest files
//!
//! A tooltest file describes one run of a command line tool :
//! ```text
//! # comment
//! #command csort 2f
//! #stdin
//! x,10
//! y,2
//! #stdout
//! y,2
//! x,10
//! #status 0
//! ```
//! `#stdout` and `#stderr` are compared only if present. `#nonewline` removes the newline
//! from the end of the preceding section.

use crate::util::{get_reader, prerr, skip_leading_white, Error, Infile, Result};
use crate::err;
use fs_err as fs;
use std::io::{BufRead, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// One test to be run
#[derive(Debug, Clone, Default)]
pub struct Test {
    name: String,
    cmd: Vec<u8>,
    stdin: Vec<u8>,
    stdout: Option<Vec<u8>>,
    stderr: Option<Vec<u8>>,
    code: i32,
}

/// return directory as vec of file names
pub fn read_dir(dir: &Path) -> Result<Vec<String>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        dirs.push(entry.file_name().to_string_lossy().to_string());
    }
    Ok(dirs)
}

/// if line doesn't start with tag, return false
/// read following lines into buff, until another # line is seen
/// set need_read to false if line ends up with unexamined data
fn grab(
    tag: &[u8],
    buff: &mut Vec<u8>,
    line: &mut Vec<u8>,
    reader: &mut Infile,
    need_read: &mut bool,
) -> Result<bool> {
    if let Some(x) = line.strip_prefix(tag) {
        if !x.is_empty() {
            prerr(&[b"Unexpected stuff after ", tag, b" : ", line])?;
            return Err(Error::Silent);
        }
        loop {
            line.clear();
            let sz = reader.read_until(b'\n', line)?;
            if sz == 0 {
                break;
            }
            if line.starts_with(b"#") {
                if line.starts_with(b"#nonewline") {
                    if buff.last() == Some(&b'\n') {
                        buff.pop();
                    }
                } else {
                    if line.last() == Some(&b'\n') {
                        line.pop();
                    }
                    *need_read = false;
                }
                break;
            }
            buff.extend(&*line);
        }
        Ok(true)
    } else {
        Ok(false)
    }
}

impl Test {
    /// new
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// parse the file
    pub fn open(&mut self, file: &str) -> Result<()> {
        self.name = file.to_string();
        let mut reader = get_reader(file)?;
        let mut line: Vec<u8> = Vec::new();
        // empty files always ignored
        let sz = reader.read_until(b'\n', &mut line)?;
        if sz == 0 {
            return Ok(());
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        loop {
            let mut need_read = true;
            let mut stdout = Vec::new();
            let mut stderr = Vec::new();
            if let Some(x) = line.strip_prefix(b"#command") {
                self.cmd = skip_leading_white(x).to_vec();
            } else if grab(b"#stdin", &mut self.stdin, &mut line, &mut reader, &mut need_read)? {
            } else if grab(b"#stdout", &mut stdout, &mut line, &mut reader, &mut need_read)? {
                self.stdout = Some(stdout);
            } else if grab(b"#stderr", &mut stderr, &mut line, &mut reader, &mut need_read)? {
                self.stderr = Some(stderr);
            } else if let Some(x) = line.strip_prefix(b"#status") {
                let y = String::from_utf8_lossy(skip_leading_white(x)).trim().to_string();
                self.code = y.parse::<i32>()?;
            } else if line.starts_with(b"# ") || line.is_empty() {
                // comment
            } else {
                return err!("Unexpected line in test file {} : {}", file, String::from_utf8_lossy(&line));
            }
            if need_read {
                line.clear();
                let sz = reader.read_until(b'\n', &mut line)?;
                if sz == 0 {
                    break;
                }
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
            } else if line.is_empty() {
                break;
            }
        }
        if self.cmd.is_empty() {
            return err!("No #command in test file {}", file);
        }
        Ok(())
    }

    /// run the test, return true if it passed
    pub fn run(&self, config: &Config) -> Result<bool> {
        let ncmd = String::from_utf8_lossy(&self.cmd).to_string();
        let cmd: Vec<&str> = ncmd.split_whitespace().collect();
        if cmd.is_empty() {
            return err!("command is empty");
        }
        let basecmd = config.exe(cmd[0]);
        let mut stdin = tempfile::tempfile()?;
        stdin.write_all(&self.stdin)?;
        stdin.seek(SeekFrom::Start(0))?;
        let output = match Command::new(&basecmd).args(&cmd[1..]).stdin(stdin).output() {
            Err(x) => {
                prerr(&[b"Error trying to execute : ", basecmd.to_string_lossy().as_bytes()])?;
                return Err(Error::IoError(x));
            }
            Ok(x) => x,
        };
        let mut failed = false;
        match output.status.code() {
            Some(code) => {
                if code != self.code {
                    failed = true;
                    eprintln!("Exited with status code: {} instead of {}", code, self.code);
                }
            }
            None => {
                failed = true;
                eprintln!("Process terminated by signal");
            }
        }
        if let Some(stderr) = &self.stderr {
            if &output.stderr != stderr {
                failed = true;
                prerr(&[b"Stderr was\n", &output.stderr, b"\ninstead of\n", stderr])?;
            }
        }
        if let Some(stdout) = &self.stdout {
            if &output.stdout != stdout {
                failed = true;
                prerr(&[b"Stdout was\n", &output.stdout, b"\ninstead of\n", stdout])?;
            }
        }
        if failed {
            prerr(&[b"Test ", self.name.as_bytes(), b" failed : ", &self.cmd])?;
        }
        Ok(!failed)
    }
}

/// Global config for running a bunch of tooltests
/// Accumulates statistics
#[derive(Debug, Clone)]
pub struct Config {
    pass: usize,
    fail: usize,
    bindir: PathBuf,
}

impl Config {
    /// new
    #[must_use]
    pub fn new() -> Self {
        Self { pass: 0, fail: 0, bindir: PathBuf::from(".") }
    }
    /// set bin dir
    pub fn bin(&mut self, path: &Path) {
        self.bindir = path.to_path_buf();
    }
    /// full path of an executable in the bin dir
    fn exe(&self, name: &str) -> PathBuf {
        self.bindir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX))
    }
    /// number of tests passed
    #[must_use]
    pub const fn passed(&self) -> usize {
        self.pass
    }
    /// number of tests failed
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.fail
    }
    /// report
    pub fn report(&self) -> Result<()> {
        println!("{} test run, {} pass, {} failed", self.pass + self.fail, self.pass, self.fail);
        if self.fail > 0 {
            Err(Error::Silent)
        } else {
            Ok(())
        }
    }
    /// run one test file
    pub fn run(&mut self, file: &str) -> Result<bool> {
        let mut t = Test::new();
        t.open(file)?;
        let ok = t.run(self)?;
        if ok {
            self.pass += 1;
        } else {
            self.fail += 1;
        }
        Ok(ok)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_test_file() -> Result<()> {
        let mut t = Test::new();
        t.open("<<# a comment\\n#command csort -1\\n#stdin\\nb,2\\na,1\\n#stdout\\nb,2\\na,1\\n#stderr\\n#status 0\\n")?;
        assert_eq!(t.cmd, b"csort -1");
        assert_eq!(t.stdin, b"b,2\na,1\n");
        assert_eq!(t.stdout.as_deref(), Some(&b"b,2\na,1\n"[..]));
        assert_eq!(t.stderr, Some(Vec::new()));
        assert_eq!(t.code, 0);
        Ok(())
    }

    #[test]
    fn nonewline() -> Result<()> {
        let mut t = Test::new();
        t.open("<<#command csort 1\\n#stdin\\na\\n#nonewline\\n#status 1\\n")?;
        assert_eq!(t.stdin, b"a");
        assert_eq!(t.stdout, None);
        assert_eq!(t.stderr, None);
        assert_eq!(t.code, 1);
        Ok(())
    }

    #[test]
    fn bad_test_file() {
        let mut t = Test::new();
        assert!(t.open("<<#command csort 1\\nstray line\\n").is_err());
        let mut t = Test::new();
        assert!(t.open("<<#stdin\\nx\\n").is_err());
    }
}
