use std::{
    fs::File,
    io::{self, BufRead, BufReader, StdinLock},
    path::PathBuf,
};

use anyhow::Context;

/// Where timing samples are read from.
#[derive(Debug)]
pub enum Input {
    Stdin {
        reader: StdinLock<'static>,
    },
    File {
        reader: BufReader<File>,
        path: PathBuf,
    },
}

impl Input {
    pub fn from_input_path(input_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match input_path {
            Some(path) => Input::open(path),
            None => Ok(Input::stdin()),
        }
    }

    pub fn stdin() -> Self {
        Input::Stdin {
            reader: io::stdin().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        Ok(Input::File {
            reader: BufReader::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Input::Stdin { .. } => "stdin".to_string(),
            Input::File { path, .. } => path.display().to_string(),
        }
    }
}

impl io::Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Stdin { reader } => reader.read(buf),
            Input::File { reader, .. } => reader.read(buf),
        }
    }
}

impl BufRead for Input {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Input::Stdin { reader } => reader.fill_buf(),
            Input::File { reader, .. } => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Input::Stdin { reader } => reader.consume(amt),
            Input::File { reader, .. } => reader.consume(amt),
        }
    }
}
