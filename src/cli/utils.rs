use crate::error::{AtlasError, AtlasResult};
use std::io::{BufRead, Write};

/// Line based console
///
/// Generic over reader and writer so that a session can be scripted.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn write(&mut self, src: &str) -> AtlasResult<()> {
        write!(self.output, "{}", src)
            .map_err(|err| AtlasError::io_error(err, "Failed to write to stdout"))?;
        self.output
            .flush()
            .map_err(|err| AtlasError::io_error(err, "Failed to flush stdout"))?;
        Ok(())
    }

    pub fn writeln(&mut self, src: &str) -> AtlasResult<()> {
        self.write(&format!("{}\n", src))
    }

    /// Read a line without trailing newline
    ///
    /// None means input has ended.
    pub fn read_line(&mut self) -> AtlasResult<Option<String>> {
        let mut input = String::new();
        let read_byte = self
            .input
            .read_line(&mut input)
            .map_err(|err| AtlasError::io_error(err, "Failed to read stdin from source"))?;
        if read_byte == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\n', '\r']).to_owned()))
    }

    /// Print a prompt and read the answer
    pub fn prompt(&mut self, message: &str) -> AtlasResult<Option<String>> {
        self.write(message)?;
        self.read_line()
    }

    /// Ask a y/n question. Anything but "y" is a no.
    pub fn confirm(&mut self, message: &str) -> AtlasResult<bool> {
        Ok(self
            .prompt(&format!("{} (y/n): ", message))?
            .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
            .unwrap_or(false))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

pub(crate) fn is_back(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("back")
}

pub(crate) fn is_quit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("quit")
}
