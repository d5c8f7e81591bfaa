use std::io::{self, BufRead, Write};

use crate::{
    Error, lex, parse,
    interpreter::{
        environment::Environment,
        evaluator::core::{DEFAULT_MAX_DEPTH, Evaluator},
        value::core::Value,
    },
};

/// The prompt printed before each line read by the REPL.
pub const PROMPT: &str = ">> ";

/// Settings of a driver session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum number of active function calls.
    pub max_depth: usize,
    /// Print the parsed program before evaluating it.
    pub echo_ast:  bool,
    /// The REPL prompt.
    pub prompt:    String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH,
               echo_ast:  false,
               prompt:    PROMPT.to_string(), }
    }
}

/// A driver session: one root environment and one evaluator that persist
/// across inputs.
///
/// Bindings made by one input are visible to the next, and a failed input
/// leaves the session usable.
#[derive(Debug)]
pub struct Session {
    env:       Environment,
    evaluator: Evaluator,
    config:    SessionConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { env: Environment::new(),
               evaluator: Evaluator::with_max_depth(config.max_depth),
               config }
    }

    /// The session's root environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Lexes, parses and evaluates one input against the session.
    ///
    /// Nothing is evaluated if the input has syntax errors. Output written by
    /// `puts` stays buffered until [`Session::take_output`].
    ///
    /// # Returns
    /// The value of the input's last expression statement, or `None` if it
    /// had none.
    ///
    /// # Errors
    /// - `Error::Parse` with every syntax error of the input.
    /// - `Error::Runtime` with the first runtime error.
    ///
    /// # Example
    /// ```
    /// use jet::{interpreter::value::core::Value, repl::Session};
    ///
    /// let mut session = Session::default();
    ///
    /// assert_eq!(session.eval_source("let x = 2;").unwrap(), None);
    /// assert_eq!(session.eval_source("x * 21").unwrap(), Some(Value::Integer(42)));
    /// assert!(session.eval_source("let = ;").is_err());
    /// ```
    pub fn eval_source(&mut self, source: &str) -> Result<Option<Value>, Error> {
        let (program, errors) = parse(lex(source));
        if !errors.is_empty() {
            return Err(Error::Parse(errors));
        }

        Ok(self.evaluator.eval_program(&program, &self.env)?)
    }

    /// Removes and returns the lines written by `puts`.
    pub fn take_output(&mut self) -> Vec<String> {
        self.evaluator.take_output()
    }

    /// Runs one input and writes what the REPL shows for it.
    ///
    /// In order: the echoed program if enabled, the `puts` output, then the
    /// inspected result. Syntax errors print as `parser errors:` followed by
    /// one tab-indented line per error. A runtime error prints as
    /// `ERROR: <message>`.
    ///
    /// # Returns
    /// `true` if the input parsed and evaluated without error.
    ///
    /// # Errors
    /// Only I/O errors from `output`.
    pub fn execute<W>(&mut self, source: &str, output: &mut W) -> io::Result<bool>
        where W: Write
    {
        tracing::debug!(source, "session input");

        let (program, errors) = parse(lex(source));
        if !errors.is_empty() {
            writeln!(output, "{}", Error::Parse(errors))?;
            return Ok(false);
        }

        if self.config.echo_ast {
            writeln!(output, "{program}")?;
        }

        let result = self.evaluator.eval_program(&program, &self.env);

        for line in self.evaluator.take_output() {
            writeln!(output, "{line}")?;
        }

        match result {
            Ok(Some(value)) => {
                writeln!(output, "{}", value.inspect())?;
                Ok(true)
            },
            Ok(None) => Ok(true),
            Err(error) => {
                writeln!(output, "{}", Error::Runtime(error))?;
                Ok(false)
            },
        }
    }
}

/// Runs the read-eval-print loop until `input` is exhausted.
///
/// Prints the prompt, reads one line, and hands it to
/// [`Session::execute`]. All lines share one session. Bytes that are not
/// valid UTF-8 are replaced rather than ending the loop.
///
/// # Errors
/// Returns I/O errors from reading `input` or writing `output`.
///
/// # Example
/// ```
/// use jet::repl::{SessionConfig, start};
///
/// let input = "let a = 5;\na * 2\n";
/// let mut output = Vec::new();
///
/// start(input.as_bytes(), &mut output, SessionConfig::default()).unwrap();
///
/// assert_eq!(String::from_utf8(output).unwrap(), ">> >> 10\n>> ");
/// ```
pub fn start<R, W>(mut input: R, mut output: W, config: SessionConfig) -> io::Result<()>
    where R: BufRead,
          W: Write
{
    let mut session = Session::new(config);
    let mut line = Vec::new();

    loop {
        write!(output, "{}", session.config.prompt)?;
        output.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }

        // Invalid UTF-8 becomes U+FFFD and is reported by the lexer as an
        // illegal token, so the session carries on with the next line.
        let source = String::from_utf8_lossy(&line);
        session.execute(source.trim_end_matches(['\n', '\r']), &mut output)?;
    }
}
