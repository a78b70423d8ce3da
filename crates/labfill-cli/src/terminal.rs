//! Terminal-backed operator: notices go to the output, answers come from the input.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use labfill_search::{
    Autofill, AutofillOutcome, EntryForm, Notice, Operator, SearchOutcome, Severity,
};

pub struct TerminalOperator<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks for the value of `field`. `None` on end of input or `q`.
    pub fn read_value(&mut self, field: &str) -> io::Result<Option<String>> {
        write!(self.output, "{field}: ")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        Ok(Some(line))
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

fn write_notice(output: &mut impl Write, notice: &Notice) {
    let mut write = || -> io::Result<()> {
        writeln!(
            output,
            "[{}] {}",
            severity_label(notice.severity),
            notice.message
        )?;
        if let Some(detail) = &notice.detail {
            writeln!(output, "    {detail}")?;
        }
        Ok(())
    };
    if let Err(err) = write() {
        warn!(error = %err, "failed to show notice");
    }
}

/// Output-only operator for rounds that never ask a question.
///
/// Any continue prompt is answered no.
pub struct NoticePrinter<W> {
    output: W,
}

impl<W: Write> NoticePrinter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write> Operator for NoticePrinter<W> {
    fn notify(&mut self, notice: &Notice) {
        write_notice(&mut self.output, notice);
    }

    fn confirm_continue(&mut self, prompt: &str) -> bool {
        info!(prompt, "no input for this round, not continuing");
        false
    }
}

impl<R: BufRead, W: Write> Operator for TerminalOperator<R, W> {
    fn notify(&mut self, notice: &Notice) {
        write_notice(&mut self.output, notice);
    }

    fn confirm_continue(&mut self, prompt: &str) -> bool {
        let answer = write!(self.output, "{prompt} [y/N] ")
            .and_then(|()| self.output.flush())
            .and_then(|()| self.read_line());
        match answer {
            Ok(Some(line)) => matches!(line.to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "failed to read answer, treating as no");
                false
            }
        }
    }
}

/// Prompts for the current field and runs rounds until a row resolves.
///
/// Returns the last outcome when input ends first.
pub fn run_rounds<R: BufRead, W: Write>(
    autofill: &mut Autofill,
    form: &mut EntryForm,
    operator: &mut TerminalOperator<R, W>,
) -> io::Result<AutofillOutcome> {
    let mut last = AutofillOutcome::Searched(SearchOutcome::NotFound);
    loop {
        let Some(field) = autofill
            .session()
            .current_target()
            .map(|t| t.field.clone())
        else {
            // No searchable field; the engine reports why.
            return Ok(autofill.fill_next(form, operator));
        };
        let Some(value) = operator.read_value(&field)? else {
            info!("input ended before a record resolved");
            return Ok(last);
        };
        form.set(&field, value);
        last = autofill.fill_next(form, operator);
        if matches!(last, AutofillOutcome::Searched(SearchOutcome::Resolved(_))) {
            return Ok(last);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn confirm_reads_yes_and_no() {
        let mut operator = TerminalOperator::new(Cursor::new("yes\nn\n"), Vec::new());
        assert!(operator.confirm_continue("Continue?"));
        assert!(!operator.confirm_continue("Continue?"));
        assert!(!operator.confirm_continue("Continue?"));
        let output = String::from_utf8(operator.into_output()).unwrap();
        assert_eq!(output.matches("Continue? [y/N] ").count(), 3);
    }

    #[test]
    fn notices_include_detail() {
        let mut operator = TerminalOperator::new(Cursor::new(""), Vec::new());
        operator.notify(&Notice::error("out of fields").with_detail("reset"));
        let output = String::from_utf8(operator.into_output()).unwrap();
        assert_eq!(output, "[error] out of fields\n    reset\n");
    }

    #[test]
    fn notice_printer_declines_to_continue() {
        let mut printer = NoticePrinter::new(Vec::new());
        printer.notify(&Notice::info("Multiple matches"));
        assert!(!printer.confirm_continue("Continue?"));
        let output = String::from_utf8(printer.into_output()).unwrap();
        assert_eq!(output, "[info] Multiple matches\n");
    }

    #[test]
    fn read_value_stops_on_quit() {
        let mut operator = TerminalOperator::new(Cursor::new("6,2\nq\n"), Vec::new());
        assert_eq!(operator.read_value("WBC").unwrap(), Some("6,2".to_string()));
        assert_eq!(operator.read_value("RBC").unwrap(), None);
    }
}
