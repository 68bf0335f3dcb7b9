//! Moving the selected-frame cursor along the call stack.

use super::commands::Flow;
use super::error::CommandError;
use super::location::stack_location;
use super::session::Session;

pub(crate) fn parse_count(arg: Option<&String>, what: &'static str) -> Result<isize, CommandError> {
    match arg {
        None => Ok(1),
        Some(s) => s.parse::<isize>().map_err(|_| CommandError::NotAnInteger {
            what,
            value: s.clone(),
        }),
    }
}

impl Session<'_> {
    /// Moves the cursor to `n` (absolute) or by `n` (relative, positive
    /// toward the outermost caller). Out-of-range targets leave it alone.
    pub fn adjust_frame(&mut self, n: isize, absolute: bool) -> Result<(), CommandError> {
        let len = self.stack.len();
        if len == 0 {
            return Err(CommandError::NoFrame);
        }
        let target = if absolute {
            n
        } else {
            (self.cursor() as isize).saturating_add(n)
        };
        if target < 0 || target >= len as isize {
            return Err(CommandError::FrameOutOfRange {
                requested: target,
                max: len - 1,
            });
        }
        self.set_cursor(target as usize);
        self.print_frame_line(target as usize)?;
        Ok(())
    }

    fn print_frame_line(&mut self, depth: usize) -> std::io::Result<()> {
        let Some(frame) = self.stack.frame(depth) else {
            return Ok(());
        };
        let pointer = if depth == self.cursor() { "=> " } else { "   " };
        let location = stack_location(self.program, frame);
        self.msg(format_args!("{}#{} {}", pointer, depth, location))
    }
}

/// backtrace [count]
pub(crate) fn backtrace(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let limit = match args.get(1) {
        Some(_) => parse_count(args.get(1), "frame count")?.max(0) as usize,
        None => s.stack.len(),
    };
    for depth in 0..s.stack.len().min(limit) {
        s.print_frame_line(depth)?;
    }
    Ok(Flow::Continue)
}

/// frame N
pub(crate) fn frame(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let n = parse_count(args.get(1), "frame number")?;
    s.adjust_frame(n, true)?;
    Ok(Flow::Continue)
}

/// up [N]: toward the caller
pub(crate) fn up(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let n = parse_count(args.get(1), "frame number")?;
    s.adjust_frame(n, false)?;
    Ok(Flow::Continue)
}

/// down [N]: toward the innermost frame
pub(crate) fn down(s: &mut Session<'_>, args: &[String]) -> Result<Flow, CommandError> {
    let n = parse_count(args.get(1), "frame number")?;
    s.adjust_frame(n.saturating_neg(), false)?;
    Ok(Flow::Continue)
}
