//! Text output of attitude estimates.
//!
//! One line per cycle: `<pitch>,<roll>,<yaw>\n`, degrees, three fractional
//! digits each. [`parse_line`] reads the format back, and also accepts the
//! older two-field `<pitch>,<roll>` lines (yaw taken as zero).

use crate::attitude::AttitudeState;
use core::fmt::{Debug, Formatter, Write as _};
use heapless::String;

/// Longest possible line: three `-f32::MAX` values at three decimals
/// (44 characters each), two separators and the newline.
pub const LINE_CAPACITY: usize = 3 * 44 + 3;

pub type Line = String<LINE_CAPACITY>;

/// Failure to emit an attitude line.
pub enum OutputError<E> {
    /// The formatted line did not fit the line buffer
    Format,
    /// The underlying stream rejected the write
    Write(E),
}

impl<E> Debug for OutputError<E>
where
    E: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Format => f.write_str("Format"),
            Self::Write(e) => f.debug_tuple("Write").field(e).finish(),
        }
    }
}

/// Formats `state` as `<pitch>,<roll>,<yaw>\n`.
pub fn format_line(state: &AttitudeState) -> Result<Line, core::fmt::Error> {
    let mut line = Line::new();
    write!(line, "{:.3},{:.3},{:.3}\n", state.pitch, state.roll, state.yaw)?;
    Ok(line)
}

/// Writes one line for `state` to a blocking byte stream.
pub fn write_attitude<W>(writer: &mut W, state: &AttitudeState) -> Result<(), OutputError<W::Error>>
where
    W: embedded_io::Write,
{
    let line = format_line(state).map_err(|_| OutputError::Format)?;
    writer
        .write_all(line.as_bytes())
        .map_err(OutputError::Write)
}

/// Writes one line for `state` to an async byte stream.
pub async fn write_attitude_async<W>(
    writer: &mut W,
    state: &AttitudeState,
) -> Result<(), OutputError<W::Error>>
where
    W: embedded_io_async::Write,
{
    let line = format_line(state).map_err(|_| OutputError::Format)?;
    writer
        .write_all(line.as_bytes())
        .await
        .map_err(OutputError::Write)
}

/// Parses a line produced by [`format_line`].
///
/// Three fields are pitch, roll, yaw. Two fields are pitch, roll with yaw at
/// zero. Surrounding whitespace (including the newline) is ignored; any other
/// field count or a non-numeric field yields `None`.
pub fn parse_line(line: &str) -> Option<AttitudeState> {
    let mut fields = line.trim().split(',');
    let pitch = fields.next()?.trim().parse::<f32>().ok()?;
    let roll = fields.next()?.trim().parse::<f32>().ok()?;
    let yaw = match fields.next() {
        Some(field) => field.trim().parse::<f32>().ok()?,
        None => 0.0,
    };
    if fields.next().is_some() {
        return None;
    }
    Some(AttitudeState { roll, pitch, yaw })
}
