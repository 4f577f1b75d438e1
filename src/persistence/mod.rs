//! Text persistence for spline files.
//!
//! ```text
//! # comment lines and blank lines are skipped
//! 1            spline count (informational)
//! 4            control point count N
//! 2.5          sample time (informational)
//! x,y,z        position      } repeated N times
//! rx,ry,rz     rotation (deg) }
//! ```

mod format;

pub use format::*;

use crate::error::{CoasterError, Result};
use crate::sim::Float3;
use crate::track::{ControlPoint, SplineDocument};
use std::fmt::Write as _;
use std::str::FromStr;
use tracing::debug;

/// Parses spline text into a document.
///
/// The retained line count must be exactly `3 + 2N`; anything else is
/// rejected rather than truncated or padded. A leading byte order mark is
/// ignored.
pub fn parse(text: &str) -> Result<SplineDocument> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<(usize, &str)> = text
        .split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .collect();

    if lines.len() < HEADER_LINES {
        let line = lines.last().map_or(0, |&(n, _)| n);
        return Err(CoasterError::malformed(
            line,
            format!(
                "expected {HEADER_LINES} header lines, found {}",
                lines.len()
            ),
        ));
    }

    let declared_spline_count: i32 = parse_scalar(lines[0], "spline count")?;
    let point_count: usize = parse_scalar(lines[1], "control point count")?;
    let sample_time: f32 = parse_scalar(lines[2], "sample time")?;

    let expected = point_count
        .checked_mul(LINES_PER_POINT)
        .and_then(|n| n.checked_add(HEADER_LINES))
        .ok_or_else(|| {
            CoasterError::malformed(
                lines[1].0,
                format!("control point count {point_count} is too large"),
            )
        })?;

    if lines.len() != expected {
        return Err(CoasterError::malformed(
            lines[1].0,
            format!(
                "expected {expected} lines for {point_count} control points, found {}",
                lines.len()
            ),
        ));
    }

    let control_points = lines[HEADER_LINES..]
        .chunks_exact(LINES_PER_POINT)
        .map(|pair| {
            let position = parse_vector(pair[0])?;
            let rotation = parse_vector(pair[1])?;
            Ok(ControlPoint::new(position, rotation))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        control_points = control_points.len(),
        declared_spline_count, sample_time, "Parsed spline document"
    );

    Ok(SplineDocument {
        control_points,
        declared_spline_count,
        sample_time,
    })
}

/// Writes a document in the format `parse` reads.
pub fn to_text(doc: &SplineDocument) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{COMMENT_MARKER} kexcoaster spline");
    let _ = writeln!(out, "{}", doc.declared_spline_count);
    let _ = writeln!(out, "{}", doc.control_points.len());
    let _ = writeln!(out, "{}", doc.sample_time);
    for cp in &doc.control_points {
        write_vector(&mut out, cp.position);
        write_vector(&mut out, cp.rotation);
    }
    out
}

fn write_vector(out: &mut String, v: Float3) {
    let _ = writeln!(
        out,
        "{}{sep}{}{sep}{}",
        v.x,
        v.y,
        v.z,
        sep = COMPONENT_SEPARATOR
    );
}

fn parse_scalar<T: FromStr>((line, text): (usize, &str), what: &str) -> Result<T> {
    text.parse::<T>()
        .map_err(|_| CoasterError::malformed(line, format!("invalid {what} `{text}`")))
}

fn parse_vector((line, text): (usize, &str)) -> Result<Float3> {
    let components: Vec<&str> = text.split(COMPONENT_SEPARATOR).map(str::trim).collect();
    if components.len() != COMPONENTS_PER_LINE {
        return Err(CoasterError::malformed(
            line,
            format!(
                "expected {COMPONENTS_PER_LINE} comma-separated values, found {}",
                components.len()
            ),
        ));
    }

    let mut values = [0.0f32; COMPONENTS_PER_LINE];
    for (value, token) in values.iter_mut().zip(&components) {
        let parsed: f32 = token
            .parse()
            .map_err(|_| CoasterError::malformed(line, format!("invalid number `{token}`")))?;
        if !parsed.is_finite() {
            return Err(CoasterError::malformed(
                line,
                format!("non-finite number `{token}`"),
            ));
        }
        *value = parsed;
    }

    Ok(Float3::new(values[0], values[1], values[2]))
}
