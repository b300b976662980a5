//! Reader for ITC-2007 track 3 (`.ctt`) instance files.
//!
//! ```text
//! Name: Toy
//! Courses: 2
//! Rooms: 1
//! Days: 2
//! Periods_per_day: 1
//! Curricula: 1
//! Constraints: 1
//!
//! COURSES:
//! c1 t1 1 1 10
//! c2 t2 1 1 10
//!
//! ROOMS:
//! r1 20
//!
//! CURRICULA:
//! q1 2 c1 c2
//!
//! UNAVAILABILITY_CONSTRAINTS:
//! c1 0 0
//!
//! END.
//! ```
//!
//! Blank lines are ignored. Each section must contain exactly the number
//! of records announced in the header.

use std::path::Path;
use std::str::FromStr;

use super::course::{Course, Curriculum, Room, Unavailability};
use super::problem::Problem;

/// Failure to read or validate a problem instance.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing header `{0}`")]
    MissingHeader(&'static str),

    #[error("missing section `{0}`")]
    MissingSection(&'static str),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("unknown course `{0}`")]
    UnknownCourse(String),

    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },

    #[error("unavailability of `{course}` at day {day}, period {period} is outside the grid")]
    OutOfRange {
        course: String,
        day: usize,
        period: usize,
    },

    #[error("grid must have at least one day and one period")]
    EmptyGrid,

    #[error("grid of {days}x{periods_per_day} cells for {courses} courses is too large")]
    GridTooLarge {
        days: usize,
        periods_per_day: usize,
        courses: usize,
    },

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
}

/// Reads and parses a `.ctt` file.
pub fn load_ctt(path: impl AsRef<Path>) -> Result<Problem, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let problem = parse_ctt(&text)?;
    tracing::info!(
        name = %problem.name(),
        courses = problem.courses().len(),
        rooms = problem.rooms().len(),
        days = problem.days(),
        periods_per_day = problem.periods_per_day(),
        "instance loaded"
    );
    Ok(problem)
}

/// Parses `.ctt` text into a validated [`Problem`].
pub fn parse_ctt(text: &str) -> Result<Problem, LoadError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    let name = header(&lines, "Name")?.to_string();
    let n_courses: usize = parse_header(&lines, "Courses")?;
    let n_rooms: usize = parse_header(&lines, "Rooms")?;
    let days: usize = parse_header(&lines, "Days")?;
    let periods: usize = parse_header(&lines, "Periods_per_day")?;
    let n_curricula: usize = parse_header(&lines, "Curricula")?;
    let n_constraints: usize = parse_header(&lines, "Constraints")?;

    let courses = section(&lines, "COURSES:", n_courses)?
        .iter()
        .map(|&(line, text)| {
            let f = fields(line, text, 5)?;
            Ok(Course::new(
                f[0],
                f[1],
                number(line, f[2])?,
                number(line, f[3])?,
                number(line, f[4])?,
            ))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    let rooms = section(&lines, "ROOMS:", n_rooms)?
        .iter()
        .map(|&(line, text)| {
            let f = fields(line, text, 2)?;
            Ok(Room::new(f[0], number(line, f[1])?))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    let curricula = section(&lines, "CURRICULA:", n_curricula)?
        .iter()
        .map(|&(line, text)| {
            let f = fields(line, text, 2)?;
            let count: usize = number(line, f[1])?;
            let members = &f[2..];
            if members.len() != count {
                return Err(LoadError::Malformed {
                    line,
                    reason: format!(
                        "curriculum {} announces {} courses but lists {}",
                        f[0],
                        count,
                        members.len()
                    ),
                });
            }
            Ok(Curriculum::new(f[0], members.iter().copied()))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    let unavailability = section(&lines, "UNAVAILABILITY_CONSTRAINTS:", n_constraints)?
        .iter()
        .map(|&(line, text)| {
            let f = fields(line, text, 3)?;
            Ok(Unavailability::new(
                f[0],
                number(line, f[1])?,
                number(line, f[2])?,
            ))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    Problem::new(
        name,
        days,
        periods,
        courses,
        rooms,
        curricula,
        unavailability,
    )
}

fn header<'a>(lines: &[(usize, &'a str)], key: &'static str) -> Result<&'a str, LoadError> {
    lines
        .iter()
        .find_map(|(_, l)| {
            let (k, v) = l.split_once(':')?;
            (k.trim() == key).then(|| v.trim())
        })
        .ok_or(LoadError::MissingHeader(key))
}

fn parse_header<T: FromStr>(lines: &[(usize, &str)], key: &'static str) -> Result<T, LoadError> {
    let value = header(lines, key)?;
    let line = lines
        .iter()
        .find(|(_, l)| l.starts_with(key))
        .map_or(0, |(n, _)| *n);
    number(line, value)
}

fn section<'a>(
    lines: &'a [(usize, &'a str)],
    title: &'static str,
    count: usize,
) -> Result<&'a [(usize, &'a str)], LoadError> {
    let start = lines
        .iter()
        .position(|(_, l)| *l == title)
        .ok_or(LoadError::MissingSection(title))?
        + 1;
    let last_line = lines.last().map_or(0, |(n, _)| *n);
    let end = start.checked_add(count).ok_or_else(|| LoadError::Malformed {
        line: last_line,
        reason: format!("section {title} announces {count} records"),
    })?;
    let records = lines.get(start..end).ok_or_else(|| LoadError::Malformed {
        line: last_line,
        reason: format!("section {title} ends before {count} records"),
    })?;
    if let Some((line, text)) = records.iter().find(|(_, l)| l.ends_with(':')) {
        return Err(LoadError::Malformed {
            line: *line,
            reason: format!("section {title} has fewer than {count} records (found `{text}`)"),
        });
    }
    if let Some((line, text)) = lines.get(end) {
        if !text.ends_with(':') && *text != "END." {
            return Err(LoadError::Malformed {
                line: *line,
                reason: format!("section {title} has more than {count} records (found `{text}`)"),
            });
        }
    }
    Ok(records)
}

fn fields(line: usize, text: &str, min: usize) -> Result<Vec<&str>, LoadError> {
    let f: Vec<&str> = text.split_whitespace().collect();
    if f.len() < min {
        return Err(LoadError::Malformed {
            line,
            reason: format!("expected at least {min} fields, found {}", f.len()),
        });
    }
    Ok(f)
}

fn number<T: FromStr>(line: usize, value: &str) -> Result<T, LoadError> {
    value.parse().map_err(|_| LoadError::Malformed {
        line,
        reason: format!("`{value}` is not a non-negative integer"),
    })
}

#[cfg(test)]
pub(crate) const TOY_CTT: &str = "\
Name: Toy
Courses: 4
Rooms: 3
Days: 5
Periods_per_day: 4
Curricula: 2
Constraints: 8

COURSES:
SceCosC Ocra 3 3 30
ArcTec Indaco 3 2 42
TecCos Rosa 5 4 40
Geotec Scarlatti 5 4 18

ROOMS:
A 32
B 50
C 40

CURRICULA:
Cur1 3 SceCosC ArcTec TecCos
Cur2 2 TecCos Geotec

UNAVAILABILITY_CONSTRAINTS:
TecCos 2 0
TecCos 2 1
TecCos 3 2
TecCos 3 3
ArcTec 4 0
ArcTec 4 1
ArcTec 4 2
ArcTec 4 3

END.
";
