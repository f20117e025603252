//! Check output text format
//!
//! The published `SFMT.<mexp>.out.txt` files list the first values of two runs
//! of a generator: one seeded with `init_gen_rand` and one with
//! `init_by_array`. This module renders that layout and parses it back.

use crate::constants::REFERENCE_PER_LINE;
use crate::domain::params::{PARAMETER_SETS, ParameterSet};
use thiserror::Error;

/// Header line following the id string
pub const HEADER_LINE: &str = "32 bit generated randoms";

/// Marker of the `init_gen_rand` section
pub const GEN_RAND_MARKER: &str = "init_gen_rand__________";

/// Marker of the `init_by_array` section
pub const BY_ARRAY_MARKER: &str = "init_by_array__________";

/// Parsed check output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutput {
    /// Parameter set named by the id line
    pub params: &'static ParameterSet,
    /// Values of the `init_gen_rand` run
    pub gen_rand: Vec<u32>,
    /// Values of the `init_by_array` run
    pub by_array: Vec<u32>,
}

/// Check output parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceFormatError {
    /// A required line or section marker is absent
    #[error("missing section: {0}")]
    MissingSection(&'static str),

    /// A token is not a 32-bit unsigned integer
    #[error("invalid value {token:?} on line {line}")]
    InvalidValue { line: usize, token: String },

    /// The id line does not name a known parameter set
    #[error("unknown SFMT id string: {0}")]
    UnknownIdString(String),
}

/// Render check output in the published layout
pub fn format_check_output(params: &ParameterSet, gen_rand: &[u32], by_array: &[u32]) -> String {
    let mut out = String::with_capacity(128 + (gen_rand.len() + by_array.len()) * 11);

    for line in [params.id_string(), HEADER_LINE, GEN_RAND_MARKER] {
        out.push_str(line);
        out.push('\n');
    }
    write_values(&mut out, gen_rand);
    out.push('\n');
    out.push_str(BY_ARRAY_MARKER);
    out.push('\n');
    write_values(&mut out, by_array);

    out
}

fn write_values(out: &mut String, values: &[u32]) {
    for (i, v) in values.iter().enumerate() {
        out.push_str(&format!("{:10} ", v));
        if i % REFERENCE_PER_LINE == REFERENCE_PER_LINE - 1 {
            out.push('\n');
        }
    }
    if values.len() % REFERENCE_PER_LINE != 0 {
        out.push('\n');
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    GenRand,
    ByArray,
}

/// Parse check output text
pub fn parse_check_output(text: &str) -> Result<CheckOutput, ReferenceFormatError> {
    let mut lines = text.lines().enumerate();

    let id = lines
        .by_ref()
        .map(|(_, line)| line.trim())
        .find(|line| !line.is_empty())
        .ok_or(ReferenceFormatError::MissingSection("id string"))?;

    let params = PARAMETER_SETS
        .iter()
        .copied()
        .find(|p| p.id_string() == id)
        .ok_or_else(|| ReferenceFormatError::UnknownIdString(id.to_string()))?;

    let mut section = Section::Header;
    let mut seen_gen_rand = false;
    let mut seen_by_array = false;
    let mut gen_rand = Vec::new();
    let mut by_array = Vec::new();

    for (index, line) in lines {
        let line = line.trim();
        if line.is_empty() || line == HEADER_LINE {
            continue;
        }
        if line == GEN_RAND_MARKER {
            section = Section::GenRand;
            seen_gen_rand = true;
            continue;
        }
        if line == BY_ARRAY_MARKER {
            section = Section::ByArray;
            seen_by_array = true;
            continue;
        }

        let target = match section {
            Section::Header => {
                return Err(ReferenceFormatError::MissingSection(GEN_RAND_MARKER));
            }
            Section::GenRand => &mut gen_rand,
            Section::ByArray => &mut by_array,
        };

        for token in line.split_whitespace() {
            let value = token
                .parse::<u32>()
                .map_err(|_| ReferenceFormatError::InvalidValue {
                    line: index + 1,
                    token: token.to_string(),
                })?;
            target.push(value);
        }
    }

    if !seen_gen_rand {
        return Err(ReferenceFormatError::MissingSection(GEN_RAND_MARKER));
    }
    if !seen_by_array {
        return Err(ReferenceFormatError::MissingSection(BY_ARRAY_MARKER));
    }

    Ok(CheckOutput {
        params,
        gen_rand,
        by_array,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::{SFMT_607, SFMT_19937};

    #[test]
    fn test_format_layout() {
        let text = format_check_output(&SFMT_607, &[1, 2, 3, 4, 5, 4294967295], &[7]);
        let expected = [
            "SFMT-607:2-15-3-13-3:fdff37ff-ef7f3f7d-ff777b7d-7ff7fb2f",
            "32 bit generated randoms",
            "init_gen_rand__________",
            "         1          2          3          4          5 ",
            "4294967295 ",
            "",
            "init_by_array__________",
            "         7 ",
        ]
        .join("\n")
            + "\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_parse_formatted() {
        let gen_rand: Vec<u32> = (0..12).map(|i| i * 1_000_003).collect();
        let by_array = vec![u32::MAX, 0, 42];
        let text = format_check_output(&SFMT_19937, &gen_rand, &by_array);

        let parsed = parse_check_output(&text).unwrap();
        assert_eq!(parsed.params, &SFMT_19937);
        assert_eq!(parsed.gen_rand, gen_rand);
        assert_eq!(parsed.by_array, by_array);
    }

    #[test]
    fn test_parse_unknown_id() {
        let text = "SFMT-1279:7-14-3-5-1:f7fefffd-7fefcfff-aff3ef3f-b5ffff7f\n";
        assert_eq!(
            parse_check_output(text),
            Err(ReferenceFormatError::UnknownIdString(
                "SFMT-1279:7-14-3-5-1:f7fefffd-7fefcfff-aff3ef3f-b5ffff7f".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(
            parse_check_output("\n\n"),
            Err(ReferenceFormatError::MissingSection("id string"))
        );
    }

    #[test]
    fn test_parse_missing_by_array() {
        let text = format!("{}\n{}\n1 2 3\n", SFMT_607.id, GEN_RAND_MARKER);
        assert_eq!(
            parse_check_output(&text),
            Err(ReferenceFormatError::MissingSection(BY_ARRAY_MARKER))
        );
    }

    #[test]
    fn test_parse_values_before_section() {
        let text = format!("{}\n{}\n1 2 3\n", SFMT_607.id, HEADER_LINE);
        assert_eq!(
            parse_check_output(&text),
            Err(ReferenceFormatError::MissingSection(GEN_RAND_MARKER))
        );
    }

    #[test]
    fn test_parse_invalid_value() {
        let text = format!(
            "{}\n{}\n1 2\n3 x4\n{}\n",
            SFMT_607.id, GEN_RAND_MARKER, BY_ARRAY_MARKER
        );
        assert_eq!(
            parse_check_output(&text),
            Err(ReferenceFormatError::InvalidValue {
                line: 4,
                token: "x4".to_string()
            })
        );
    }
}
