/// Parser for the textual pose form `[x, y, z, a, b, c]`
use std::str::FromStr;

use nom::{
    character::complete::{char, multispace0},
    combinator::all_consuming,
    multi::separated_list1,
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::{AffxError, Result};
use crate::transform::Transform;

/// Parse a pose written as `[x, y, z, a, b, c]`, as produced by `Display`
pub fn parse_pose(input: &str) -> Result<Transform> {
    match all_consuming(parse_pose_impl)(input) {
        Ok((_, values)) => match <[f64; 6]>::try_from(values.as_slice()) {
            Ok(v) => Ok(Transform::from_vector6(v)),
            Err(_) => Err(AffxError::Parse(format!(
                "expected 6 values, got {}",
                values.len()
            ))),
        },
        Err(e) => Err(AffxError::Parse(format!("{:?}", e))),
    }
}

fn parse_pose_impl(input: &str) -> IResult<&str, Vec<f64>> {
    let (input, _) = preceded(multispace0, char('['))(input)?;
    let (input, values) = separated_list1(
        preceded(multispace0, char(',')),
        preceded(multispace0, double),
    )(input)?;
    let (input, _) = preceded(multispace0, char(']'))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, values))
}

impl FromStr for Transform {
    type Err = AffxError;

    fn from_str(s: &str) -> Result<Self> {
        parse_pose(s)
    }
}
