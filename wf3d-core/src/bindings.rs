/// Key binding files
///
/// One binding per line, `#` starts a comment:
///
/// ```text
/// up = forward 10
/// q  = pitch 0.1
/// x  = yaw -0.25
/// ```
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, satisfy, space0, space1},
    combinator::{all_consuming, map, value},
    number::complete::double,
    sequence::{delimited, separated_pair, tuple},
    IResult,
};

use crate::command::{Command, Direction, Key, KeyMap, Spin};
use crate::error::{Error, Result};

/// Parse a bindings file into a table holding only the bindings it names.
pub fn parse_bindings(input: &str) -> Result<KeyMap> {
    let mut map = KeyMap::empty();

    for (i, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let (key, command) = match all_consuming(binding)(line) {
            Ok((_, parsed)) => parsed,
            Err(e) => {
                return Err(Error::Binding {
                    line: i + 1,
                    message: format!("cannot parse `{line}`: {e:?}"),
                })
            }
        };
        check_finite(&command).map_err(|message| Error::Binding {
            line: i + 1,
            message,
        })?;

        map.bind(key, command);
    }

    Ok(map)
}

/// Parse a single command such as `forward 10` or `yaw -0.1`.
pub fn parse_command(input: &str) -> Result<Command> {
    let (_, command) = all_consuming(delimited(space0, command, space0))(input).map_err(|e| {
        Error::Binding {
            line: 1,
            message: format!("cannot parse `{input}`: {e:?}"),
        }
    })?;
    check_finite(&command).map_err(|message| Error::Binding { line: 1, message })?;
    Ok(command)
}

fn check_finite(command: &Command) -> std::result::Result<(), String> {
    let amount = match *command {
        Command::Translate { distance, .. } => distance,
        Command::Rotate { angle, .. } => angle,
    };
    if amount.is_finite() {
        Ok(())
    } else {
        Err(format!("amount must be finite, got {amount}"))
    }
}

fn binding(input: &str) -> IResult<&str, (Key, Command)> {
    separated_pair(key, tuple((space0, char('='), space0)), command)(input)
}

fn key(input: &str) -> IResult<&str, Key> {
    alt((
        value(Key::Up, tag_no_case("up")),
        value(Key::Down, tag_no_case("down")),
        value(Key::Left, tag_no_case("left")),
        value(Key::Right, tag_no_case("right")),
        map(
            satisfy(|c| c.is_ascii_graphic() && c != '=' && c != '#'),
            Key::Char,
        ),
    ))(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        map(
            separated_pair(direction, space1, double),
            |(direction, distance)| Command::Translate {
                direction,
                distance,
            },
        ),
        map(separated_pair(spin, space1, double), |(spin, angle)| {
            Command::Rotate { spin, angle }
        }),
    ))(input)
}

fn direction(input: &str) -> IResult<&str, Direction> {
    alt((
        value(Direction::Forward, tag_no_case("forward")),
        value(Direction::Backward, tag_no_case("backward")),
        value(Direction::Left, tag_no_case("left")),
        value(Direction::Right, tag_no_case("right")),
        value(Direction::Up, tag_no_case("up")),
        value(Direction::Down, tag_no_case("down")),
    ))(input)
}

fn spin(input: &str) -> IResult<&str, Spin> {
    alt((
        value(Spin::Yaw, tag_no_case("yaw")),
        value(Spin::Pitch, tag_no_case("pitch")),
        value(Spin::Roll, tag_no_case("roll")),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bindings() {
        let map = parse_bindings(
            "# movement\n\
             up    = forward 10\n\
             \n\
             Left  = LEFT 2.5   # slower strafe\n\
             1=up 10\n\
             x     = yaw -0.25\n",
        )
        .unwrap();

        assert_eq!(map.len(), 4);
        assert_eq!(
            map.get(Key::Up),
            Some(Command::translate(Direction::Forward, 10.0))
        );
        assert_eq!(
            map.get(Key::Left),
            Some(Command::translate(Direction::Left, 2.5))
        );
        assert_eq!(
            map.get(Key::Char('1')),
            Some(Command::translate(Direction::Up, 10.0))
        );
        assert_eq!(map.get(Key::Char('x')), Some(Command::rotate(Spin::Yaw, -0.25)));
    }

    #[test]
    fn test_single_letter_keys_that_start_key_names() {
        let map = parse_bindings("u = roll 1\nd = pitch -1\nR = yaw 0.5").unwrap();
        assert_eq!(map.get(Key::Char('u')), Some(Command::rotate(Spin::Roll, 1.0)));
        assert_eq!(map.get(Key::Char('d')), Some(Command::rotate(Spin::Pitch, -1.0)));
        assert_eq!(map.get(Key::Char('R')), Some(Command::rotate(Spin::Yaw, 0.5)));
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_bindings("q = pitch 0.1\n\nw = sideways 3\n").unwrap_err();
        assert!(matches!(err, Error::Binding { line: 3, .. }));

        let err = parse_bindings("q = pitch\n").unwrap_err();
        assert!(matches!(err, Error::Binding { line: 1, .. }));

        let err = parse_bindings("ab = roll 1\n").unwrap_err();
        assert!(matches!(err, Error::Binding { line: 1, .. }));

        let err = parse_bindings("q = pitch inf\n").unwrap_err();
        assert!(err.to_string().contains("finite"));
    }

    #[test]
    fn test_empty_file_binds_nothing() {
        assert!(parse_bindings("").unwrap().is_empty());
        assert!(parse_bindings("# nothing here\n   \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("  backward 4 ").unwrap(),
            Command::translate(Direction::Backward, 4.0)
        );
        assert_eq!(parse_command("ROLL -0.1").unwrap(), Command::rotate(Spin::Roll, -0.1));
        assert!(parse_command("roll").is_err());
        assert!(parse_command("roll 1 2").is_err());
    }
}
