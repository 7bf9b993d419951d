use crate::error::GridError;
use crate::grid::{Grid, Point};
use std::collections::HashSet;

/// Parses an array of string slices into a `Grid`.
///
/// Each string slice is one row, starting from row 0 at the top. All rows must
/// have the same number of characters; that number is the grid's width.
///
/// Valid characters are:
/// - '#': a blocked cell
/// - '.' or ' ': a free cell
///
/// Any other character will result in an error.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`), one per row.
///
/// # Returns
/// * `Ok(Grid)` if parsing is successful.
/// * `Err(GridError)` if:
///     - `s` is empty or its first row is empty.
///     - A row's length differs from the first row's length.
///     - An unrecognized character is encountered.
///
/// # Examples
/// ```
/// use astar_pathfinding::utils::grid_from_str_array;
/// use astar_pathfinding::grid::Point;
///
/// let grid = grid_from_str_array(&[
///     "..#",
///     ". .",
/// ]).unwrap();
/// assert_eq!((grid.width(), grid.height()), (3, 2));
/// assert!(grid.is_blocked(Point::new(2, 0)));
/// assert!(!grid.is_blocked(Point::new(1, 1)));
///
/// assert!(grid_from_str_array(&["..x"]).is_err());
/// assert!(grid_from_str_array(&["...", ".."]).is_err());
/// ```
pub fn grid_from_str_array(s: &[&str]) -> Result<Grid, GridError> {
    let width = s.first().map_or(0, |row| row.chars().count());
    if width == 0 {
        return Err(GridError::Empty);
    }

    let mut grid = Grid::new(width, s.len());

    for (r, row_str) in s.iter().enumerate() {
        let found = row_str.chars().count();
        if found != width {
            return Err(GridError::RaggedRow {
                row: r,
                expected: width,
                found,
            });
        }

        for (c, ch) in row_str.chars().enumerate() {
            match ch {
                '#' => {
                    grid.block(Point::new(c as i64, r as i64));
                }
                '.' | ' ' => {}
                _ => return Err(GridError::UnrecognizedCharacter { ch, row: r, col: c }),
            }
        }
    }
    Ok(grid)
}

/// Parses the text of a grid file into a `Grid`.
///
/// Line endings may be `\n` or `\r\n`. Empty lines before the first row and
/// after the last one are ignored; every line in between is a row, including
/// rows made only of spaces (free cells).
///
/// # Examples
/// ```
/// use astar_pathfinding::utils::grid_from_str;
///
/// let grid = grid_from_str("\n..#\n   \n").unwrap();
/// assert_eq!((grid.width(), grid.height()), (3, 2));
/// ```
pub fn grid_from_str(text: &str) -> Result<Grid, GridError> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    let first = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let last = lines.iter().rposition(|l| !l.is_empty()).map_or(first, |i| i + 1);
    grid_from_str_array(&lines[first..last])
}

/// Draws up to two sets of points over ASCII art.
///
/// Cells in `primary` are replaced by `c`, cells in `secondary` (and not in
/// `primary`) by `c2`. Points outside the art are ignored. Every output row ends
/// with a newline.
///
/// # Examples
/// ```
/// use astar_pathfinding::grid::Point;
/// use astar_pathfinding::utils::draw_path;
///
/// let art = ["+--+", "|  |", "+--+"];
/// let path = [Point::new(1, 1), Point::new(2, 1)];
/// assert_eq!(draw_path(&art, &path, &[], '#', '*'), "+--+\n|##|\n+--+\n");
/// ```
pub fn draw_path(lines: &[&str], primary: &[Point], secondary: &[Point], c: char, c2: char) -> String {
    let primary: HashSet<Point> = primary.iter().copied().collect();
    let secondary: HashSet<Point> = secondary.iter().copied().collect();

    let mut result = String::new();
    for (y, line) in lines.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let p = Point::new(x as i64, y as i64);
            if primary.contains(&p) {
                result.push(c);
            } else if secondary.contains(&p) {
                result.push(c2);
            } else {
                result.push(ch);
            }
        }
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_str_array_valid() {
        let grid = grid_from_str_array(&[
            "#....", //
            ".##..", //
            "....#", //
        ])
        .unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert!(grid.is_blocked(Point::new(0, 0)));
        assert!(grid.is_blocked(Point::new(2, 1)));
        assert!(grid.is_blocked(Point::new(4, 2)));
        assert!(!grid.is_blocked(Point::new(3, 2)));
        assert_eq!(grid.to_lines(), vec!["#....", ".##..", "....#"]);
    }

    #[test]
    fn test_grid_from_str_array_invalid_char() {
        let result = grid_from_str_array(&["..X.."]);
        assert_eq!(
            result,
            Err(GridError::UnrecognizedCharacter {
                ch: 'X',
                row: 0,
                col: 2
            })
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unrecognized character 'X'"));
    }

    #[test]
    fn test_grid_from_str_array_ragged() {
        let result = grid_from_str_array(&["....", "...", "...."]);
        assert_eq!(
            result,
            Err(GridError::RaggedRow {
                row: 1,
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_grid_from_str_array_empty_input() {
        let empty: [&str; 0] = [];
        assert_eq!(grid_from_str_array(&empty), Err(GridError::Empty));
        assert_eq!(grid_from_str_array(&[""]), Err(GridError::Empty));
    }

    #[test]
    fn test_grid_from_str_keeps_blank_rows() {
        let grid = grid_from_str("....\n    \n.##.\n....\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 4));
        assert!(!grid.is_blocked(Point::new(2, 1)));
        assert!(grid.is_blocked(Point::new(1, 2)));
        assert!(grid.check_free(Point::new(3, 3)).is_ok());
    }

    #[test]
    fn test_grid_from_str_trims_edge_lines() {
        let grid = grid_from_str("\r\n\n#.\r\n.#\r\n\n").unwrap();
        assert_eq!(grid.to_lines(), vec!["#.", ".#"]);
        assert_eq!(grid_from_str("\n\n"), Err(GridError::Empty));
        assert_eq!(
            grid_from_str("..\n\n.."),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 2,
                found: 0
            })
        );
    }

    #[test]
    fn test_draw_path_two_sets() {
        let art = ["....", "....", "...."];
        let drawn = draw_path(
            &art,
            &[Point::new(0, 0), Point::new(1, 1)],
            &[Point::new(1, 1), Point::new(3, 2), Point::new(9, 9)],
            '#',
            '*',
        );
        assert_eq!(drawn, "#...\n.#..\n...*\n");
    }
}
