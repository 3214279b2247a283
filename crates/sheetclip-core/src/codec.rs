//! Tab-separated text <-> grid conversion.
//!
//! The transport format for clipboard and stdin: rows joined by newline,
//! cells joined by a single tab, no trailing delimiter. There is no escaping
//! mechanism for embedded tabs or newlines; that is a documented limitation
//! of the format, not something this codec papers over.

use crate::grid::Grid;

/// Serialize a grid to flat text.
pub fn serialize(grid: &Grid) -> String {
    grid.rows()
        .iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deserialize flat text into a grid. Empty input yields a grid of zero rows.
pub fn deserialize(text: &str) -> Grid {
    if text.is_empty() {
        return Grid::new();
    }

    Grid::from_rows(
        text.split('\n')
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_serialize_two_by_two() {
        let g = grid(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(serialize(&g), "a\tb\nc\td");
    }

    #[test]
    fn test_deserialize_two_by_two() {
        assert_eq!(deserialize("a\tb\nc\td"), grid(&[&["a", "b"], &["c", "d"]]));
    }

    #[test]
    fn test_empty_input_yields_zero_rows() {
        assert!(deserialize("").is_empty());
    }

    #[test]
    fn test_single_cell() {
        assert_eq!(deserialize("x"), grid(&[&["x"]]));
        assert_eq!(serialize(&grid(&[&["x"]])), "x");
    }

    #[test]
    fn test_empty_cells_survive() {
        let g = deserialize("a\t\tb");
        assert_eq!(g.rows()[0], vec!["a", "", "b"]);
        assert_eq!(serialize(&g), "a\t\tb");
    }

    #[test]
    fn test_round_trip_text_to_grid_to_text() {
        for text in ["a\tb\nc\td", "one", "a\nb\nc", "\t", "a\t\n\tb"] {
            assert_eq!(serialize(&deserialize(text)), text);
        }
    }

    #[test]
    fn test_round_trip_grid_to_text_to_grid() {
        let g = grid(&[&["1", "2", "3"], &["x y", "", "z"]]);
        assert_eq!(deserialize(&serialize(&g)), g);
    }
}
